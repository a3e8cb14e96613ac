//! Container classification.
//!
//! Decides whether a node is an ordered, index-addressed sequence or a keyed
//! map, which in turn decides the copy strategy used by the deep transform.

use serde_json::{Map, Value};

/// A node viewed as a container.
///
/// Sequences and maps are mutually exclusive classifications; scalars and
/// null are neither.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Container<'a> {
    /// Ordered, index-addressed storage.
    Sequence(&'a Vec<Value>),
    /// Keyed storage.
    Map(&'a Map<String, Value>),
}

/// Classify a node as a container, if it is one.
#[inline]
pub fn classify(node: &Value) -> Option<Container<'_>> {
    match node {
        Value::Array(items) => Some(Container::Sequence(items)),
        Value::Object(entries) => Some(Container::Map(entries)),
        _ => None,
    }
}

/// Returns true iff the node is a genuine ordered, index-addressed sequence.
///
/// Strings iterate but do not classify as sequences; neither do maps,
/// scalars, or null.
#[inline]
pub fn is_sequence(node: &Value) -> bool {
    matches!(classify(node), Some(Container::Sequence(_)))
}
