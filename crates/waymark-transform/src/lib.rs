//! Path-addressed immutable deep transforms over JSON values.
//!
//! `waymark-transform` locates a node inside an arbitrarily nested
//! combination of keyed maps and indexed sequences and applies a
//! user-supplied transform there, producing a new top-level structure while
//! leaving everything off the trail untouched.
//!
//! # Core Concepts
//!
//! - **Trail**: an ordered sequence of [`Seg`]s (string keys and integer
//!   indices), parsed from a path expression such as `a.b[1].c[3][2]`
//! - **Transform**: a pure, fallible function from node to optional
//!   replacement; `None` means "no change"
//! - **transform_at**: the recursive walk that rebuilds only the ancestors
//!   on the trail and returns `Cow::Borrowed` when nothing changed
//!
//! # Quick Start
//!
//! ```
//! use serde_json::{json, Value};
//! use std::borrow::Cow;
//! use waymark_transform::{transform_at, Trail, TransformError};
//!
//! let doc = json!({"a": {"b": {"c": {"d": 7}}}, "untouched": [1, 2, 3]});
//! let bump = |node: &Value| -> Result<Option<Value>, TransformError> {
//!     Ok(node.as_i64().map(|n| Value::from(n + 1)))
//! };
//!
//! let out = transform_at(&doc, &bump, &Trail::parse("a.b.c.d")).unwrap();
//! assert_eq!(*out, json!({"a": {"b": {"c": {"d": 8}}}, "untouched": [1, 2, 3]}));
//!
//! // Trails that lead nowhere are a no-op, not an error.
//! let out = transform_at(&doc, &bump, &Trail::parse("a.x.y")).unwrap();
//! assert!(matches!(out, Cow::Borrowed(_)));
//! ```
//!
//! Every call is synchronous, deterministic, and free of shared mutable
//! state; inputs are never mutated at any level.

mod classify;
mod path;
mod transform;

pub use classify::{classify, is_sequence, Container};
pub use path::{Seg, Trail};
pub use transform::{transform_at, transform_at_owned, Transform, TransformError};
