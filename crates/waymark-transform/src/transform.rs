//! Path-addressed immutable deep transform.
//!
//! [`transform_at`] walks a trail through a nested value, applies a
//! user-supplied transform at the trail's end, and rebuilds only the
//! ancestors on the trail. Everything untouched is returned borrowed.

use crate::classify::{classify, Container};
use crate::path::{Seg, Trail};
use serde_json::Value;
use std::borrow::Cow;

/// Error raised by a user transform.
///
/// Transforms fail however they fail; the walk propagates the error
/// unmodified and never wraps or recovers.
pub type TransformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A fallible transform from a node to an optional replacement.
///
/// Returning `Ok(None)` signals "no change": the node, and therefore every
/// ancestor above it, is reused as-is. Returning `Ok(Some(v))` replaces the
/// node with `v`, which may have any shape.
///
/// Implemented for any `Fn(&Value) -> Result<Option<Value>, TransformError>`.
pub trait Transform {
    /// Apply the transform to a single node.
    fn transform(&self, node: &Value) -> Result<Option<Value>, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&Value) -> Result<Option<Value>, TransformError>,
{
    fn transform(&self, node: &Value) -> Result<Option<Value>, TransformError> {
        self(node)
    }
}

/// Apply `transform` at the location `trail` addresses inside `root`.
///
/// Returns `Cow::Borrowed(root)` whenever nothing changed: the trail points
/// at a missing location, or the transform reported no change. Otherwise
/// returns a freshly built root in which only the ancestors on the trail are
/// new; an empty trail applies the transform to `root` directly.
///
/// Traversal stops short (a deliberate no-op, not an error) when a trail
/// key cannot be resolved. Resolution is existence-based: a present key
/// resolves no matter its value (`0`, `""`, `false`, `null`, and empty
/// containers all count as present), and fails only for a missing map key,
/// an out-of-range index, or any access into a non-container.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Value};
/// use std::borrow::Cow;
/// use waymark_transform::{transform_at, Trail, TransformError};
///
/// let doc = json!({"user": {"name": "alice", "age": 30}});
/// let upper = |node: &Value| -> Result<Option<Value>, TransformError> {
///     Ok(node.as_str().map(|s| Value::from(s.to_uppercase())))
/// };
///
/// let out = transform_at(&doc, &upper, &Trail::parse("user.name")).unwrap();
/// assert_eq!(*out, json!({"user": {"name": "ALICE", "age": 30}}));
///
/// // A missing path is a no-op: the original comes back borrowed.
/// let out = transform_at(&doc, &upper, &Trail::parse("user.email")).unwrap();
/// assert!(matches!(out, Cow::Borrowed(_)));
/// ```
pub fn transform_at<'a, T>(
    root: &'a Value,
    transform: &T,
    trail: &Trail,
) -> Result<Cow<'a, Value>, TransformError>
where
    T: Transform + ?Sized,
{
    walk(root, transform, trail.segments())
}

/// Owned-document convenience over [`transform_at`].
///
/// Hands the document back untouched when nothing changed.
pub fn transform_at_owned<T>(
    root: Value,
    transform: &T,
    trail: &Trail,
) -> Result<Value, TransformError>
where
    T: Transform + ?Sized,
{
    Ok(match transform_at(&root, transform, trail)? {
        Cow::Borrowed(_) => root,
        Cow::Owned(replaced) => replaced,
    })
}

fn walk<'a, T>(
    root: &'a Value,
    transform: &T,
    remaining: &[Seg],
) -> Result<Cow<'a, Value>, TransformError>
where
    T: Transform + ?Sized,
{
    let Some((seg, rest)) = remaining.split_first() else {
        return Ok(match transform.transform(root)? {
            Some(replacement) => Cow::Owned(replacement),
            None => Cow::Borrowed(root),
        });
    };

    let Some(child) = resolve(root, seg) else {
        // Missing path: nothing to do.
        return Ok(Cow::Borrowed(root));
    };

    Ok(match walk(child, transform, rest)? {
        // Nothing below changed, so no copy at this level or above.
        Cow::Borrowed(_) => Cow::Borrowed(root),
        Cow::Owned(new_child) => Cow::Owned(replaced(root, seg, new_child)),
    })
}

/// Resolve one trail segment against a node.
fn resolve<'a>(node: &'a Value, seg: &Seg) -> Option<&'a Value> {
    match (classify(node)?, seg) {
        (Container::Map(entries), Seg::Key(k)) => entries.get(k),
        (Container::Sequence(items), Seg::Index(i)) => items.get(*i),
        _ => None,
    }
}

/// Shallow copy of `node` with `new_child` at `seg`.
///
/// The copy strategy follows the container classification: an ordered
/// sequence copy for sequences, a keyed map copy otherwise. Sibling entries
/// carry over unchanged.
fn replaced(node: &Value, seg: &Seg, new_child: Value) -> Value {
    match (classify(node), seg) {
        (Some(Container::Sequence(items)), Seg::Index(i)) => {
            let mut copy = items.clone();
            if let Some(slot) = copy.get_mut(*i) {
                *slot = new_child;
            }
            Value::Array(copy)
        }
        (Some(Container::Map(entries)), Seg::Key(k)) => {
            let mut copy = entries.clone();
            copy.insert(k.clone(), new_child);
            Value::Object(copy)
        }
        // resolve() only hands out children for matching kinds.
        _ => node.clone(),
    }
}
