//! Selective action-transform middleware.
//!
//! `waymark-middleware` wraps the deep transform from `waymark-transform`
//! behind an allow/exclude filter keyed on an action's discriminant field
//! (its `type`, by default). Actions that pass the filter have the subtree
//! at a configured target path replaced by the transform's output; every
//! other action is forwarded untouched.
//!
//! Configuration is validated up front: all problems are reported together
//! in one [`ConfigError`] and no partially-usable middleware is returned.
//!
//! # Quick Start
//!
//! ```
//! use serde_json::{json, Value};
//! use waymark_middleware::{ActionTransform, TransformError};
//!
//! let upper = |node: &Value| -> Result<Option<Value>, TransformError> {
//!     Ok(node.as_str().map(|s| Value::from(s.to_uppercase())))
//! };
//!
//! let middleware = ActionTransform::builder("payload.message", upper)
//!     .allow(["NOTIFY"])
//!     .build()
//!     .unwrap();
//!
//! let action = json!({"type": "NOTIFY", "payload": {"message": "hi"}});
//! let out = middleware.process(&action).unwrap();
//! assert_eq!(*out, json!({"type": "NOTIFY", "payload": {"message": "HI"}}));
//!
//! // Actions outside the allow-list pass through unchanged.
//! let other = json!({"type": "OTHER", "payload": {"message": "hi"}});
//! let out = middleware.process(&other).unwrap();
//! assert_eq!(*out, other);
//! ```

mod diag;
mod error;

pub use diag::{DiagnosticSink, MemorySink, TracingSink};
pub use error::{ConfigError, ConfigIssue};
pub use waymark_transform::{Trail, Transform, TransformError};

use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use waymark_transform::transform_at;

/// Default discriminant field of an action record.
pub const DEFAULT_DISCRIMINANT_FIELD: &str = "type";

/// A configured action-transform middleware.
///
/// Build one with [`ActionTransform::builder`]; construction fails fast on
/// an invalid target path. Processing is synchronous and never mutates the
/// incoming action.
pub struct ActionTransform {
    trail: Trail,
    transform: Box<dyn Transform + Send + Sync>,
    allowed: Option<HashSet<String>>,
    excluded: Option<HashSet<String>>,
    discriminant_field: String,
}

impl std::fmt::Debug for ActionTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionTransform")
            .field("trail", &self.trail)
            .field("transform", &"<dyn Transform>")
            .field("allowed", &self.allowed)
            .field("excluded", &self.excluded)
            .field("discriminant_field", &self.discriminant_field)
            .finish()
    }
}

impl ActionTransform {
    /// Start building a middleware that applies `transform` at `target`.
    pub fn builder(
        target: impl Into<String>,
        transform: impl Transform + Send + Sync + 'static,
    ) -> ActionTransformBuilder {
        ActionTransformBuilder {
            target: target.into(),
            transform: Box::new(transform),
            allowed: None,
            excluded: None,
            discriminant_field: DEFAULT_DISCRIMINANT_FIELD.to_owned(),
            diagnostics: None,
        }
    }

    /// The parsed target trail.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Process one action.
    ///
    /// Returns the action borrowed when the filter skips it or the target
    /// path is missing from it, and a freshly built action when the
    /// transform replaced the targeted subtree. Transform failures propagate
    /// unmodified.
    pub fn process<'a>(&self, action: &'a Value) -> Result<Cow<'a, Value>, TransformError> {
        if !self.should_transform(action) {
            return Ok(Cow::Borrowed(action));
        }
        transform_at(action, self.transform.as_ref(), &self.trail)
    }

    /// Owned convenience over [`process`](Self::process) for dispatch
    /// pipelines that hand actions forward by value.
    pub fn process_owned(&self, action: Value) -> Result<Value, TransformError> {
        Ok(match self.process(&action)? {
            Cow::Borrowed(_) => action,
            Cow::Owned(replaced) => replaced,
        })
    }

    /// Apply the allow/exclude filter to an action's discriminant.
    ///
    /// A missing or non-string discriminant is not a member of any set.
    /// Exclusion takes precedence over allowance.
    fn should_transform(&self, action: &Value) -> bool {
        let discriminant = action
            .get(&self.discriminant_field)
            .and_then(Value::as_str);
        if let Some(allowed) = &self.allowed {
            match discriminant {
                Some(d) if allowed.contains(d) => {}
                _ => return false,
            }
        }
        if let (Some(excluded), Some(d)) = (&self.excluded, discriminant) {
            if excluded.contains(d) {
                return false;
            }
        }
        true
    }
}

/// Builder for [`ActionTransform`].
pub struct ActionTransformBuilder {
    target: String,
    transform: Box<dyn Transform + Send + Sync>,
    allowed: Option<Vec<String>>,
    excluded: Option<Vec<String>>,
    discriminant_field: String,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl ActionTransformBuilder {
    /// Only transform actions whose discriminant is in `actions`.
    pub fn allow<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Never transform actions whose discriminant is in `actions`.
    ///
    /// Exclusion wins over allowance; a discriminant present in both sets
    /// draws a warning through the diagnostic sink at build time.
    pub fn exclude<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Use `field` instead of `"type"` as the discriminant field.
    pub fn discriminant_field(mut self, field: impl Into<String>) -> Self {
        self.discriminant_field = field.into();
        self
    }

    /// Route diagnostics to `sink` instead of the default tracing-backed
    /// sink.
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Validate the configuration and build the middleware.
    ///
    /// Fails with every problem found, not just the first.
    pub fn build(self) -> Result<ActionTransform, ConfigError> {
        let issues = validate_target(&self.target);
        if !issues.is_empty() {
            return Err(ConfigError::new(issues));
        }

        let allowed: Option<HashSet<String>> =
            self.allowed.map(|actions| actions.into_iter().collect());
        let excluded: Option<HashSet<String>> =
            self.excluded.map(|actions| actions.into_iter().collect());

        if let (Some(allowed), Some(excluded)) = (&allowed, &excluded) {
            let sink = self
                .diagnostics
                .unwrap_or_else(|| Arc::new(TracingSink));
            let mut conflicted: Vec<&String> = allowed.intersection(excluded).collect();
            conflicted.sort();
            for discriminant in conflicted {
                sink.warn(&format!(
                    "action type {discriminant:?} is both allowed and excluded; \
                     exclusion takes precedence"
                ));
            }
        }

        Ok(ActionTransform {
            trail: Trail::parse(&self.target),
            transform: self.transform,
            allowed,
            excluded,
            discriminant_field: self.discriminant_field,
        })
    }
}

/// Validate a target path expression.
///
/// Each dot-segment must be non-empty and its leading identifier (the part
/// before any bracket) must be a variable-like name.
fn validate_target(target: &str) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    for segment in target.split('.') {
        if segment.is_empty() {
            issues.push(ConfigIssue::EmptyTargetSegment);
            continue;
        }
        let head = &segment[..segment.find('[').unwrap_or(segment.len())];
        if !is_identifier(head) {
            issues.push(ConfigIssue::InvalidTargetSegment {
                segment: segment.to_owned(),
            });
        }
    }
    issues
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
