//! Configuration errors for the action transform middleware.

use thiserror::Error;

/// A single problem found while validating middleware configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// The target path contains an empty dot-segment (a leading, trailing,
    /// or doubled dot).
    #[error("target path has an empty segment")]
    EmptyTargetSegment,

    /// A dot-segment's leading identifier is not a valid variable-like name
    /// (letters, digits, underscore, not starting with a digit).
    #[error("target segment {segment:?} is not a valid identifier")]
    InvalidTargetSegment {
        /// The offending dot-segment, as written.
        segment: String,
    },
}

/// Validation failure raised at configuration time.
///
/// Carries every problem found, not just the first; a failed build returns
/// no partially-usable middleware.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to build action transform middleware: {}", format_issues(.issues))]
pub struct ConfigError {
    issues: Vec<ConfigIssue>,
}

impl ConfigError {
    pub(crate) fn new(issues: Vec<ConfigIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// All problems found during validation.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_issue() {
        let err = ConfigError::new(vec![
            ConfigIssue::EmptyTargetSegment,
            ConfigIssue::InvalidTargetSegment {
                segment: "1bad".to_owned(),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("empty segment"));
        assert!(text.contains("\"1bad\""));
    }
}
