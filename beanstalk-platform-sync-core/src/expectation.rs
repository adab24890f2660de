//! Expected-stack matching: exact names or operator-supplied patterns.

use regex::Regex;

use crate::error::{SyncError, SyncResult};

/// What the operator expects the environment's solution stack to be.
///
/// A `Literal` compares byte-for-byte against the running stack name. A
/// `Pattern` matches anywhere in the name (search, not full match), so
/// `"Node\.js 18"` matches `"64bit Amazon Linux 2 v5.8.0 running Node.js 18"`.
#[derive(Debug, Clone)]
pub enum StackExpectation {
    Literal(String),
    Pattern(Regex),
}

impl StackExpectation {
    /// Builds an expectation from the raw expected-stack input.
    ///
    /// With `match_regex` the pattern is compiled here, before any AWS call,
    /// so invalid syntax fails the run without touching the environment.
    pub fn parse(expected: &str, match_regex: bool) -> SyncResult<Self> {
        if expected.is_empty() {
            return Err(SyncError::InvalidConfiguration(
                "expected solution stack must not be empty".to_string(),
            ));
        }
        if match_regex {
            let pattern = Regex::new(expected).map_err(|source| SyncError::InvalidPattern {
                pattern: expected.to_string(),
                source,
            })?;
            Ok(Self::Pattern(pattern))
        } else {
            Ok(Self::Literal(expected.to_string()))
        }
    }

    /// Whether the running stack already satisfies this expectation.
    pub fn is_satisfied_by(&self, actual: &str) -> bool {
        match self {
            Self::Literal(expected) => expected == actual,
            Self::Pattern(pattern) => pattern.is_match(actual),
        }
    }

    /// The raw text the expectation was built from.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(expected) => expected,
            Self::Pattern(pattern) => pattern.as_str(),
        }
    }
}
