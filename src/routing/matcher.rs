//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive, literal)
//! - Split a matched path into the part the backend should see
//!
//! # Design Decisions
//! - Path is compared as received: never decoded or normalized
//! - Prefix is literal, not segment-aware: `/api` also matches `/api2`
//! - No regex to guarantee O(n) matching

/// Matches the request path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` starts with the prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// The part of `path` after the prefix, with a leading `/` guaranteed
    /// when non-empty. Returns `None` if the path does not match.
    pub fn remainder<'a>(&self, path: &'a str) -> Option<std::borrow::Cow<'a, str>> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest.into())
        } else {
            Some(format!("/{}", rest).into())
        }
    }
}
