//! # Identifier Types
//!
//! String-backed identifiers for engine entities.
//!
//! Comparable ids come from the upstream MLS feed and are treated as opaque
//! strings. [`CompId`] orders lexicographically, which is what the Hi-Lo
//! engine relies on for its deterministic ranking tie-break.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a candidate comparable.
///
/// # Examples
///
/// ```
/// use comp_select::domain::value_objects::ids::CompId;
///
/// let a = CompId::new("mls-100");
/// let b = CompId::new("mls-200");
/// assert!(a < b);
/// assert_eq!(a.as_str(), "mls-100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompId(String);

impl CompId {
    /// Creates a new comparable id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CompId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CompId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
