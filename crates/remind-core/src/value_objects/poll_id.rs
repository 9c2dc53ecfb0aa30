//! Poll ID - short opaque poll identifier

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque poll identifier (`poll_` followed by 8 hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(String);

impl PollId {
    /// Generate a fresh poll id
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(format!("poll_{}", &uuid[..8]))
    }

    /// Wrap an existing id (from storage or user input)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PollId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PollId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
