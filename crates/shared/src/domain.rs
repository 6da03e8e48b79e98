use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical tutorial identifier as assigned by the remote service.
///
/// Backends hand out either integers or opaque strings; both are carried as
/// their textual form so every internal component works with one type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TutorialId(pub String);

impl TutorialId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TutorialId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for TutorialId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialField {
    Title,
    Description,
}
