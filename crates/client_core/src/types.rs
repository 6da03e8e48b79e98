use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{domain::TutorialId, protocol::RawTutorial};

/// A tutorial after identifier resolution.
///
/// `id` is `None` only for records the service returned without any usable
/// identifier, or for a selection built from such a record. Identifier-keyed
/// operations refuse to act on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: Option<TutorialId>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

impl Tutorial {
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Case-insensitive title match used to highlight rows for the current
    /// search text. A blank query matches nothing.
    pub fn title_matches(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

impl From<Tutorial> for RawTutorial {
    fn from(value: Tutorial) -> Self {
        RawTutorial {
            id: value.id.map(|id| Value::String(id.0)),
            legacy_id: None,
            title: value.title,
            description: value.description,
            published: value.published,
        }
    }
}

/// The record currently being inspected or edited, plus the feedback shown
/// next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: Option<usize>,
    pub tutorial: Tutorial,
    pub message: Option<String>,
    pub error_message: Option<String>,
}

impl Selection {
    pub(crate) fn new(tutorial: Tutorial, index: Option<usize>) -> Self {
        Self {
            index,
            tutorial,
            message: None,
            error_message: None,
        }
    }

    pub(crate) fn clear_feedback(&mut self) {
        self.message = None;
        self.error_message = None;
    }
}

/// Informational search states. None of these are failures of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchNotice {
    EmptyQuery,
    NoTutorialsYet,
    NoMatch(String),
}

impl fmt::Display for SearchNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchNotice::EmptyQuery => f.write_str("empty query"),
            SearchNotice::NoTutorialsYet => f.write_str("no tutorials exist yet"),
            SearchNotice::NoMatch(query) => write!(f, "no match for \"{query}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied {
        count: usize,
        notice: Option<SearchNotice>,
    },
    /// A newer refresh or search was issued while this one was in flight;
    /// its response was dropped.
    Superseded,
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveAllOutcome {
    Cancelled,
    NothingToRemove,
    Removed,
}

/// Read-only copy of the session state handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSnapshot {
    pub tutorials: Vec<Tutorial>,
    pub selection: Option<Selection>,
    pub search_query: String,
    pub search_error: Option<SearchNotice>,
    pub unidentified: usize,
}

impl ListSnapshot {
    pub fn matching_indices(&self) -> Vec<usize> {
        self.tutorials
            .iter()
            .enumerate()
            .filter(|(_, tutorial)| tutorial.title_matches(&self.search_query))
            .map(|(index, _)| index)
            .collect()
    }
}
