//! Client-side core for a remotely stored tutorial collection: list
//! synchronization, search, selection editing and bulk removal on top of an
//! abstract [`TutorialService`].

use std::sync::Arc;

use tokio::sync::Mutex;

mod bulk_removal;
mod drafts;
pub mod error;
mod list_sync;
pub mod normalize;
pub mod prompt;
mod selection;
pub mod service;
pub mod transport;
pub mod types;

pub use error::{TutorialError, ValidationError};
pub use normalize::normalize;
pub use prompt::{AlwaysConfirm, Confirmation, Notice, NoticeSink, REMOVE_ALL_PROMPT};
pub use selection::UPDATE_SUCCESS_MESSAGE;
pub use service::TutorialService;
pub use transport::HttpTutorialService;
pub use types::{
    ListSnapshot, RemoveAllOutcome, SearchNotice, Selection, SyncOutcome, Tutorial,
};

#[derive(Default)]
struct SessionState {
    tutorials: Vec<Tutorial>,
    selection: Option<Selection>,
    search_query: String,
    search_error: Option<SearchNotice>,
    /// Sequence number of the most recently issued refresh or search.
    latest_sequence: u64,
    unidentified: usize,
}

impl SessionState {
    fn issue_sequence(&mut self) -> u64 {
        self.latest_sequence += 1;
        self.latest_sequence
    }
}

/// State owned by one tutorials view, from mount until it is dropped.
///
/// Every remote call is awaited without holding the state lock, so several
/// operations may be in flight at once; refreshes and searches resolve with
/// "latest issued wins".
pub struct TutorialSession {
    service: Arc<dyn TutorialService>,
    confirmation: Arc<dyn Confirmation>,
    notices: Arc<dyn NoticeSink>,
    inner: Mutex<SessionState>,
}

impl TutorialSession {
    pub fn new(
        service: Arc<dyn TutorialService>,
        confirmation: Arc<dyn Confirmation>,
        notices: Arc<dyn NoticeSink>,
    ) -> Self {
        Self {
            service,
            confirmation,
            notices,
            inner: Mutex::new(SessionState::default()),
        }
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let guard = self.inner.lock().await;
        ListSnapshot {
            tutorials: guard.tutorials.clone(),
            selection: guard.selection.clone(),
            search_query: guard.search_query.clone(),
            search_error: guard.search_error.clone(),
            unidentified: guard.unidentified,
        }
    }

    pub async fn tutorials(&self) -> Vec<Tutorial> {
        self.inner.lock().await.tutorials.clone()
    }

    pub async fn selection(&self) -> Option<Selection> {
        self.inner.lock().await.selection.clone()
    }

    pub async fn search_error(&self) -> Option<SearchNotice> {
        self.inner.lock().await.search_error.clone()
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
