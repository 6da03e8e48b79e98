use tracing::{info, warn};

use crate::{
    normalize::normalize_list,
    types::{SearchNotice, SyncOutcome},
    TutorialError, TutorialSession,
};

impl TutorialSession {
    /// Replaces the list with the full remote collection.
    pub async fn refresh(&self) -> Result<SyncOutcome, TutorialError> {
        let sequence = self.inner.lock().await.issue_sequence();

        let raw = self.service.list_all().await.map_err(|err| {
            warn!(sequence, error = %err, "tutorials: refresh failed");
            err
        })?;
        let normalized = normalize_list(raw);

        let mut guard = self.inner.lock().await;
        if guard.latest_sequence != sequence {
            warn!(
                sequence,
                latest = guard.latest_sequence,
                "tutorials: stale refresh response discarded"
            );
            return Ok(SyncOutcome::Superseded);
        }

        let count = normalized.tutorials.len();
        guard.tutorials = normalized.tutorials;
        guard.unidentified = normalized.unidentified;
        guard.selection = None;
        guard.search_error = None;
        info!(sequence, count, "tutorials: list refreshed");

        Ok(SyncOutcome::Applied {
            count,
            notice: None,
        })
    }

    /// Replaces the list with the tutorials whose title contains `query`.
    ///
    /// A blank query is rejected locally. An empty result is reported as
    /// [`SearchNotice::NoTutorialsYet`] when the list was already empty when
    /// the search was issued, and as [`SearchNotice::NoMatch`] otherwise.
    pub async fn search(&self, query: &str) -> Result<SyncOutcome, TutorialError> {
        let (sequence, had_records) = {
            let mut guard = self.inner.lock().await;
            guard.search_query = query.to_string();
            if query.trim().is_empty() {
                guard.search_error = Some(SearchNotice::EmptyQuery);
                return Err(TutorialError::EmptyQuery);
            }
            (guard.issue_sequence(), !guard.tutorials.is_empty())
        };

        let raw = self.service.search_by_title(query).await.map_err(|err| {
            warn!(sequence, query, error = %err, "tutorials: search failed");
            err
        })?;
        let normalized = normalize_list(raw);

        let mut guard = self.inner.lock().await;
        if guard.latest_sequence != sequence {
            warn!(
                sequence,
                latest = guard.latest_sequence,
                query,
                "tutorials: stale search response discarded"
            );
            return Ok(SyncOutcome::Superseded);
        }

        let count = normalized.tutorials.len();
        let notice = match (count, had_records) {
            (0, false) => Some(SearchNotice::NoTutorialsYet),
            (0, true) => Some(SearchNotice::NoMatch(query.to_string())),
            _ => None,
        };
        guard.tutorials = normalized.tutorials;
        guard.unidentified = normalized.unidentified;
        guard.selection = None;
        guard.search_error = notice.clone();
        info!(sequence, count, query, "tutorials: search applied");

        Ok(SyncOutcome::Applied { count, notice })
    }

    /// Drops the search text and any search notice, then reloads everything.
    pub async fn clear_search(&self) -> Result<SyncOutcome, TutorialError> {
        {
            let mut guard = self.inner.lock().await;
            guard.search_query.clear();
            guard.search_error = None;
        }
        self.refresh().await
    }

    /// Records the search text as the user types; any stale notice goes away.
    pub async fn set_search_query(&self, query: impl Into<String>) {
        let mut guard = self.inner.lock().await;
        guard.search_query = query.into();
        guard.search_error = None;
    }
}

#[cfg(test)]
#[path = "tests/list_sync_tests.rs"]
mod tests;
