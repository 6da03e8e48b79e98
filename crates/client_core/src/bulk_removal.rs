use tracing::{info, warn};

use crate::{
    prompt::{Notice, REMOVE_ALL_PROMPT},
    types::RemoveAllOutcome,
    TutorialError, TutorialSession,
};

impl TutorialSession {
    /// Deletes every tutorial after the user confirms.
    ///
    /// The prompt is shown even when the list is empty; an empty list then
    /// yields a "nothing to remove" notice instead of a remote call. After a
    /// successful removal the list is reloaded once. A failed reload does
    /// not undo the removal: the outcome is still `Removed` and the reload
    /// error goes to the notice sink.
    pub async fn remove_all_requested(&self) -> Result<RemoveAllOutcome, TutorialError> {
        if !self.confirmation.confirm(REMOVE_ALL_PROMPT) {
            info!("tutorials: remove all cancelled");
            return Ok(RemoveAllOutcome::Cancelled);
        }

        let listed = self.inner.lock().await.tutorials.len();
        if listed == 0 {
            self.notices.notify(&Notice::NothingToRemove);
            return Ok(RemoveAllOutcome::NothingToRemove);
        }

        if let Err(err) = self.service.remove_all().await {
            warn!(error = %err, "tutorials: remove all failed");
            self.notices
                .notify(&Notice::RemovalFailed(err.display_message().to_string()));
            return Err(err.into());
        }
        info!(listed, "tutorials: all tutorials removed");

        self.inner.lock().await.selection = None;
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "tutorials: reload after remove all failed");
            self.notices.notify(&Notice::ReloadFailed(err.to_string()));
        }
        Ok(RemoveAllOutcome::Removed)
    }
}

#[cfg(test)]
#[path = "tests/bulk_removal_tests.rs"]
mod tests;
