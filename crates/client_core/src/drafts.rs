use shared::protocol::TutorialDraft;
use tracing::{info, warn};

use crate::{normalize::normalize, types::Tutorial, TutorialError, TutorialSession, ValidationError};

fn validate_draft(draft: &TutorialDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if draft.description.trim().is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    Ok(())
}

impl TutorialSession {
    /// Creates a tutorial from `draft` and appends the service's copy to the
    /// list.
    pub async fn create(&self, draft: TutorialDraft) -> Result<Tutorial, TutorialError> {
        validate_draft(&draft)?;

        let raw = self.service.create(&draft).await.map_err(|err| {
            warn!(title = %draft.title, error = %err, "tutorials: create failed");
            err
        })?;
        let created = normalize(raw);

        let Some(id) = created.id.clone() else {
            warn!(title = %created.title, "tutorials: created record came back without id");
            return Err(TutorialError::MissingIdentifier {
                operation: "list",
            });
        };

        let mut guard = self.inner.lock().await;
        if guard
            .tutorials
            .iter()
            .any(|tutorial| tutorial.id.as_ref() == Some(&id))
        {
            warn!(tutorial_id = %id, "tutorials: created id already listed");
        } else {
            guard.tutorials.push(created.clone());
        }
        info!(tutorial_id = %id, "tutorials: tutorial created");
        Ok(created)
    }
}

#[cfg(test)]
#[path = "tests/drafts_tests.rs"]
mod tests;
