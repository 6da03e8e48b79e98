use shared::{
    domain::{TutorialField, TutorialId},
    protocol::{RawTutorial, TutorialFields},
};
use tracing::{info, warn};

use crate::{
    normalize::normalize,
    types::{Selection, Tutorial},
    TutorialError, TutorialSession, ValidationError,
};

pub const UPDATE_SUCCESS_MESSAGE: &str = "The tutorial was updated successfully!";

/// Route parameters that stand for "no id" rather than a real identifier.
fn is_placeholder_id(id: &str) -> bool {
    let id = id.trim();
    id.is_empty() || id == "null" || id == "undefined"
}

impl TutorialSession {
    /// Makes `record` the active selection. It does not need to be a member
    /// of the current list.
    pub async fn select(&self, record: impl Into<RawTutorial>, index: Option<usize>) -> Tutorial {
        let tutorial = normalize(record.into());
        let mut guard = self.inner.lock().await;
        guard.selection = Some(Selection::new(tutorial.clone(), index));
        tutorial
    }

    /// Selects the list entry at `index`, if there is one.
    pub async fn select_index(&self, index: usize) -> Option<Tutorial> {
        let mut guard = self.inner.lock().await;
        let tutorial = guard.tutorials.get(index)?.clone();
        guard.selection = Some(Selection::new(tutorial.clone(), Some(index)));
        Some(tutorial)
    }

    /// Loads a single tutorial from the service and selects it for editing.
    ///
    /// Placeholder ids are ignored without a remote call.
    pub async fn open_for_edit(&self, id: &str) -> Result<Option<Tutorial>, TutorialError> {
        if is_placeholder_id(id) {
            warn!(id, "tutorials: open_for_edit called with invalid id");
            return Ok(None);
        }

        let raw = self.service.get(&TutorialId::from(id)).await.map_err(|err| {
            warn!(tutorial_id = id, error = %err, "tutorials: fetch failed");
            err
        })?;
        Ok(Some(self.select(raw, None).await))
    }

    /// Changes one field of the local selection copy. Nothing is sent to
    /// the service and the list is not touched.
    pub async fn edit(
        &self,
        field: TutorialField,
        value: impl Into<String>,
    ) -> Result<(), TutorialError> {
        let mut guard = self.inner.lock().await;
        let selection = guard.selection.as_mut().ok_or(TutorialError::NoSelection)?;
        match field {
            TutorialField::Title => selection.tutorial.title = value.into(),
            TutorialField::Description => selection.tutorial.description = value.into(),
        }
        selection.clear_feedback();
        Ok(())
    }

    /// Publishes or unpublishes the selection.
    ///
    /// The local flag flips only once the service has accepted the change.
    pub async fn set_published(&self, published: bool) -> Result<Tutorial, TutorialError> {
        let (id, fields) = {
            let mut guard = self.inner.lock().await;
            let selection = guard.selection.as_mut().ok_or(TutorialError::NoSelection)?;
            if published && !selection.tutorial.has_content() {
                let err = ValidationError::PublishWithoutContent;
                selection.error_message = Some(err.to_string());
                return Err(err.into());
            }
            let Some(id) = selection.tutorial.id.clone() else {
                warn!("tutorials: publish state change attempted without id");
                return Err(TutorialError::MissingIdentifier {
                    operation: "change the publish state of",
                });
            };
            let fields = TutorialFields {
                title: selection.tutorial.title.clone(),
                description: selection.tutorial.description.clone(),
                published,
            };
            (id, fields)
        };

        let result = self.service.update(&id, &fields).await;

        let mut guard = self.inner.lock().await;
        let selection = guard
            .selection
            .as_mut()
            .filter(|selection| selection.tutorial.id.as_ref() == Some(&id));
        match result {
            Ok(_) => {
                info!(tutorial_id = %id, published, "tutorials: publish state updated");
                match selection {
                    Some(selection) => {
                        selection.tutorial.published = published;
                        Ok(selection.tutorial.clone())
                    }
                    None => Ok(Tutorial {
                        id: Some(id),
                        title: fields.title,
                        description: fields.description,
                        published,
                    }),
                }
            }
            Err(err) => {
                warn!(tutorial_id = %id, error = %err, "tutorials: publish state update failed");
                if let Some(selection) = selection {
                    selection.error_message = Some(err.display_message().to_string());
                }
                Err(err.into())
            }
        }
    }

    /// Sends the selection's current title and description to the service.
    ///
    /// The list keeps its previous copy of the record until the next refresh.
    pub async fn save(&self) -> Result<(), TutorialError> {
        let (id, fields) = {
            let mut guard = self.inner.lock().await;
            let selection = guard.selection.as_mut().ok_or(TutorialError::NoSelection)?;
            let Some(id) = selection.tutorial.id.clone() else {
                warn!("tutorials: update attempted without id");
                return Err(TutorialError::MissingIdentifier { operation: "update" });
            };
            let invalid = if selection.tutorial.title.trim().is_empty() {
                Some(ValidationError::EmptyTitle)
            } else if selection.tutorial.description.trim().is_empty() {
                Some(ValidationError::EmptyDescription)
            } else {
                None
            };
            if let Some(err) = invalid {
                selection.error_message = Some(err.to_string());
                return Err(err.into());
            }
            selection.error_message = None;
            let fields = TutorialFields {
                title: selection.tutorial.title.clone(),
                description: selection.tutorial.description.clone(),
                published: selection.tutorial.published,
            };
            (id, fields)
        };

        let result = self.service.update(&id, &fields).await;

        let mut guard = self.inner.lock().await;
        let selection = guard
            .selection
            .as_mut()
            .filter(|selection| selection.tutorial.id.as_ref() == Some(&id));
        match result {
            Ok(_) => {
                info!(tutorial_id = %id, "tutorials: tutorial updated");
                if let Some(selection) = selection {
                    selection.message = Some(UPDATE_SUCCESS_MESSAGE.to_string());
                }
                Ok(())
            }
            Err(err) => {
                warn!(tutorial_id = %id, error = %err, "tutorials: update failed");
                if let Some(selection) = selection {
                    selection.error_message = Some(err.display_message().to_string());
                }
                Err(err.into())
            }
        }
    }

    /// Deletes the selected tutorial remotely, then drops it from the list.
    pub async fn delete(&self) -> Result<Tutorial, TutorialError> {
        let id = {
            let guard = self.inner.lock().await;
            let selection = guard.selection.as_ref().ok_or(TutorialError::NoSelection)?;
            selection.tutorial.id.clone().ok_or_else(|| {
                warn!("tutorials: delete attempted without id");
                TutorialError::MissingIdentifier { operation: "delete" }
            })?
        };

        self.service.remove(&id).await.map_err(|err| {
            warn!(tutorial_id = %id, error = %err, "tutorials: delete failed");
            err
        })?;

        let mut guard = self.inner.lock().await;
        let is_selected = guard
            .selection
            .as_ref()
            .is_some_and(|selection| selection.tutorial.id.as_ref() == Some(&id));
        let selected = if is_selected {
            guard.selection.take().map(|selection| selection.tutorial)
        } else {
            None
        };
        let position = guard
            .tutorials
            .iter()
            .position(|tutorial| tutorial.id.as_ref() == Some(&id));
        let removed = match (position, selected) {
            (Some(position), _) => guard.tutorials.remove(position),
            (None, Some(selected)) => selected,
            (None, None) => Tutorial {
                id: Some(id.clone()),
                ..Tutorial::default()
            },
        };
        info!(tutorial_id = %id, "tutorials: tutorial deleted");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
