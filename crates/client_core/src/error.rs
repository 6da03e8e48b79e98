use shared::error::ServiceError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Cannot publish until title and description are provided")]
    PublishWithoutContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TutorialError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The caller targeted a record that has no identifier. This is a
    /// programming error on the caller's side, not bad user input.
    #[error("cannot {operation} a tutorial without an id")]
    MissingIdentifier { operation: &'static str },
    #[error("no tutorial is selected")]
    NoSelection,
    #[error("empty query")]
    EmptyQuery,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl TutorialError {
    pub fn is_caller_bug(&self) -> bool {
        matches!(
            self,
            TutorialError::MissingIdentifier { .. } | TutorialError::NoSelection
        )
    }
}
