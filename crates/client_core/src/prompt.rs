use std::fmt;

pub const REMOVE_ALL_PROMPT: &str = "This will delete every tutorial (if any). Continue?";

/// Yes/no question put to the user before destructive operations.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NothingToRemove,
    RemovalFailed(String),
    ReloadFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NothingToRemove => f.write_str("nothing to remove"),
            Notice::RemovalFailed(message) => write!(f, "could not remove tutorials: {message}"),
            Notice::ReloadFailed(message) => {
                write!(f, "tutorials were removed but the list could not be reloaded: {message}")
            }
        }
    }
}

/// Surface for one-off notices that are not tied to a form field.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Confirms every prompt. For non-interactive callers that already asked.
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
