use std::fmt;

use thiserror::Error;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const CONTENT_REQUIRED: &str = "Content is required";

/// Field-level problems found when saving a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<&'static str>,
    pub content: Option<&'static str>,
}

impl ValidationErrors {
    pub fn check(title: &str, content: &str) -> Self {
        Self {
            title: title.trim().is_empty().then_some(TITLE_REQUIRED),
            content: content.trim().is_empty().then_some(CONTENT_REQUIRED),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [("title", self.title), ("content", self.content)]
            .into_iter()
            .filter_map(|(field, msg)| msg.map(|m| format!("{field}: {m}")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("Note {0} not found")]
    NoteNotFound(String),

    #[error("No note selected")]
    NothingSelected,

    #[error("No note is being created or edited")]
    NoActiveSession,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Invalid file format. Expected a JSON array of notes")]
    ImportFormat,

    #[error("Error importing notes: {0}")]
    ImportParse(#[source] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NotesError>;
