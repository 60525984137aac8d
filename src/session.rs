use chrono::{DateTime, Utc};

use crate::content;
use crate::error::ValidationErrors;
use crate::note::Note;
use crate::tags;

/// In-progress values for a note being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Tags as typed: a single comma-separated string.
    pub tags_input: String,
    pub started_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self { started_at: Some(now), ..Default::default() }
    }

    pub fn from_note(note: &Note, now: DateTime<Utc>) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags_input: note.tags.join(", "),
            started_at: Some(now),
        }
    }

    pub fn tags(&self) -> Vec<String> {
        tags::parse_tag_input(&self.tags_input)
    }

    pub fn validate(&self) -> ValidationErrors {
        ValidationErrors::check(&self.title, &self.content)
    }

    /// Convert the draft content between plain text and markup.
    pub fn toggle_format(&mut self) {
        self.content = content::toggle(&self.content);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    Creating,
    Editing { note_id: String },
}

/// Draft-and-validate state machine for creating or editing one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditingSession {
    mode: SessionMode,
    draft: Draft,
    errors: ValidationErrors,
}

impl EditingSession {
    pub fn creating(now: DateTime<Utc>) -> Self {
        Self {
            mode: SessionMode::Creating,
            draft: Draft::blank(now),
            errors: ValidationErrors::default(),
        }
    }

    pub fn editing(note: &Note, now: DateTime<Utc>) -> Self {
        Self {
            mode: SessionMode::Editing { note_id: note.id.clone() },
            draft: Draft::from_note(note, now),
            errors: ValidationErrors::default(),
        }
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn is_idle(&self) -> bool {
        self.mode == SessionMode::Idle
    }

    pub fn is_creating(&self) -> bool {
        self.mode == SessionMode::Creating
    }

    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            SessionMode::Editing { note_id } => Some(note_id),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        (!self.is_idle()).then_some(&self.draft)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_title(&mut self, value: String) {
        if !value.trim().is_empty() {
            self.errors.title = None;
        }
        self.draft.title = value;
    }

    pub fn set_content(&mut self, value: String) {
        if !value.trim().is_empty() {
            self.errors.content = None;
        }
        self.draft.content = value;
    }

    pub fn set_tags_input(&mut self, value: String) {
        self.draft.tags_input = value;
    }

    pub fn toggle_format(&mut self) {
        self.draft.toggle_format();
    }

    /// Validate the draft; on failure the errors are kept on the session
    /// and the session stays where it is.
    pub(crate) fn validate(&mut self) -> Result<(), ValidationErrors> {
        let errors = self.draft.validate();
        if errors.is_empty() {
            self.errors = ValidationErrors::default();
            Ok(())
        } else {
            self.errors = errors.clone();
            Err(errors)
        }
    }

    /// End the session, handing back what it was doing and the draft.
    pub(crate) fn finish(&mut self) -> (SessionMode, Draft) {
        let ended = std::mem::take(self);
        (ended.mode, ended.draft)
    }
}
