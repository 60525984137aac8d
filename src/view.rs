use std::fmt;
use std::str::FromStr;

use crate::error::NotesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    All,
    Archived,
}

impl ViewKind {
    pub fn shows_archived(self) -> bool {
        self == ViewKind::Archived
    }

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::All => "All Notes",
            ViewKind::Archived => "Archived Notes",
        }
    }
}

impl FromStr for ViewKind {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ViewKind::All),
            "archived" | "archive" => Ok(ViewKind::Archived),
            other => Err(NotesError::InvalidArgument(format!(
                "Unknown view '{other}' (expected all|archived)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Updated,
    Created,
    Alphabetical,
    Tags,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::Updated => "updated",
            SortBy::Created => "created",
            SortBy::Alphabetical => "alphabetical",
            SortBy::Tags => "tags",
        };
        f.write_str(name)
    }
}

impl FromStr for SortBy {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "updated" => Ok(SortBy::Updated),
            "created" => Ok(SortBy::Created),
            "alphabetical" | "alpha" | "title" => Ok(SortBy::Alphabetical),
            "tags" | "tag" => Ok(SortBy::Tags),
            other => Err(NotesError::InvalidArgument(format!(
                "Unknown sort '{other}' (expected updated|created|alphabetical|tags)"
            ))),
        }
    }
}

/// Ephemeral selection and filter state.
///
/// Fields are read freely; writes that must keep the selection consistent
/// with the store go through [`crate::AppState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub current_view: ViewKind,
    pub selected_tag: Option<String>,
    pub selected_note_id: Option<String>,
    pub search_query: String,
    pub sort_by: SortBy,
    pub auto_save: bool,
    pub compact_view: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_view: ViewKind::All,
            selected_tag: None,
            selected_note_id: None,
            search_query: String::new(),
            sort_by: SortBy::Updated,
            auto_save: true,
            compact_view: false,
        }
    }
}

impl ViewState {
    /// Heading for the note list: the tag filter wins over the view name.
    pub fn heading(&self) -> String {
        match &self.selected_tag {
            Some(tag) => format!("#{tag}"),
            None => self.current_view.title().to_string(),
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_session() {
        let view = ViewState::default();
        assert_eq!(view.current_view, ViewKind::All);
        assert_eq!(view.sort_by, SortBy::Updated);
        assert!(view.auto_save);
        assert!(!view.compact_view);
        assert!(!view.has_search());
    }

    #[test]
    fn heading_prefers_tag() {
        let mut view = ViewState::default();
        assert_eq!(view.heading(), "All Notes");
        view.current_view = ViewKind::Archived;
        assert_eq!(view.heading(), "Archived Notes");
        view.selected_tag = Some("Dev".into());
        assert_eq!(view.heading(), "#Dev");
    }

    #[test]
    fn parses_sort_and_view_names() {
        assert_eq!("Alphabetical".parse::<SortBy>().unwrap(), SortBy::Alphabetical);
        assert_eq!("tags".parse::<SortBy>().unwrap(), SortBy::Tags);
        assert!("size".parse::<SortBy>().is_err());
        assert_eq!("archived".parse::<ViewKind>().unwrap(), ViewKind::Archived);
        assert!("trash".parse::<ViewKind>().is_err());
    }
}
