use tracing::{debug, warn};

use crate::error::{NotesError, Result};
use crate::note::{self, Note, NotePatch};
use crate::query;
use crate::seed;
use crate::session::{EditingSession, SessionMode};
use crate::store::NoteStore;
use crate::theme::{Theme, ThemePatch};
use crate::view::{SortBy, ViewKind, ViewState};

/// The whole application state: notes, view selection, theme and the
/// editing session.
///
/// Every method applies completely or returns an error before changing
/// anything, and afterwards `selected_note_id` is either `None` or the id
/// of a note in the store.
#[derive(Debug, Default)]
pub struct AppState {
    store: NoteStore,
    view: ViewState,
    theme: Theme,
    session: EditingSession,
}

impl AppState {
    /// Start from `notes` with the first one selected.
    pub fn new(notes: Vec<Note>) -> Self {
        let mut state = Self::default();
        state.view.selected_note_id = notes.first().map(|n| n.id.clone());
        state.store = NoteStore::new(notes);
        state
    }

    pub fn with_seed() -> Self {
        Self::new(seed::default_notes())
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        query::visible_notes(&self.store, &self.view)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.view
            .selected_note_id
            .as_deref()
            .and_then(|id| self.store.get(id))
    }

    // ---- note store ----

    pub fn create(
        &mut self,
        title: String,
        content: String,
        tags: Vec<String>,
    ) -> &Note {
        let id = self.store.create(title, content, tags, note::now()).id.clone();
        self.view.selected_note_id = Some(id);
        self.session = EditingSession::default();
        &self.store.notes()[0]
    }

    /// Merge `patch` into a note. An edit in progress on that note ends.
    pub fn update(&mut self, id: &str, patch: NotePatch) -> Result<&Note> {
        let ends_edit = self.session.editing_id() == Some(id);
        let updated = self.store.update(id, patch, note::now())?;
        if ends_edit {
            debug!(%id, "note updated, ending its edit");
            self.session = EditingSession::default();
        }
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.store.delete(id)?;
        if self.view.selected_note_id.as_deref() == Some(id) {
            self.view.selected_note_id =
                self.store.first_id().map(str::to_string);
        }
        if self.session.editing_id() == Some(id) {
            debug!(%id, "discarding edit of deleted note");
            self.session = EditingSession::default();
        }
        Ok(())
    }

    pub fn archive(&mut self, id: &str) -> Result<&Note> {
        self.store.set_archived(id, true, note::now())
    }

    pub fn unarchive(&mut self, id: &str) -> Result<&Note> {
        self.store.set_archived(id, false, note::now())
    }

    pub fn toggle_archive(&mut self, id: &str) -> Result<&Note> {
        let archived = self
            .store
            .get(id)
            .map(|n| n.is_archived)
            .ok_or_else(|| NotesError::NoteNotFound(id.to_string()))?;
        self.store.set_archived(id, !archived, note::now())
    }

    /// Replace every note, as a backup restore does.
    pub fn import_all(&mut self, notes: Vec<Note>) {
        self.view.selected_note_id = notes.first().map(|n| n.id.clone());
        self.store.replace_all(notes);
        self.session = EditingSession::default();
    }

    /// Drop every note and all state that refers to notes.
    pub fn clear(&mut self) {
        self.store.clear();
        self.view.selected_note_id = None;
        self.view.search_query.clear();
        self.view.selected_tag = None;
        self.session = EditingSession::default();
    }

    // ---- view state ----

    pub fn set_view(&mut self, view: ViewKind) {
        debug!(?view, "switching view");
        self.view.current_view = view;
        self.view.selected_tag = None;
        self.view.selected_note_id =
            self.visible_notes().first().map(|n| n.id.clone());
    }

    pub fn set_selected_tag(&mut self, tag: Option<String>) {
        self.view.selected_tag = tag;
    }

    /// Sidebar behavior: picking the active tag clears it, picking another
    /// tag filters by it and returns to the "all" view.
    pub fn choose_tag(&mut self, tag: &str) {
        if self.view.selected_tag.as_deref() == Some(tag) {
            self.view.selected_tag = None;
        } else {
            self.view.selected_tag = Some(tag.to_string());
            self.view.current_view = ViewKind::All;
        }
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.view.search_query = query.into();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.view.sort_by = sort_by;
    }

    /// Select a note (or nothing). Selecting always ends the editing
    /// session; unknown ids are rejected without changing anything.
    pub fn set_selected_note_id(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if !self.store.contains(id) {
                return Err(NotesError::NoteNotFound(id.to_string()));
            }
        }
        self.view.selected_note_id = id.map(str::to_string);
        self.session = EditingSession::default();
        Ok(())
    }

    pub fn select_next(&mut self) -> Option<&Note> {
        self.step_selection(1)
    }

    pub fn select_previous(&mut self) -> Option<&Note> {
        self.step_selection(-1)
    }

    fn step_selection(&mut self, delta: isize) -> Option<&Note> {
        let target = {
            let visible = self.visible_notes();
            let current = self.view.selected_note_id.as_deref()?;
            let idx = visible.iter().position(|n| n.id == current)?;
            let next = idx.checked_add_signed(delta)?;
            visible.get(next).map(|n| n.id.clone())?
        };
        self.view.selected_note_id = Some(target);
        self.session = EditingSession::default();
        self.selected_note()
    }

    pub fn set_auto_save(&mut self, on: bool) {
        self.view.auto_save = on;
    }

    pub fn set_compact_view(&mut self, on: bool) {
        self.view.compact_view = on;
    }

    pub fn set_theme(&mut self, patch: ThemePatch) {
        self.theme.merge(patch);
    }

    pub fn toggle_theme_mode(&mut self) {
        self.theme.toggle_mode();
    }

    // ---- editing session ----

    pub fn start_creating(&mut self) {
        debug!("starting new note");
        self.session = EditingSession::creating(note::now());
        self.view.selected_note_id = None;
    }

    pub fn start_editing(&mut self) -> Result<()> {
        let selected =
            self.selected_note().ok_or(NotesError::NothingSelected)?;
        debug!(id = %selected.id, "editing note");
        let session = EditingSession::editing(selected, note::now());
        self.session = session;
        Ok(())
    }

    /// The active session, for draft edits.
    pub fn editor(&mut self) -> Result<&mut EditingSession> {
        if self.session.is_idle() {
            return Err(NotesError::NoActiveSession);
        }
        Ok(&mut self.session)
    }

    /// Validate and commit the draft. Returns the id of the saved note.
    pub fn save(&mut self) -> Result<String> {
        if self.session.is_idle() {
            return Err(NotesError::NoActiveSession);
        }
        if let Err(errors) = self.session.validate() {
            warn!(%errors, "draft rejected");
            return Err(NotesError::Validation(errors));
        }
        if let Some(id) = self.session.editing_id() {
            if !self.store.contains(id) {
                return Err(NotesError::NoteNotFound(id.to_string()));
            }
        }

        let (mode, draft) = self.session.finish();
        let tags = draft.tags();
        match mode {
            SessionMode::Creating => {
                Ok(self.create(draft.title, draft.content, tags).id.clone())
            }
            SessionMode::Editing { note_id } => {
                let patch = NotePatch {
                    title: Some(draft.title),
                    content: Some(draft.content),
                    tags: Some(tags),
                };
                self.update(&note_id, patch)?;
                Ok(note_id)
            }
            SessionMode::Idle => Err(NotesError::NoActiveSession),
        }
    }

    /// Drop the draft without validation.
    pub fn cancel(&mut self) {
        if !self.session.is_idle() {
            debug!("editing canceled");
        }
        self.session = EditingSession::default();
        if self.view.selected_note_id.is_none() {
            self.view.selected_note_id =
                self.store.first_id().map(str::to_string);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrors;

    fn visible_ids(state: &AppState) -> Vec<String> {
        state.visible_notes().iter().map(|n| n.id.clone()).collect()
    }

    fn assert_selection_valid(state: &AppState) {
        if let Some(id) = &state.view().selected_note_id {
            assert!(state.store().contains(id), "dangling selection {id}");
        }
    }

    #[test]
    fn seed_selects_first_note() {
        let state = AppState::with_seed();
        assert_eq!(state.view().selected_note_id.as_deref(), Some("1"));
        assert_eq!(visible_ids(&state).len(), 7);
    }

    #[test]
    fn create_selects_and_goes_first() {
        let mut state = AppState::with_seed();
        let id = state
            .create("New".into(), "body".into(), vec!["x".into()])
            .id
            .clone();
        assert_eq!(state.view().selected_note_id.as_deref(), Some(id.as_str()));
        assert_eq!(state.store().notes()[0].id, id);
        assert_eq!(visible_ids(&state)[0], id);
    }

    #[test]
    fn updated_at_moves_only_for_touched_note() {
        let mut state = AppState::with_seed();
        let before: Vec<_> =
            state.store().iter().map(|n| (n.id.clone(), n.updated_at)).collect();

        let patch = NotePatch { title: Some("Renamed".into()), ..Default::default() };
        state.update("3", patch).unwrap();
        state.archive("5").unwrap();

        for (id, old) in before {
            let now = state.store().get(&id).unwrap().updated_at;
            if id == "3" || id == "5" {
                assert!(now > old);
            } else {
                assert_eq!(now, old);
            }
        }
    }

    #[test]
    fn delete_selected_falls_back_to_first() {
        let mut state = AppState::with_seed();
        state.delete("1").unwrap();
        assert_eq!(state.view().selected_note_id.as_deref(), Some("2"));

        state.set_selected_note_id(Some("4")).unwrap();
        state.delete("2").unwrap();
        assert_eq!(state.view().selected_note_id.as_deref(), Some("4"));
        assert_selection_valid(&state);
    }

    #[test]
    fn deleting_every_note_clears_selection() {
        let mut state = AppState::new(vec![]);
        let id = state.create("Only".into(), "one".into(), vec![]).id.clone();
        state.delete(&id).unwrap();
        assert_eq!(state.view().selected_note_id, None);
        assert!(state.visible_notes().is_empty());
        state.set_view(ViewKind::Archived);
        assert!(state.visible_notes().is_empty());
    }

    #[test]
    fn delete_discards_edit_of_that_note() {
        let mut state = AppState::with_seed();
        state.start_editing().unwrap();
        state.delete("1").unwrap();
        assert!(state.session().is_idle());
    }

    #[test]
    fn update_ends_edit_of_that_note_only() {
        let mut state = AppState::with_seed();
        state.start_editing().unwrap();
        let patch = NotePatch { title: Some("Renamed".into()), ..Default::default() };
        state.update("2", patch.clone()).unwrap();
        assert_eq!(state.session().editing_id(), Some("1"));

        state.update("1", patch).unwrap();
        assert!(state.session().is_idle());
        assert_eq!(state.store().get("1").unwrap().title, "Renamed");

        state.start_editing().unwrap();
        assert!(state.update("missing", NotePatch::default()).is_err());
        assert_eq!(state.session().editing_id(), Some("1"));
    }

    #[test]
    fn archive_keeps_selection() {
        let mut state = AppState::with_seed();
        state.archive("1").unwrap();
        assert_eq!(state.view().selected_note_id.as_deref(), Some("1"));
        assert!(!visible_ids(&state).contains(&"1".to_string()));

        state.toggle_archive("1").unwrap();
        assert!(!state.store().get("1").unwrap().is_archived);
        assert!(state.archive("missing").is_err());
    }

    #[test]
    fn set_view_clears_tag_and_selects_first_visible() {
        let mut state = AppState::with_seed();
        state.archive("6").unwrap();
        state.archive("3").unwrap();
        state.set_selected_tag(Some("Dev".into()));

        state.set_view(ViewKind::Archived);
        assert_eq!(state.view().selected_tag, None);
        // "3" was archived last, so it has the newest updated_at
        assert_eq!(state.view().selected_note_id.as_deref(), Some("3"));

        state.set_view(ViewKind::All);
        assert_eq!(state.view().selected_note_id.as_deref(), Some("1"));
    }

    #[test]
    fn tag_then_archived_view_with_no_match_is_empty() {
        let mut state = AppState::with_seed();
        state.set_selected_tag(Some("Dev".into()));
        state.view.current_view = ViewKind::Archived;
        assert!(state.visible_notes().is_empty());

        state.set_view(ViewKind::Archived);
        assert!(state.visible_notes().is_empty());
        assert_eq!(state.view().selected_note_id, None);
    }

    #[test]
    fn choose_tag_toggles_and_forces_all_view() {
        let mut state = AppState::with_seed();
        state.set_view(ViewKind::Archived);
        state.choose_tag("Dev");
        assert_eq!(state.view().current_view, ViewKind::All);
        assert_eq!(state.view().selected_tag.as_deref(), Some("Dev"));
        assert_eq!(visible_ids(&state), vec!["1", "4", "6"]);

        state.choose_tag("Dev");
        assert_eq!(state.view().selected_tag, None);
    }

    #[test]
    fn search_scenarios() {
        let mut state = AppState::with_seed();
        state.set_search_query("fox");
        assert!(state.visible_notes().is_empty());

        state.set_search_query("React");
        let ids = visible_ids(&state);
        // "4" carries the React tag but never mentions it in title or body
        assert!(ids.contains(&"4".to_string()));
        assert!(ids.contains(&"1".to_string()));
    }

    #[test]
    fn selecting_exits_session_and_rejects_unknown_ids() {
        let mut state = AppState::with_seed();
        state.start_creating();
        assert_eq!(state.view().selected_note_id, None);
        state.set_selected_note_id(Some("2")).unwrap();
        assert!(state.session().is_idle());

        assert!(state.set_selected_note_id(Some("nope")).is_err());
        assert_eq!(state.view().selected_note_id.as_deref(), Some("2"));
    }

    #[test]
    fn next_and_previous_walk_the_visible_list() {
        let mut state = AppState::with_seed();
        assert_eq!(state.select_next().map(|n| n.id.clone()), Some("2".into()));
        assert_eq!(state.select_previous().map(|n| n.id.clone()), Some("1".into()));
        assert!(state.select_previous().is_none());
        assert_eq!(state.view().selected_note_id.as_deref(), Some("1"));
    }

    #[test]
    fn blank_title_blocks_save() {
        let mut state = AppState::with_seed();
        let count = state.store().len();
        state.start_creating();
        state.editor().unwrap().set_content("some body".into());

        let err = state.save().unwrap_err();
        match err {
            NotesError::Validation(errors) => assert_eq!(
                errors,
                ValidationErrors { title: Some("Title is required"), content: None }
            ),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(state.store().len(), count);
        assert!(state.session().is_creating());
    }

    #[test]
    fn save_creates_with_parsed_tags() {
        let mut state = AppState::with_seed();
        state.start_creating();
        let editor = state.editor().unwrap();
        editor.set_title("Groceries".into());
        editor.set_content("milk".into());
        editor.set_tags_input("home, , errands, home".into());
        let id = state.save().unwrap();

        let note = state.store().get(&id).unwrap();
        assert_eq!(note.tags, vec!["home", "errands"]);
        assert_eq!(state.view().selected_note_id.as_deref(), Some(id.as_str()));
        assert!(state.session().is_idle());
    }

    #[test]
    fn save_edit_updates_selected_note() {
        let mut state = AppState::with_seed();
        state.set_selected_note_id(Some("2")).unwrap();
        state.start_editing().unwrap();
        assert_eq!(
            state.session().draft().unwrap().tags_input,
            "Travel, Personal"
        );
        state.editor().unwrap().set_tags_input("Travel".into());
        assert_eq!(state.save().unwrap(), "2");

        let note = state.store().get("2").unwrap();
        assert_eq!(note.tags, vec!["Travel"]);
        assert_eq!(note.title, "Japan Travel Planning");
        assert_eq!(state.store().len(), 7);
    }

    #[test]
    fn cancel_restores_a_selection() {
        let mut state = AppState::with_seed();
        state.start_creating();
        state.cancel();
        assert!(state.session().is_idle());
        assert_eq!(state.view().selected_note_id.as_deref(), Some("1"));
    }

    #[test]
    fn session_commands_need_a_session() {
        let mut state = AppState::new(vec![]);
        assert!(matches!(state.save(), Err(NotesError::NoActiveSession)));
        assert!(matches!(state.editor(), Err(NotesError::NoActiveSession)));
        assert!(matches!(state.start_editing(), Err(NotesError::NothingSelected)));
    }

    #[test]
    fn import_and_clear_reset_dependent_state() {
        let mut state = AppState::with_seed();
        state.set_search_query("pasta");
        state.set_selected_tag(Some("Cooking".into()));
        state.start_creating();

        state.import_all(seed::default_notes().into_iter().rev().collect());
        assert_eq!(state.view().selected_note_id.as_deref(), Some("7"));
        assert!(state.session().is_idle());

        state.clear();
        assert!(state.store().is_empty());
        assert_eq!(state.view().selected_note_id, None);
        assert_eq!(state.view().selected_tag, None);
        assert!(state.view().search_query.is_empty());
    }

    #[test]
    fn preferences_and_theme() {
        let mut state = AppState::with_seed();
        state.set_auto_save(false);
        state.set_compact_view(true);
        state.toggle_theme_mode();
        assert!(!state.view().auto_save);
        assert!(state.view().compact_view);
        assert_eq!(state.theme().mode, crate::theme::ThemeMode::Dark);
    }
}
