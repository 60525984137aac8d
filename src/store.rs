use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::error::{NotesError, Result};
use crate::note::{IdGenerator, Note, NotePatch};

/// Canonical note collection, newest-created first.
///
/// The store only knows about notes; selection and editing side effects of
/// each operation are applied by [`crate::AppState`].
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    ids: IdGenerator,
}

impl NoteStore {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes, ids: IdGenerator::default() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn first_id(&self) -> Option<&str> {
        self.notes.first().map(|n| n.id.as_str())
    }

    /// Every distinct tag in the collection, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .notes
            .iter()
            .flat_map(|n| n.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_string).collect()
    }

    pub fn create(
        &mut self,
        title: String,
        content: String,
        tags: Vec<String>,
        now: DateTime<Utc>,
    ) -> &Note {
        let taken: HashSet<&str> =
            self.notes.iter().map(|n| n.id.as_str()).collect();
        let id = self.ids.next_id(now, &taken);
        debug!(%id, %title, "created note");
        self.notes.insert(
            0,
            Note {
                id,
                title,
                content,
                tags,
                created_at: now,
                updated_at: now,
                is_archived: false,
            },
        );
        &self.notes[0]
    }

    pub fn update(
        &mut self,
        id: &str,
        patch: NotePatch,
        now: DateTime<Utc>,
    ) -> Result<&Note> {
        let note = self.get_mut(id)?;
        patch.apply(note);
        note.touch(now);
        debug!(%id, "updated note");
        Ok(note)
    }

    pub fn set_archived(
        &mut self,
        id: &str,
        archived: bool,
        now: DateTime<Utc>,
    ) -> Result<&Note> {
        let note = self.get_mut(id)?;
        note.is_archived = archived;
        note.touch(now);
        debug!(%id, archived, "archive flag changed");
        Ok(note)
    }

    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let idx = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| NotesError::NoteNotFound(id.to_string()))?;
        debug!(%id, "deleted note");
        Ok(self.notes.remove(idx))
    }

    pub fn replace_all(&mut self, notes: Vec<Note>) {
        debug!(count = notes.len(), "replaced note collection");
        self.notes = notes;
    }

    pub fn clear(&mut self) {
        debug!(count = self.notes.len(), "cleared note collection");
        self.notes.clear();
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Note> {
        self.notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| NotesError::NoteNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn create_inserts_newest_first() {
        let mut store = NoteStore::default();
        let a = store.create("A".into(), "a".into(), vec![], at(1)).id.clone();
        let b = store.create("B".into(), "b".into(), vec![], at(2)).id.clone();
        let ids: Vec<&str> = store.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![b.as_str(), a.as_str()]);
        assert!(!store.notes()[0].is_archived);
        assert_eq!(store.notes()[0].created_at, store.notes()[0].updated_at);
    }

    #[test]
    fn update_missing_note_reports_not_found() {
        let mut store = NoteStore::default();
        let err = store.update("nope", NotePatch::default(), at(1));
        assert!(matches!(err, Err(NotesError::NoteNotFound(id)) if id == "nope"));
    }

    #[test]
    fn update_and_archive_restamp_monotonically() {
        let mut store = NoteStore::default();
        let id = store.create("A".into(), "a".into(), vec![], at(10)).id.clone();

        let patch = NotePatch { content: Some("b".into()), ..Default::default() };
        let note = store.update(&id, patch, at(20)).unwrap();
        assert_eq!(note.updated_at, at(20));
        assert_eq!(note.created_at, at(10));

        // a clock that went backwards does not rewind updated_at
        let note = store.set_archived(&id, true, at(15)).unwrap();
        assert!(note.is_archived);
        assert_eq!(note.updated_at, at(20));
    }

    #[test]
    fn all_tags_are_distinct_and_sorted() {
        let mut store = NoteStore::default();
        store.create("A".into(), "a".into(), vec!["b".into(), "a".into()], at(1));
        store.create("B".into(), "b".into(), vec!["a".into()], at(2));
        assert_eq!(store.all_tags(), vec!["a", "b"]);
    }

    #[test]
    fn delete_returns_removed_note() {
        let mut store = NoteStore::default();
        let id = store.create("A".into(), "a".into(), vec![], at(1)).id.clone();
        assert_eq!(store.delete(&id).unwrap().title, "A");
        assert!(store.is_empty());
        assert!(store.delete(&id).is_err());
    }
}
