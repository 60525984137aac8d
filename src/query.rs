//! Filter, search and sort pipeline behind the visible note list.

use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

use crate::note::Note;
use crate::store::NoteStore;
use crate::view::{SortBy, ViewKind, ViewState};

/// Notes to display for the given view state, in display order.
pub fn visible_notes<'a>(store: &'a NoteStore, view: &ViewState) -> Vec<&'a Note> {
    let query = search_needle(&view.search_query);
    let mut notes: Vec<&Note> = store
        .iter()
        .filter(|n| in_view(n, view.current_view))
        .filter(|n| view.selected_tag.as_deref().is_none_or(|t| n.has_tag(t)))
        .filter(|n| matches_search(n, &query))
        .collect();
    sort_notes(&mut notes, view.sort_by);
    notes
}

pub fn in_view(note: &Note, view: ViewKind) -> bool {
    note.is_archived == view.shows_archived()
}

/// Lowercased query to match with, or an empty string when the query is
/// blank. Surrounding spaces in a non-blank query are part of the match.
pub fn search_needle(query: &str) -> String {
    if query.trim().is_empty() {
        String::new()
    } else {
        query.to_lowercase()
    }
}

/// Case-insensitive substring match on title, raw content and tags. An
/// empty `query_lower` matches everything.
pub fn matches_search(note: &Note, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }
    note.title.to_lowercase().contains(query_lower)
        || note.content.to_lowercase().contains(query_lower)
        || note.tags.iter().any(|t| t.to_lowercase().contains(query_lower))
}

/// Stable sort; equal keys keep their collection order. Titles and tags
/// compare case-insensitively with Unicode collation, so `Éclair` sorts
/// between `apple` and `Zebra`.
pub fn sort_notes(notes: &mut [&Note], sort_by: SortBy) {
    match sort_by {
        SortBy::Updated => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortBy::Created => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Alphabetical => {
            let order = TextOrder::new();
            notes.sort_by(|a, b| order.compare(&a.title, &b.title));
        }
        SortBy::Tags => {
            let order = TextOrder::new();
            notes.sort_by(|a, b| {
                order
                    .compare_first_tag(a.first_tag(), b.first_tag())
                    .then_with(|| order.compare(&a.title, &b.title))
            });
        }
    }
}

/// Caseless text comparison. Falls back to comparing lowercased strings if
/// no collator can be built.
struct TextOrder {
    collator: Option<Collator>,
}

impl TextOrder {
    fn new() -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);
        let collator = Collator::try_new(&Default::default(), options)
            .map_err(|err| warn!(?err, "no collator, sorting by code point"))
            .ok();
        Self { collator }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
    }

    fn compare_first_tag(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.compare(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Active and archived note counts among notes matching `query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewCounts {
    pub active: usize,
    pub archived: usize,
}

pub fn view_counts(store: &NoteStore, query: &str) -> ViewCounts {
    let query = search_needle(query);
    store
        .iter()
        .filter(|n| matches_search(n, &query))
        .fold(ViewCounts::default(), |mut counts, n| {
            if n.is_archived {
                counts.archived += 1;
            } else {
                counts.active += 1;
            }
            counts
        })
}

/// Per-tag counts among notes in the current view that match the search,
/// ignoring the tag filter itself. Every tag in the store is listed.
pub fn tag_counts(store: &NoteStore, view: &ViewState) -> BTreeMap<String, usize> {
    let query = search_needle(&view.search_query);
    let mut counts: BTreeMap<String, usize> =
        store.all_tags().into_iter().map(|t| (t, 0)).collect();
    for note in store
        .iter()
        .filter(|n| in_view(n, view.current_view))
        .filter(|n| matches_search(n, &query))
    {
        for tag in &note.tags {
            if let Some(count) = counts.get_mut(tag) {
                *count += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn note(id: &str, title: &str, tags: &[&str], updated: i64) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("content of {title}"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: at(updated),
            updated_at: at(updated),
            is_archived: false,
        }
    }

    fn ids(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn updated_sort_is_newest_first() {
        let store = NoteStore::new(vec![note("a", "A", &[], 1), note("b", "B", &[], 2)]);
        let view = ViewState::default();
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["b", "a"]);
    }

    #[test]
    fn alphabetical_ignores_case() {
        let store = NoteStore::new(vec![
            note("1", "banana", &[], 1),
            note("2", "Apple", &[], 1),
            note("3", "cherry", &[], 1),
        ]);
        let view = ViewState { sort_by: SortBy::Alphabetical, ..Default::default() };
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["2", "1", "3"]);
    }

    #[test]
    fn tag_sort_puts_untagged_last_and_is_stable() {
        let store = NoteStore::new(vec![
            note("untagged", "Aaa", &[], 1),
            note("x1", "Same", &["dev"], 1),
            note("x2", "same", &["Dev"], 1),
            note("y", "Zed", &["alpha"], 1),
            note("z", "Zzz", &["zzz"], 1),
        ]);
        let view = ViewState { sort_by: SortBy::Tags, ..Default::default() };
        assert_eq!(
            ids(&visible_notes(&store, &view)),
            vec!["y", "x1", "x2", "z", "untagged"]
        );
    }

    #[test]
    fn search_matches_tags_and_raw_markup() {
        let mut html = note("h", "Markup", &[], 1);
        html.content = "<p>hello <strong>world</strong></p>".into();
        let store = NoteStore::new(vec![note("r", "Perf", &["React"], 1), html]);

        let mut view = ViewState { search_query: "react".into(), ..Default::default() };
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["r"]);

        view.search_query = "<strong>".into();
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["h"]);

        view.search_query = "   ".into();
        assert_eq!(visible_notes(&store, &view).len(), 2);
    }

    #[test]
    fn search_keeps_surrounding_spaces() {
        let store = NoteStore::new(vec![
            note("a", "Express", &[], 2),
            note("b", "Bench Press", &[], 1),
        ]);
        let mut view = ViewState { search_query: " press".into(), ..Default::default() };
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["b"]);
        assert_eq!(view_counts(&store, " press"), ViewCounts { active: 1, archived: 0 });

        view.search_query = "press".into();
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["a", "b"]);
    }

    #[test]
    fn alphabetical_collates_accented_titles() {
        let store = NoteStore::new(vec![
            note("z", "Zebra", &[], 1),
            note("e", "Éclair", &[], 1),
            note("a", "apple", &[], 1),
        ]);
        let view = ViewState { sort_by: SortBy::Alphabetical, ..Default::default() };
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["a", "e", "z"]);
    }

    #[test]
    fn tag_sort_collates_accented_tags() {
        let store = NoteStore::new(vec![
            note("z", "One", &["zen"], 1),
            note("e", "Two", &["Été"], 1),
            note("a", "Three", &["art"], 1),
        ]);
        let view = ViewState { sort_by: SortBy::Tags, ..Default::default() };
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["a", "e", "z"]);
    }

    #[test]
    fn archive_and_tag_filters_combine() {
        let mut archived = note("old", "Old", &["Dev"], 1);
        archived.is_archived = true;
        let store = NoteStore::new(vec![note("a", "A", &["Dev"], 2), archived]);

        let mut view = ViewState { selected_tag: Some("Dev".into()), ..Default::default() };
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["a"]);

        view.current_view = ViewKind::Archived;
        assert_eq!(ids(&visible_notes(&store, &view)), vec!["old"]);

        view.selected_tag = Some("dev".into());
        assert!(visible_notes(&store, &view).is_empty());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let store = NoteStore::new(vec![
            note("a", "A", &["t"], 3),
            note("b", "B", &["t"], 3),
            note("c", "C", &[], 1),
        ]);
        let view = ViewState::default();
        assert_eq!(
            ids(&visible_notes(&store, &view)),
            ids(&visible_notes(&store, &view))
        );
    }

    #[test]
    fn counts_follow_search_and_view() {
        let mut archived = note("old", "Old", &["Dev"], 1);
        archived.is_archived = true;
        let store = NoteStore::new(vec![
            note("a", "Alpha", &["Dev", "Web"], 2),
            note("b", "Beta", &["Web"], 2),
            archived,
        ]);

        assert_eq!(view_counts(&store, ""), ViewCounts { active: 2, archived: 1 });
        assert_eq!(view_counts(&store, "alpha"), ViewCounts { active: 1, archived: 0 });

        let view = ViewState::default();
        let counts = tag_counts(&store, &view);
        assert_eq!(counts.get("Dev"), Some(&1));
        assert_eq!(counts.get("Web"), Some(&2));
    }
}
