use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::note::Note;

/// Split a comma-separated tag string: entries are trimmed, empty ones
/// dropped, and repeats removed keeping the first occurrence.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Usage summary for one tag across the whole collection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagStat {
    pub count: usize,
    pub archived: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
}

pub fn tag_stats<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
) -> BTreeMap<String, TagStat> {
    let mut stats: BTreeMap<String, TagStat> = BTreeMap::new();
    for note in notes {
        for tag in &note.tags {
            let entry = stats.entry(tag.clone()).or_default();
            entry.count += 1;
            if note.is_archived {
                entry.archived += 1;
            }
            entry.first = Some(match entry.first {
                Some(f) => f.min(note.created_at),
                None => note.created_at,
            });
            entry.last = Some(match entry.last {
                Some(l) => l.max(note.updated_at),
                None => note.updated_at,
            });
        }
    }
    stats
}

/// Hash a tag for deterministic color selection
pub fn hash_tag(tag: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in tag.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

pub fn color_for_tag(tag: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (137, 180, 250),
        (166, 227, 161),
        (249, 226, 175),
        (245, 194, 231),
        (255, 169, 167),
        (148, 226, 213),
        (198, 160, 246),
        (240, 198, 198),
        (181, 232, 224),
        (183, 189, 248),
        (255, 214, 165),
        (179, 255, 171),
        (196, 181, 255),
        (186, 225, 255),
        (255, 241, 173),
        (204, 255, 229),
    ];
    PALETTE[(hash_tag(tag) as usize) % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_trims_drops_empty_and_dedupes() {
        assert_eq!(
            parse_tag_input(" Dev, ,React,Dev ,  "),
            vec!["Dev".to_string(), "React".to_string()]
        );
        assert!(parse_tag_input("").is_empty());
        // case matters for identity
        assert_eq!(parse_tag_input("dev, Dev"), vec!["dev", "Dev"]);
    }

    #[test]
    fn stats_track_counts_and_range() {
        let at = |s| Utc.timestamp_opt(s, 0).unwrap();
        let mk = |id: &str, tags: &[&str], c, u, archived| Note {
            id: id.into(),
            title: id.into(),
            content: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: at(c),
            updated_at: at(u),
            is_archived: archived,
        };
        let notes = vec![
            mk("a", &["Dev"], 10, 20, false),
            mk("b", &["Dev", "Web"], 5, 30, true),
        ];
        let stats = tag_stats(&notes);
        let dev = &stats["Dev"];
        assert_eq!(dev.count, 2);
        assert_eq!(dev.archived, 1);
        assert_eq!(dev.first, Some(at(5)));
        assert_eq!(dev.last, Some(at(30)));
        assert_eq!(stats["Web"].count, 1);
    }

    #[test]
    fn tag_colors_are_deterministic() {
        assert_eq!(hash_tag("todo"), hash_tag("todo"));
        assert_ne!(hash_tag("todo"), hash_tag("work"));
        assert_eq!(color_for_tag("Dev"), color_for_tag("Dev"));
    }
}
