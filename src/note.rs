use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::content::{self, ContentFormat};

pub const ID_TS_WIDTH: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

impl Note {
    pub fn format(&self) -> ContentFormat {
        content::detect_format(&self.content)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn first_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Refresh `updated_at` without letting it move backwards.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = stamp_after(self.updated_at, now);
    }
}

/// Fields merged into an existing note by `NoteStore::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn apply(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        if let Some(tags) = self.tags {
            note.tags = tags;
        }
    }
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn stamp_after(
    previous: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    if now < previous { previous } else { now }
}

/// Hands out short, time-ordered ids that never collide with ids already
/// present in the store.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_ts: i64,
    counter: u32,
}

impl IdGenerator {
    pub fn next_id(
        &mut self,
        now: DateTime<Utc>,
        taken: &HashSet<&str>,
    ) -> String {
        loop {
            let micros = now.timestamp_micros();
            let ts = if micros <= self.last_ts { self.last_ts } else { micros };

            if ts == self.last_ts {
                self.counter = self.counter.saturating_add(1);
            } else {
                self.last_ts = ts;
                self.counter = 0;
            }

            let ts_enc = encode_base62_width(ts.max(0) as u64, ID_TS_WIDTH);
            let id = if self.counter == 0 {
                ts_enc
            } else {
                format!("{ts_enc}{}", encode_base62(self.counter as u64))
            };

            if !taken.contains(id.as_str()) {
                return id;
            }
        }
    }
}

fn encode_base62(num: u64) -> String {
    const ALPHABET: &[u8] =
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut n = num;
    let base = ALPHABET.len() as u64;
    let mut out = Vec::new();
    while n > 0 {
        let idx = (n % base) as usize;
        out.push(ALPHABET[idx] as char);
        n /= base;
    }
    out.iter().rev().collect()
}

fn encode_base62_width(num: u64, width: usize) -> String {
    let base = encode_base62(num);
    if base.len() >= width {
        base
    } else {
        format!("{}{}", "0".repeat(width - base.len()), base)
    }
}
