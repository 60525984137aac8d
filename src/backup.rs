//! JSON backup export and import.

use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{NotesError, Result};
use crate::note::Note;

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("notes-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON array of every note.
pub fn export_json(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string_pretty(notes)?)
}

/// Parse a backup file's text. Anything other than a JSON array of note
/// records is rejected.
pub fn parse_backup(text: &str) -> Result<Vec<Note>> {
    let value: Value = serde_json::from_str(text).map_err(|err| {
        warn!(%err, "backup is not valid JSON");
        NotesError::ImportParse(err)
    })?;
    if !value.is_array() {
        warn!("backup is not a JSON array");
        return Err(NotesError::ImportFormat);
    }
    serde_json::from_value(value).map_err(|err| {
        warn!(%err, "backup entries are not notes");
        NotesError::ImportParse(err)
    })
}

/// Write a backup into `dir`, named after `date`.
pub fn write_backup(dir: &Path, date: NaiveDate, notes: &[Note]) -> Result<PathBuf> {
    let path = dir.join(backup_file_name(date));
    write_backup_to(&path, notes)?;
    Ok(path)
}

pub fn write_backup_to(path: &Path, notes: &[Note]) -> Result<()> {
    let json = export_json(notes)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), count = notes.len(), "exported notes");
    Ok(())
}

pub fn read_backup(path: &Path) -> Result<Vec<Note>> {
    let text = fs::read_to_string(path)?;
    let notes = parse_backup(&text)?;
    debug!(path = %path.display(), count = notes.len(), "read backup");
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use tempfile::tempdir;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "notes-backup-2026-03-07.json");
    }

    #[test]
    fn export_is_a_pretty_array_with_camel_case_fields() {
        let json = export_json(&seed::default_notes()).unwrap();
        assert!(json.starts_with("[\n  {"));
        assert!(json.contains("\"updatedAt\": \"2024-10-29T10:00:00Z\""));
        assert!(json.contains("\"isArchived\": false"));
    }

    #[test]
    fn import_rejects_non_arrays_and_bad_json() {
        assert!(matches!(parse_backup("{\"notes\": []}"), Err(NotesError::ImportFormat)));
        assert!(matches!(parse_backup("[{"), Err(NotesError::ImportParse(_))));
        assert!(matches!(parse_backup("[1, 2]"), Err(NotesError::ImportParse(_))));
        assert!(parse_backup("[]").unwrap().is_empty());
    }

    #[test]
    fn written_backup_reads_back() {
        let tmp = tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let notes = seed::default_notes();
        let path = write_backup(tmp.path(), date, &notes).unwrap();
        assert!(path.ends_with("notes-backup-2024-11-01.json"));
        assert_eq!(read_backup(&path).unwrap(), notes);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempdir().unwrap();
        let err = read_backup(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, NotesError::Io(_)));
    }
}
