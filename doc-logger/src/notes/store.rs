//! NoteStore — CRUD over the flat markdown note log
//!
//! The file is the only source of truth: every lookup is a linear scan for
//! the `### path:line` header, and update/delete rewrite the whole file.

use super::{file_ops, record};
use crate::error::{DocLogError, Result};
use chrono::NaiveDate;
use doc_logger_types::{Note, NoteKey, NoteLocation, RECORD_LINES};
use std::path::{Path, PathBuf};

/// NoteStore wrapping a single markdown note file
#[derive(Debug, Clone)]
pub struct NoteStore {
    notes_path: PathBuf,
}

impl NoteStore {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
        }
    }

    /// Get the note file path
    pub fn notes_path(&self) -> &Path {
        &self.notes_path
    }

    /// Append a new record at the end of the file, creating it if absent.
    /// Duplicate keys are not checked.
    pub fn append(&self, key: &NoteKey, text: &str, date: NaiveDate) -> Result<()> {
        let note = Note {
            key: key.clone(),
            text: text.to_string(),
            date,
        };
        file_ops::append_notes(&self.notes_path, &note.to_record())
            .map_err(|e| DocLogError::io(&self.notes_path, e))?;

        log::info!("[NOTES] Appended note for {}", key);
        Ok(())
    }

    /// Zero-based line index of the first header matching `key`
    pub fn find(&self, key: &NoteKey) -> Result<Option<usize>> {
        let lines = self.read_lines()?;
        Ok(record::find_header(&lines, key))
    }

    /// Find the record and parse it, if it is well formed
    pub fn locate(&self, key: &NoteKey) -> Result<Option<NoteLocation>> {
        let lines = self.read_lines()?;
        Ok(record::find_header(&lines, key).map(|line_index| NoteLocation {
            line_index,
            note: record::parse_record_at(&lines, line_index),
        }))
    }

    /// Current text of a note, for pre-filling an edit prompt
    pub fn read_text(&self, key: &NoteKey) -> Result<Option<String>> {
        let lines = self.read_lines()?;
        Ok(record::find_header(&lines, key).map(|idx| {
            lines
                .get(idx + 1)
                .and_then(|l| record::note_text(l))
                .unwrap_or_default()
        }))
    }

    /// Replace the note-text line of the record for `key`.
    /// Returns false (and leaves the file untouched) if there is no such record.
    pub fn update(&self, key: &NoteKey, new_text: &str) -> Result<bool> {
        let mut lines = self.read_lines()?;
        let Some(idx) = record::find_header(&lines, key) else {
            log::debug!("[NOTES] No note to update for {}", key);
            return Ok(false);
        };

        let note_idx = idx + 1;
        let new_line = record::note_line(new_text);
        if note_idx < lines.len() {
            lines[note_idx] = new_line;
        } else {
            lines.push(new_line);
        }
        self.write_lines(&lines)?;

        log::info!("[NOTES] Updated note for {}", key);
        Ok(true)
    }

    /// Remove the 4 record lines starting at the header for `key`.
    /// Returns false (and leaves the file untouched) if there is no such record.
    pub fn delete(&self, key: &NoteKey) -> Result<bool> {
        let mut lines = self.read_lines()?;
        let Some(idx) = record::find_header(&lines, key) else {
            log::debug!("[NOTES] No note to delete for {}", key);
            return Ok(false);
        };

        let end = (idx + RECORD_LINES).min(lines.len());
        lines.drain(idx..end);
        self.write_lines(&lines)?;

        log::info!("[NOTES] Deleted note for {}", key);
        Ok(true)
    }

    /// Every well-formed record, in file (append) order
    pub fn records(&self) -> Result<Vec<Note>> {
        let lines = self.read_lines()?;
        Ok(record::parse_records(&lines))
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let content = file_ops::read_notes(&self.notes_path)
            .map_err(|e| DocLogError::io(&self.notes_path, e))?;
        Ok(file_ops::split_lines(&content))
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        file_ops::write_notes(&self.notes_path, &file_ops::join_lines(lines))
            .map_err(|e| DocLogError::io(&self.notes_path, e))
    }
}
