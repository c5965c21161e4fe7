//! Shared types for the doc-logger note store and its hosts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// =====================================================
// Record Format
// =====================================================

/// Prefix of the header line that opens every record
pub const HEADER_PREFIX: &str = "### ";
/// Prefix of the note-text line
pub const NOTE_PREFIX: &str = "**Note:** ";
/// Prefix of the creation-date line
pub const DATE_PREFIX: &str = "**Date:** ";
/// Header, note, date and blank separator
pub const RECORD_LINES: usize = 4;
/// Date format used on the `**Date:**` line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =====================================================
// Domain Types
// =====================================================

/// Identifies a note: workspace-relative path plus 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteKey {
    pub path: String,
    pub line: u32,
}

impl NoteKey {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Build a key from an editor position, which counts lines from zero
    pub fn from_zero_based(path: impl Into<String>, zero_based_line: u32) -> Self {
        Self::new(path, zero_based_line.saturating_add(1))
    }

    /// Zero-based line as the editor sees it
    pub fn zero_based_line(&self) -> u32 {
        self.line.saturating_sub(1)
    }

    /// The `### path:line` header line for this key
    pub fn header(&self) -> String {
        format!("{}{}", HEADER_PREFIX, self)
    }

    /// Parse a header line back into a key. Returns None for anything else.
    pub fn parse_header(line: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(HEADER_PREFIX)?;
        let (path, line_no) = rest.trim_start().rsplit_once(':')?;
        let line_no: u32 = line_no.parse().ok()?;
        if path.is_empty() || line_no == 0 {
            return None;
        }
        Some(Self::new(path, line_no))
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(flatten)]
    pub key: NoteKey,
    pub text: String,
    /// Creation date; never touched by edits
    pub date: NaiveDate,
}

impl Note {
    /// Render the 4-line record, including the trailing blank separator
    pub fn to_record(&self) -> String {
        format!(
            "{}\n{}{}\n{}{}\n\n",
            self.key.header(),
            NOTE_PREFIX,
            self.text,
            DATE_PREFIX,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Where the host editor has a note anchored (absolute file, zero-based line)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPosition {
    pub file: PathBuf,
    pub line: u32,
}

impl EditorPosition {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Result of locating a note in the note file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLocation {
    /// Zero-based line index of the record header
    pub line_index: usize,
    /// The parsed record, when the lines after the header are well formed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

/// Actions a host renders above an annotated line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationAction {
    View,
    Edit,
    Delete,
}

impl AnnotationAction {
    pub const ALL: [AnnotationAction; 3] = [Self::View, Self::Edit, Self::Delete];

    pub fn title(&self) -> &'static str {
        match self {
            Self::View => "📝 View",
            Self::Edit => "✏️ Edit",
            Self::Delete => "🗑️ Delete",
        }
    }
}

/// An annotation to render on one line of an open document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub key: NoteKey,
    pub position: EditorPosition,
    pub actions: Vec<AnnotationAction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_zero_based() {
        let key = NoteKey::from_zero_based("src/a.ts", 4);
        assert_eq!(key.line, 5);
        assert_eq!(key.zero_based_line(), 4);
        assert_eq!(key.header(), "### src/a.ts:5");
    }

    #[test]
    fn test_parse_header() {
        let key = NoteKey::parse_header("### src/a.ts:5").unwrap();
        assert_eq!(key, NoteKey::new("src/a.ts", 5));

        // Trailing whitespace is tolerated
        assert!(NoteKey::parse_header("### src/a.ts:5  ").is_some());

        // Colons inside the path stay with the path
        let key = NoteKey::parse_header("### C:\\proj\\a.ts:12").unwrap();
        assert_eq!(key.path, "C:\\proj\\a.ts");
        assert_eq!(key.line, 12);

        assert!(NoteKey::parse_header("**Note:** hi").is_none());
        assert!(NoteKey::parse_header("### no-line-number").is_none());
        assert!(NoteKey::parse_header("### src/a.ts:0").is_none());
        assert!(NoteKey::parse_header("### src/a.ts:x").is_none());
    }

    #[test]
    fn test_note_to_record() {
        let note = Note {
            key: NoteKey::new("src/a.ts", 5),
            text: "check bounds".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };
        assert_eq!(
            note.to_record(),
            "### src/a.ts:5\n**Note:** check bounds\n**Date:** 2024-03-09\n\n"
        );
    }

    #[test]
    fn test_note_serializes_flat() {
        let note = Note {
            key: NoteKey::new("src/b.ts", 1),
            text: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["path"], "src/b.ts");
        assert_eq!(json["line"], 1);
        assert_eq!(json["date"], "2024-01-01");
    }

    #[test]
    fn test_annotation_titles() {
        let titles: Vec<&str> = AnnotationAction::ALL.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["📝 View", "✏️ Edit", "🗑️ Delete"]);
    }
}
