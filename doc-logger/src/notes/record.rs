//! Parse the 4-line markdown records of the note log.
//!
//! Records are located by their `### path:line` header; the note and date
//! lines are matched via regex so hand-edited spacing is tolerated on read.

use chrono::NaiveDate;
use doc_logger_types::{DATE_FORMAT, NOTE_PREFIX, Note, NoteKey};
use regex::Regex;
use std::sync::LazyLock;

static NOTE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*Note:\*\*\s*(.*)$").unwrap());
static DATE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*Date:\*\*\s*(\d{4}-\d{2}-\d{2})\s*$").unwrap());

/// Text of a `**Note:**` line with the prefix stripped, or None if the
/// line is not a note line
pub fn note_text(line: &str) -> Option<String> {
    NOTE_LINE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Render a `**Note:**` line
pub fn note_line(text: &str) -> String {
    format!("{}{}", NOTE_PREFIX, text)
}

/// Date of a `**Date:**` line
pub fn note_date(line: &str) -> Option<NaiveDate> {
    let caps = DATE_LINE_RE.captures(line.trim())?;
    NaiveDate::parse_from_str(caps.get(1)?.as_str(), DATE_FORMAT).ok()
}

/// Index of the first line whose trimmed content is exactly the key's header
pub fn find_header(lines: &[String], key: &NoteKey) -> Option<usize> {
    let header = key.header();
    lines.iter().position(|l| l.trim() == header)
}

/// Parse the record whose header sits at `idx`
pub fn parse_record_at(lines: &[String], idx: usize) -> Option<Note> {
    let key = NoteKey::parse_header(lines.get(idx)?)?;
    let text = note_text(lines.get(idx + 1)?)?;
    let date = note_date(lines.get(idx + 2)?)?;
    Some(Note { key, text, date })
}

/// All well-formed records in file order. Lines that don't start a
/// record are skipped.
pub fn parse_records(lines: &[String]) -> Vec<Note> {
    let mut notes = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if NoteKey::parse_header(line).is_none() {
            continue;
        }
        match parse_record_at(lines, idx) {
            Some(note) => notes.push(note),
            None => log::debug!("[NOTES] Skipping malformed record at line {}", idx + 1),
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::file_ops::split_lines;

    const SAMPLE: &str = "### src/a.ts:5\n**Note:** check bounds\n**Date:** 2024-03-09\n\n\
                          ### src/b.ts:1\n**Note:** \n**Date:** 2024-03-10\n\n";

    #[test]
    fn test_note_text() {
        assert_eq!(note_text("**Note:** hello").as_deref(), Some("hello"));
        assert_eq!(note_text("**Note:**hello").as_deref(), Some("hello"));
        assert_eq!(note_text("**Note:** ").as_deref(), Some(""));
        assert!(note_text("**Date:** 2024-01-01").is_none());
    }

    #[test]
    fn test_note_date() {
        assert_eq!(
            note_date("**Date:** 2024-03-09"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
        assert!(note_date("**Date:** yesterday").is_none());
    }

    #[test]
    fn test_find_header_first_match() {
        let dup = "### src/a.ts:5\n**Note:** dup\n**Date:** 2024-03-11\n\n";
        let lines = split_lines(&format!("{}{}", SAMPLE, dup));
        assert_eq!(find_header(&lines, &NoteKey::new("src/a.ts", 5)), Some(0));
        assert_eq!(find_header(&lines, &NoteKey::new("src/b.ts", 1)), Some(4));
        assert_eq!(find_header(&lines, &NoteKey::new("src/a.ts", 50)), None);
    }

    #[test]
    fn test_parse_records() {
        let lines = split_lines(SAMPLE);
        let notes = parse_records(&lines);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "check bounds");
        assert_eq!(notes[1].key, NoteKey::new("src/b.ts", 1));
        assert_eq!(notes[1].text, "");
    }

    #[test]
    fn test_parse_records_skips_malformed() {
        let lines = split_lines(
            "### src/a.ts:5\nfree text\n\n### src/b.ts:2\n**Note:** ok\n**Date:** 2024-01-02\n\n",
        );
        let notes = parse_records(&lines);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].key.path, "src/b.ts");
    }
}
