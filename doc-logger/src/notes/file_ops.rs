//! File operations for the note log
//!
//! Reading/appending/rewriting the note file, line splitting, and
//! workspace-relative path computation.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Read the note file, returning empty string if not found
pub fn read_notes(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Append text to the note file, creating it if absent.
/// The parent directory must already exist.
pub fn append_notes(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Replace the whole note file
pub fn write_notes(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Split file content into lines, accepting both `\n` and `\r\n`.
/// A trailing newline yields a trailing empty line so that
/// `join_lines(split_lines(s)) == s` for LF files.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect()
}

pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Resolve `.` and `..` components without touching the filesystem.
/// `..` at the root of an absolute path is dropped; leading `..` of a
/// relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Path of `file` relative to `root`, using the host separator.
/// Both paths are normalized first so the same file always yields the same
/// key. Files outside the root get `..` segments; relative inputs are
/// returned normalized.
pub fn relative_path(root: &Path, file: &Path) -> String {
    let file = normalize_path(file);
    if file.is_relative() {
        return file.to_string_lossy().to_string();
    }
    let root = normalize_path(root);
    if let Ok(rel) = file.strip_prefix(&root) {
        return rel.to_string_lossy().to_string();
    }

    let root_parts: Vec<Component> = root.components().collect();
    let file_parts: Vec<Component> = file.components().collect();
    let common = root_parts
        .iter()
        .zip(file_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..root_parts.len() {
        rel.push("..");
    }
    for part in &file_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_notes_not_found() {
        let dir = tempdir().unwrap();
        let content = read_notes(&dir.path().join("NOTES.md")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_append_creates_then_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("NOTES.md");

        append_notes(&path, "one\n").unwrap();
        append_notes(&path, "two\n").unwrap();
        assert_eq!(read_notes(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_append_missing_parent_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("NOTES.md");
        assert!(append_notes(&path, "x").is_err());
    }

    #[test]
    fn test_split_join_lines() {
        let lines = split_lines("a\nb\n");
        assert_eq!(lines, vec!["a", "b", ""]);
        assert_eq!(join_lines(&lines), "a\nb\n");

        let crlf = split_lines("a\r\nb\r\n");
        assert_eq!(crlf, vec!["a", "b", ""]);
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/root");
        assert_eq!(relative_path(root, Path::new("/root/src/a.ts")), "src/a.ts");
        assert_eq!(relative_path(root, Path::new("/other/b.ts")), "../other/b.ts");
        assert_eq!(relative_path(root, Path::new("src/c.ts")), "src/c.ts");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/ws/src/..")), Path::new("/ws"));
        assert_eq!(
            normalize_path(Path::new("/ws/./src/a.ts")),
            Path::new("/ws/src/a.ts")
        );
        assert_eq!(normalize_path(Path::new("/..")), Path::new("/"));
        assert_eq!(normalize_path(Path::new("../a/../b")), Path::new("../b"));
        assert_eq!(normalize_path(Path::new("src/./a.ts")), Path::new("src/a.ts"));
    }

    #[test]
    fn test_relative_path_dotdot() {
        // Root spelled with `..` still matches files below it
        let file = Path::new("/ws/src/a.ts");
        assert_eq!(relative_path(Path::new("/ws/src/.."), file), "src/a.ts");
        assert_eq!(relative_path(Path::new("/ws/./"), file), "src/a.ts");

        // File spelled with `..` resolves to the same key as its plain form
        let root = Path::new("/ws");
        assert_eq!(relative_path(root, Path::new("/ws/src/../b.ts")), "b.ts");
        assert_eq!(
            relative_path(Path::new("/ws/src"), Path::new("/ws/src/../other/c.ts")),
            "../other/c.ts"
        );
    }
}
