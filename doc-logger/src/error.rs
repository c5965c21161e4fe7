//! Error type shared by the note store and the command layer.

use doc_logger_types::NoteKey;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocLogError {
    /// No workspace root is open; nothing is read or written
    #[error("Open a folder first to save notes.")]
    NoWorkspace,

    /// No current file/cursor to attach a note to
    #[error("Open a file and place the cursor to log a note.")]
    NoActiveTarget,

    #[error("No note found for {key}")]
    NotFound { key: NoteKey },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DocLogError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DocLogError>;
