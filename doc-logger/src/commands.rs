//! Session — the command surface hosts call into.
//!
//! A `Session` is created once per host process and owns the workspace root,
//! the note store and the location index. Commands that need free text go
//! through an [`InputPrompt`]; a dismissed prompt ends the command with
//! [`CommandOutcome::Cancelled`] and nothing is written.

use crate::config::Config;
use crate::error::{DocLogError, Result};
use crate::notes::{LocationIndex, NoteStore, file_ops};
use chrono::{NaiveDate, Utc};
use doc_logger_types::{Annotation, EditorPosition, NoteKey, NoteLocation};
use std::path::{Path, PathBuf};

/// What the host should show when asking for note text
#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    pub message: String,
    pub placeholder: Option<String>,
    /// Pre-filled value (the current text when editing)
    pub initial_value: Option<String>,
}

/// Source of user-entered text. Returning None means the user cancelled.
pub trait InputPrompt {
    fn ask(&mut self, request: &PromptRequest) -> Option<String>;
}

impl<F> InputPrompt for F
where
    F: FnMut(&PromptRequest) -> Option<String>,
{
    fn ask(&mut self, request: &PromptRequest) -> Option<String> {
        self(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome<T> {
    Done(T),
    Cancelled,
}

impl<T> CommandOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub struct Session {
    workspace_root: Option<PathBuf>,
    store: Option<NoteStore>,
    index: LocationIndex,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let workspace_root = config
            .workspace_root
            .as_deref()
            .map(file_ops::normalize_path);
        let store = workspace_root
            .as_ref()
            .map(|root| NoteStore::new(root.join(&config.notes_file)));
        if let Some(ref store) = store {
            log::debug!("[SESSION] Notes at {}", store.notes_path().display());
        }
        Self {
            workspace_root,
            store,
            index: LocationIndex::new(),
        }
    }

    /// Session rooted at `root` with the default note file name
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(&Config::default().with_workspace_root(root))
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    pub fn store(&self) -> Result<&NoteStore> {
        self.store.as_ref().ok_or(DocLogError::NoWorkspace)
    }

    /// Key for an absolute file and a zero-based editor line
    pub fn key_for(&self, file: &Path, zero_based_line: u32) -> Result<NoteKey> {
        let root = self.workspace_root().ok_or(DocLogError::NoWorkspace)?;
        Ok(NoteKey::from_zero_based(
            file_ops::relative_path(root, file),
            zero_based_line,
        ))
    }

    // --- Operations surface ---

    /// Append a note dated today (UTC) and index its location
    pub fn create_note(
        &mut self,
        file: &Path,
        zero_based_line: u32,
        text: &str,
    ) -> Result<NoteKey> {
        self.create_note_on(file, zero_based_line, text, Utc::now().date_naive())
    }

    pub fn create_note_on(
        &mut self,
        file: &Path,
        zero_based_line: u32,
        text: &str,
        date: NaiveDate,
    ) -> Result<NoteKey> {
        let key = self.key_for(file, zero_based_line)?;
        self.store()?.append(&key, text, date)?;
        self.index
            .record(key.clone(), EditorPosition::new(file, zero_based_line));
        Ok(key)
    }

    /// Zero-based line index of the note's header in the note file
    pub fn find_note(&self, file: &Path, zero_based_line: u32) -> Result<usize> {
        let key = self.key_for(file, zero_based_line)?;
        self.store()?
            .find(&key)?
            .ok_or(DocLogError::NotFound { key })
    }

    pub fn edit_note(&self, file: &Path, zero_based_line: u32, new_text: &str) -> Result<()> {
        let key = self.key_for(file, zero_based_line)?;
        if self.store()?.update(&key, new_text)? {
            Ok(())
        } else {
            Err(DocLogError::NotFound { key })
        }
    }

    pub fn delete_note(&mut self, file: &Path, zero_based_line: u32) -> Result<()> {
        let key = self.key_for(file, zero_based_line)?;
        if !self.store()?.delete(&key)? {
            return Err(DocLogError::NotFound { key });
        }
        self.index.forget(&key);
        Ok(())
    }

    // --- Prompted commands ---

    /// Ask for a note and log it at the cursor
    pub fn log_note(
        &mut self,
        target: Option<&EditorPosition>,
        prompt: &mut dyn InputPrompt,
    ) -> Result<CommandOutcome<NoteKey>> {
        let target = target.ok_or(DocLogError::NoActiveTarget)?;
        self.store()?;

        let request = PromptRequest {
            message: "Write your note here…".to_string(),
            placeholder: Some("E.g. Fixed off-by-one error in parser".to_string()),
            initial_value: None,
        };
        let Some(text) = prompt.ask(&request) else {
            log::debug!("[SESSION] Note entry cancelled");
            return Ok(CommandOutcome::Cancelled);
        };

        let key = self.create_note(&target.file, target.line, &text)?;
        Ok(CommandOutcome::Done(key))
    }

    /// Locate the note anchored at `position` so the host can reveal it
    pub fn open_note(&self, position: &EditorPosition) -> Result<NoteLocation> {
        let key = self.key_for(&position.file, position.line)?;
        self.store()?
            .locate(&key)?
            .ok_or(DocLogError::NotFound { key })
    }

    /// Ask for replacement text, pre-filled with the current note
    pub fn edit_note_interactive(
        &mut self,
        position: &EditorPosition,
        prompt: &mut dyn InputPrompt,
    ) -> Result<CommandOutcome<()>> {
        let key = self.key_for(&position.file, position.line)?;
        let current = self
            .store()?
            .read_text(&key)?
            .ok_or_else(|| DocLogError::NotFound { key: key.clone() })?;

        let request = PromptRequest {
            message: "Edit your note…".to_string(),
            placeholder: None,
            initial_value: Some(current),
        };
        let Some(text) = prompt.ask(&request) else {
            log::debug!("[SESSION] Edit of {} cancelled", key);
            return Ok(CommandOutcome::Cancelled);
        };

        self.edit_note(&position.file, position.line, &text)?;
        Ok(CommandOutcome::Done(()))
    }

    /// Annotations for an open document; empty without a workspace
    pub fn annotations_for(&self, file: &Path) -> Vec<Annotation> {
        match self.workspace_root() {
            Some(root) => self.index.annotations(&file_ops::relative_path(root, file)),
            None => Vec::new(),
        }
    }

    /// Repopulate the location index from the note file
    pub fn rebuild_index(&mut self) -> Result<usize> {
        let root = self
            .workspace_root
            .clone()
            .ok_or(DocLogError::NoWorkspace)?;
        let records = self.store()?.records()?;
        self.index.rebuild(&records, &root);
        Ok(self.index.len())
    }
}
