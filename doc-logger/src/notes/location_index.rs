//! In-memory index of which lines currently carry a note.
//!
//! Only a rendering hint: the note file stays authoritative and the store
//! never consults this index. Entries keep insertion order.

use doc_logger_types::{Annotation, AnnotationAction, EditorPosition, Note, NoteKey};
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct LocationIndex {
    entries: Vec<(NoteKey, EditorPosition)>,
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the position for `key`
    pub fn record(&mut self, key: NoteKey, position: EditorPosition) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = position,
            None => self.entries.push((key, position)),
        }
        log::debug!("[INDEX] {} entries", self.entries.len());
    }

    /// Remove the entry for `key`, returning its position if one existed
    pub fn forget(&mut self, key: &NoteKey) -> Option<EditorPosition> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// All entries for a workspace-relative path, in insertion order
    pub fn query<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a NoteKey, &'a EditorPosition)> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k.path == path)
            .map(|(k, p)| (k, p))
    }

    /// Annotations to render for a workspace-relative path
    pub fn annotations(&self, path: &str) -> Vec<Annotation> {
        self.query(path)
            .map(|(key, position)| Annotation {
                key: key.clone(),
                position: position.clone(),
                actions: AnnotationAction::ALL.to_vec(),
            })
            .collect()
    }

    /// Replace the contents with the records of a note file
    pub fn rebuild(&mut self, records: &[Note], workspace_root: &Path) {
        self.entries.clear();
        for note in records {
            let position = EditorPosition::new(
                workspace_root.join(&note.key.path),
                note.key.zero_based_line(),
            );
            self.record(note.key.clone(), position);
        }
        log::info!("[INDEX] Rebuilt with {} entries", self.entries.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
