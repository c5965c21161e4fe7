//! doc-logger — attach free-text notes to `file:line` locations.
//!
//! Notes live in a shared markdown log at the workspace root and are
//! re-surfaced to editors through the location index.

pub mod commands;
pub mod config;
pub mod error;
pub mod notes;

pub use commands::{CommandOutcome, InputPrompt, PromptRequest, Session};
pub use config::Config;
pub use error::{DocLogError, Result};
pub use notes::{LocationIndex, NoteStore};

pub use doc_logger_types as types;
