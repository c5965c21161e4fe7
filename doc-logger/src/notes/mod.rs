//! Notes system — a markdown log of notes anchored to `path:line`
//!
//! Each note is a 4-line record in `NOTES.md` at the workspace root.
//! The in-memory location index tells hosts which lines to annotate.

pub mod file_ops;
pub mod location_index;
pub mod record;
pub mod store;

pub use location_index::LocationIndex;
pub use store::NoteStore;
