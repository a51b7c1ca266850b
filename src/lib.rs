//! Plain-text Notes Management
//!
//! Notes are plain-text files stored in a directory tree. New notes are
//! seeded from per-extension templates and handed to an external editor.

pub mod domain;
pub use domain::{Config, LocationError, NoteLocation, Template, Templates};

/// Filesystem storage, search and listing of notes.
pub mod storage;
pub use storage::{
    ConflictChoice, ConflictPrompt, CreateError, CreateOutcome, DeleteError, Directory, Editor,
    EditorError, ExternalEditor, FilesystemError, LinePrompt, Matcher,
};
