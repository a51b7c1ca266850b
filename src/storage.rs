pub mod directory;
/// External editor and conflict-prompt collaborators.
pub mod editor;
mod search;

pub use directory::{
    ConflictChoice, CreateError, CreateOutcome, DeleteError, Directory, FilesystemError,
};
pub use editor::{ConflictPrompt, Editor, EditorError, ExternalEditor, LinePrompt};
pub use search::Matcher;
