use std::path::{Path, PathBuf};

use crate::domain::{NoteLocation, Templates};

/// The default notes root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "notes";

/// The extension used when none is given.
pub const DEFAULT_EXTENSION: &str = "tex";

/// The editor used when `$EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";

/// Configuration for a single run of the notes manager.
///
/// This is constructed once at startup and shared read-only by every
/// component. There is no configuration file; the values come from the
/// command line, the environment, or the defaults above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The root of the notes directory tree.
    root: PathBuf,

    /// The extension used for `create` and `remove` when none is given.
    default_extension: String,

    /// The editor command notes are opened with.
    editor: String,

    /// The templates new notes are seeded from.
    templates: Templates,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl Config {
    /// Creates a configuration rooted at `root`, with default settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_extension: DEFAULT_EXTENSION.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            templates: Templates::default(),
        }
    }

    /// Sets the editor command.
    #[must_use]
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    /// Sets the default extension.
    #[must_use]
    pub fn with_default_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = extension.into();
        self
    }

    /// The root of the notes directory tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The extension used when none is given.
    #[must_use]
    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    /// The editor command.
    #[must_use]
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// The template registry.
    #[must_use]
    pub const fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Computes the on-disk path of a note.
    ///
    /// This is pure path composition and touches no files:
    /// `root/subdirectory/filename.extension`.
    #[must_use]
    pub fn resolve(&self, location: &NoteLocation) -> PathBuf {
        self.root
            .join(location.subdirectory())
            .join(location.file_name())
    }

    /// The directory a note lives in, `root/subdirectory`.
    #[must_use]
    pub fn folder(&self, location: &NoteLocation) -> PathBuf {
        self.root.join(location.subdirectory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.root(), Path::new("notes"));
        assert_eq!(config.default_extension(), "tex");
        assert_eq!(config.editor(), "vim");
        assert!(config.templates().get("tex").is_some());
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new("/tmp/n")
            .with_editor("nano")
            .with_default_extension("md");

        assert_eq!(config.editor(), "nano");
        assert_eq!(config.default_extension(), "md");
    }

    #[test]
    fn resolve_composes_root_subdirectory_and_name() {
        let config = Config::new("/home/me/notes");
        let location = NoteLocation::new("projects/2024", "alpha", "md").unwrap();

        assert_eq!(
            config.resolve(&location),
            PathBuf::from("/home/me/notes/projects/2024/alpha.md")
        );
        assert_eq!(
            config.folder(&location),
            PathBuf::from("/home/me/notes/projects/2024")
        );
    }

    #[test]
    fn resolve_is_deterministic_and_pure() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("notes");
        let config = Config::new(&root);
        let location = NoteLocation::new("a/b", "c", "txt").unwrap();

        let first = config.resolve(&location);
        let second = config.resolve(&location);

        assert_eq!(first, second);
        assert!(!root.exists());
    }

    #[test]
    fn resolve_with_empty_subdirectory() {
        let config = Config::new("notes");
        let location = NoteLocation::new("", "todo", "txt").unwrap();

        assert_eq!(config.resolve(&location), PathBuf::from("notes/todo.txt"));
    }
}
