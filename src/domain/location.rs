use std::path::{Component, Path, PathBuf};

/// Where a note lives, relative to the notes root.
///
/// A location is a `(subdirectory, filename, extension)` triple. The
/// subdirectory may be empty or nested (`projects/2024`), but must stay inside
/// the root: absolute paths and `..` components are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteLocation {
    subdirectory: PathBuf,
    filename: String,
    extension: String,
}

impl NoteLocation {
    /// Creates a new location.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// - the filename is empty, `.` or `..`, or contains a path separator
    /// - the subdirectory is absolute or escapes the root via `..`
    pub fn new(
        subdirectory: impl Into<PathBuf>,
        filename: impl Into<String>,
        extension: impl Into<String>,
    ) -> Result<Self, Error> {
        let subdirectory = subdirectory.into();
        let filename = filename.into();
        let extension = extension.into();

        if filename.is_empty() {
            return Err(Error::EmptyFilename);
        }
        if filename.contains(['/', std::path::MAIN_SEPARATOR]) {
            return Err(Error::SeparatorInFilename(filename));
        }
        if filename == "." || filename == ".." {
            return Err(Error::ReservedFilename(filename));
        }
        if extension.contains(['/', std::path::MAIN_SEPARATOR]) {
            return Err(Error::SeparatorInExtension(extension));
        }

        for component in subdirectory.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::OutsideRoot(subdirectory));
                }
            }
        }

        Ok(Self {
            subdirectory,
            filename,
            extension,
        })
    }

    /// The subdirectory, relative to the notes root.
    #[must_use]
    pub fn subdirectory(&self) -> &Path {
        &self.subdirectory
    }

    /// The filename, without extension.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// The file extension, without the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The file's base name, `filename.extension`.
    ///
    /// An empty extension yields the bare filename.
    #[must_use]
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.filename.clone()
        } else {
            format!("{}.{}", self.filename, self.extension)
        }
    }
}

/// Reasons a [`NoteLocation`] can be rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The filename was empty.
    #[error("note filename cannot be empty")]
    EmptyFilename,

    /// The filename contained a path separator.
    #[error("note filename '{0}' cannot contain a path separator")]
    SeparatorInFilename(String),

    /// The filename was `.` or `..`, which name directories.
    #[error("'{0}' is not a valid note filename")]
    ReservedFilename(String),

    /// The extension contained a path separator.
    #[error("note extension '{0}' cannot contain a path separator")]
    SeparatorInExtension(String),

    /// The subdirectory is absolute or climbs out of the notes root.
    #[error("subdirectory '{}' must be relative to the notes root", .0.display())]
    OutsideRoot(PathBuf),
}
