//! A filesystem backed store of notes
//!
//! The [`Directory`] owns the notes root. It resolves note locations to
//! paths, seeds new notes from templates and hands them to an [`Editor`], and
//! removes notes. Searching and listing live in the sibling `search` module.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::Local;

use crate::{
    domain::{Config, NoteLocation, Template},
    storage::editor::{ConflictPrompt, Editor, EditorError},
};

/// A filesystem backed store of notes.
#[derive(Debug, Clone)]
pub struct Directory {
    config: Config,
}

impl Directory {
    /// Opens the notes directory described by `config`.
    ///
    /// The root directory is created (with any missing ancestors) if it does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn open(config: Config) -> Result<Self, FilesystemError> {
        create_dir_all(config.root())?;
        Ok(Self { config })
    }

    /// The configuration this directory was opened with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The root of the notes tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.config.root()
    }

    /// The on-disk path of a note. No filesystem access is performed.
    #[must_use]
    pub fn path_for(&self, location: &NoteLocation) -> PathBuf {
        self.config.resolve(location)
    }

    /// Creates `root/subdirectory` and any missing ancestors.
    ///
    /// This is a no-op if the directory already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, for example
    /// because of missing permissions or a file in the way.
    pub fn ensure_dir(&self, subdirectory: &Path) -> Result<PathBuf, FilesystemError> {
        let path = self.root().join(subdirectory);
        create_dir_all(&path)?;
        Ok(path)
    }

    /// Whether a note exists at `location`.
    ///
    /// Directories are never notes, so a directory at the resolved path does
    /// not count.
    #[must_use]
    pub fn exists(&self, location: &NoteLocation) -> bool {
        is_note(&self.path_for(location))
    }

    /// Creates a note and opens it for editing.
    ///
    /// A new note is seeded from the template registered for its extension
    /// (or left empty if there is none) and then handed to `editor`.
    ///
    /// If the note already exists, `prompt` is asked what to do. See
    /// [`ConflictChoice`] for the accepted answers. Any other answer aborts
    /// the operation without touching the file or starting the editor.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - the subdirectory cannot be created
    /// - the note cannot be written
    /// - the conflict prompt cannot be read, or its answer is invalid
    /// - the editor fails
    pub fn create(
        &self,
        location: &NoteLocation,
        prompt: &mut impl ConflictPrompt,
        editor: &impl Editor,
    ) -> Result<CreateOutcome, CreateError> {
        self.ensure_dir(location.subdirectory())?;
        let path = self.path_for(location);

        let outcome = if is_note(&path) {
            let answer = prompt.ask(&path).map_err(CreateError::Prompt)?;
            match answer.parse::<ConflictChoice>()? {
                ConflictChoice::Overwrite => {
                    self.write_template(location, &path)?;
                    CreateOutcome::Overwritten(path)
                }
                ConflictChoice::Open => CreateOutcome::Opened(path),
            }
        } else {
            self.write_template(location, &path)?;
            CreateOutcome::Created(path)
        };

        editor.open(outcome.path())?;

        tracing::info!("{outcome}");
        Ok(outcome)
    }

    fn write_template(&self, location: &NoteLocation, path: &Path) -> Result<(), FilesystemError> {
        let content = self
            .config
            .templates()
            .get(location.extension())
            .map(|template| {
                let title = Template::title(location.filename(), Local::now().naive_local());
                template.instantiate(&title)
            })
            .unwrap_or_else(|| {
                tracing::debug!(
                    "No template for extension '{}', creating an empty note",
                    location.extension()
                );
                String::new()
            });

        fs::write(path, content).map_err(|source| FilesystemError {
            operation: Operation::Write,
            path: path.to_path_buf(),
            source,
        })
    }

    /// Deletes the note at `location`.
    ///
    /// Only the note itself is removed. The (possibly now empty) subdirectory
    /// is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::NotFound`] if there is no note at `location`, or
    /// [`DeleteError::Filesystem`] if it exists but cannot be removed.
    pub fn delete(&self, location: &NoteLocation) -> Result<PathBuf, DeleteError> {
        let path = self.path_for(location);

        if !is_note(&path) {
            return Err(DeleteError::NotFound(path));
        }

        fs::remove_file(&path).map_err(|source| FilesystemError {
            operation: Operation::Remove,
            path: path.clone(),
            source,
        })?;

        tracing::info!("Removed note {}", path.display());
        Ok(path)
    }
}

/// Links are followed: a link to a directory is not a note.
fn is_note(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| !metadata.is_dir())
}

fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    fs::create_dir_all(path).map_err(|source| FilesystemError {
        operation: Operation::CreateDir,
        path: path.to_path_buf(),
        source,
    })
}

/// What to do when creating a note that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Replace the content with a freshly instantiated template, then edit.
    ///
    /// Accepted answers: `1`, `overwrite`.
    Overwrite,

    /// Open the existing note unchanged.
    ///
    /// Accepted answers: `2`, `open`, `edit`.
    Open,
}

impl FromStr for ConflictChoice {
    type Err = CreateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "overwrite" => Ok(Self::Overwrite),
            "2" | "open" | "edit" => Ok(Self::Open),
            _ => Err(CreateError::InvalidChoice(s.to_string())),
        }
    }
}

/// The result of a successful [`Directory::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new note was created.
    Created(PathBuf),
    /// An existing note was replaced by a fresh template.
    Overwritten(PathBuf),
    /// An existing note was opened unchanged.
    Opened(PathBuf),
}

impl CreateOutcome {
    /// The path of the note.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Overwritten(path) | Self::Opened(path) => path,
        }
    }
}

impl fmt::Display for CreateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(path) => write!(f, "Created note {}", path.display()),
            Self::Overwritten(path) => write!(f, "Overwrote note {}", path.display()),
            Self::Opened(path) => write!(f, "Edited note {}", path.display()),
        }
    }
}

/// The filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Creating a directory.
    CreateDir,
    /// Writing a note.
    Write,
    /// Removing a note.
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateDir => "create directory",
            Self::Write => "write",
            Self::Remove => "remove",
        })
    }
}

/// An OS-level failure while touching the notes tree.
#[derive(Debug, thiserror::Error)]
#[error("failed to {operation} {}", path.display())]
pub struct FilesystemError {
    /// What was being attempted.
    pub operation: Operation,
    /// The path involved.
    pub path: PathBuf,
    /// The underlying error.
    #[source]
    pub source: io::Error,
}

/// Errors returned by [`Directory::create`].
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The filesystem refused an operation.
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// The answer to the conflict prompt could not be read.
    #[error("failed to read choice")]
    Prompt(#[source] io::Error),

    /// The answer to the conflict prompt was not a valid choice.
    #[error("invalid choice '{0}': expected 1 (overwrite) or 2 (open for editing)")]
    InvalidChoice(String),

    /// The editor failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Errors returned by [`Directory::delete`].
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// There is no note at the given location.
    #[error("note {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The note exists but could not be removed.
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}
