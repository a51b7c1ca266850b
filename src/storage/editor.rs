use std::{
    io::{self, BufRead, Write},
    path::Path,
    process,
};

use crate::Config;

/// Something that can open a note for editing.
///
/// Implementations block until editing is finished.
pub trait Editor {
    /// Open the file at `path` for editing.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor cannot be started or reports failure.
    fn open(&self, path: &Path) -> Result<(), EditorError>;
}

/// Opens notes in an external editor process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Creates an editor which runs `command <path>`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Creates an editor using the configured editor command.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.editor())
    }
}

impl Editor for ExternalEditor {
    fn open(&self, path: &Path) -> Result<(), EditorError> {
        tracing::debug!("Launching '{}' on {}", self.command, path.display());

        // `status` waits for the child and reaps it, including on error paths.
        let status = process::Command::new(&self.command)
            .arg(path)
            .status()
            .map_err(|source| EditorError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(EditorError::ExitStatus {
                command: self.command.clone(),
                status,
            });
        }

        Ok(())
    }
}

/// The editor could not be run.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The editor process could not be started.
    #[error("failed to launch editor '{command}'")]
    Spawn {
        /// The editor command.
        command: String,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The editor exited unsuccessfully.
    #[error("editor '{command}' exited with {status}")]
    ExitStatus {
        /// The editor command.
        command: String,
        /// The exit status of the editor process.
        status: process::ExitStatus,
    },
}

/// Asks the user what to do when a note being created already exists.
pub trait ConflictPrompt {
    /// Ask for a choice about the existing note at `path`.
    ///
    /// Returns the raw answer; it is interpreted by the note store.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn ask(&mut self, path: &Path) -> io::Result<String>;
}

/// Prompts on stderr and reads a single line from a reader (usually stdin).
#[derive(Debug)]
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    /// Creates a prompt which reads answers from `reader`.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LinePrompt<io::StdinLock<'static>> {
    /// Creates a prompt reading from stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConflictPrompt for LinePrompt<R> {
    fn ask(&mut self, path: &Path) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(
            stderr,
            "{} already exists! 1 - overwrite, 2 - open for editing >>> ",
            path.display()
        )?;
        stderr.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
