//! Domain models for notes management.
//!
//! This module contains the core domain types: note locations, templates and
//! the immutable run configuration.

mod config;
pub use config::{Config, DEFAULT_EDITOR, DEFAULT_EXTENSION, DEFAULT_ROOT};

/// Note locations (subdirectory, filename, extension).
pub mod location;
pub use location::{Error as LocationError, NoteLocation};

/// Extension-specific note templates.
pub mod template;
pub use template::{Template, Templates};
