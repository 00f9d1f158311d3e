//! Domain-specific error types for the link manager.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors ([`RepoError`], [`StorageError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! RepoError
//! ├── DeclarationNotFound / DeclarationAlreadyExists — declaration lookups
//! ├── TagNotFound / TagAlreadyExists                 — (name, tag) lookups
//! ├── BindNotFound / BindAlreadyExists               — bind lookups
//! └── Storage(StorageError)                          — persisted-config I/O
//! ```

use thiserror::Error;

/// Errors returned by repository and activation operations.
#[derive(Error, Debug)]
pub enum RepoError {
    /// The named declaration does not exist.
    #[error("No such link declaration: '{0}'")]
    DeclarationNotFound(String),

    /// A declaration with this name already exists.
    #[error("Link declaration '{0}' already exists")]
    DeclarationAlreadyExists(String),

    /// No link value matches the given `(name, tag)` pair.
    #[error("No such tag '{tag}' under link '{name}'")]
    TagNotFound {
        /// Declaration name that was searched.
        name: String,
        /// Tag that was not found.
        tag: String,
    },

    /// A link value for this `(name, tag)` pair already exists.
    #[error("Tag '{tag}' already exists under link '{name}'")]
    TagAlreadyExists {
        /// Declaration name holding the tag.
        name: String,
        /// Tag that already has a value.
        tag: String,
    },

    /// No bind matches the given source and target coordinates.
    #[error("No such bind from '{source_name}:{source_tag}'")]
    BindNotFound {
        /// Source declaration name of the missing bind.
        source_name: String,
        /// Source tag of the missing bind.
        source_tag: String,
    },

    /// An identical bind is already registered.
    #[error("Bind '{source_name}:{source_tag}' -> '{target_name}:{target_tag}' already exists")]
    BindAlreadyExists {
        /// Source declaration name.
        source_name: String,
        /// Source tag gating the bind.
        source_tag: String,
        /// Target declaration name.
        target_name: String,
        /// Target tag to activate.
        target_tag: String,
    },

    /// The persisted configuration could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors that arise from reading or writing the persisted configuration.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration could not be written back.
    #[error("Failed to write configuration {path}: {source}")]
    Write {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file contains invalid JSON.
    #[error("Invalid JSON in configuration {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// The in-memory configuration could not be serialized for writing.
    #[error("Failed to serialize configuration {path}: {source}")]
    Serialize {
        /// Path of the configuration file.
        path: String,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
}
