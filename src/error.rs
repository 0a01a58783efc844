//! # Error Handling
//!
//! This module defines the centralized error type for `modmatch`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! the matching engine and its loaders can report.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries enough context (field
//!   names, repository identifiers, offending values) to explain the failure
//!   without a backtrace.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! Errors returned by a [`Repository`](crate::repository::Repository) search
//! are never wrapped or retried by the engine. They surface unchanged at the
//! first join point that awaits them.

use thiserror::Error;

/// Main error type for modmatch operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input handed to a builder, such as a value tuple whose arity
    /// does not match the field list.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A field was requested that neither the provenance wrapper nor the
    /// wrapped entity defines.
    #[error("Unit {unit} has no field '{field}'")]
    AttributeLookup { field: String, unit: String },

    /// A catalog query failed.
    ///
    /// Produced by repository implementations; the engine passes it through
    /// verbatim.
    #[error("Catalog query failed for repository {repo_id}: {message}")]
    CatalogQuery { repo_id: String, message: String },

    /// A module artifact could not be parsed as `name-[epoch:]version-release.arch`.
    #[error("Invalid NEVRA string: '{value}'")]
    InvalidNevra { value: String },

    /// An error occurred while parsing a selector or catalog document.
    #[error(
        "Configuration parsing error: {message}{}",
        hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default()
    )]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the document
        hint: Option<String>,
    },

    /// A worker task ended without delivering its result.
    #[error("Worker task lost before completion: {context}")]
    WorkerLost { context: String },

    /// The worker pool could not be built.
    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
