//! # Error Handling
//!
//! This module defines the centralized error type for the dependency
//! duplicator. It uses the `thiserror` library to describe every failure the
//! library can report, each with enough context to point the user at the
//! offending project, pattern or graph.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes: configuration parsing,
//!   invalid match patterns, per-project configuration errors, cycles and
//!   duplicate identities found while ordering the reactor, and graph
//!   implementations that cannot accept a rebuilt ordering.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! None of these errors abort a propagation pass on their own. The phases
//! decide which ones degrade to a diagnostic and which ones are returned.

use thiserror::Error;

/// Main error type for dependency duplication
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest or a duplicator configuration block could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A dependency key pattern is not a valid regular expression.
    #[error("Invalid dependency pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A configuration error attributed to the project whose rules were being resolved.
    #[error("Configuration error in {project}: {source}")]
    ProjectConfig {
        project: String,
        #[source]
        source: Box<Error>,
    },

    /// A project identity is not of the form `group:artifact:version`.
    #[error("Invalid project id '{value}', expected group:artifact:version")]
    InvalidProjectId { value: String },

    /// The reactor contains a dependency cycle.
    #[error("Cycle detected in project dependencies: {cycle}")]
    CycleDetected { cycle: String },

    /// Two projects in the reactor share the same identity.
    #[error("Duplicate project in reactor: {id}")]
    DuplicateProject { id: String },

    /// A project was referenced that is not part of the graph.
    #[error("Project not found in reactor: {id}")]
    ProjectNotFound { id: String },

    /// The graph implementation cannot accept a rebuilt ordering.
    #[error("Unsupported project graph {graph}: {message}")]
    GraphShape { graph: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attributes this error to `project`.
    pub fn in_project(self, project: impl ToString) -> Self {
        Error::ProjectConfig {
            project: project.to_string(),
            source: Box::new(self),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
