//! Infrastructure-level errors (wraps application errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Process environment could not be queried
    #[error("cannot determine {what}")]
    Environment {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Rendering to the terminal failed (closed pipe and similar)
    #[error("cannot write {what} to stdout")]
    Output {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("project directory does not exist: {0}")]
    ProjectDir(PathBuf),
}

impl InfraError {
    pub fn output(what: &'static str, source: std::io::Error) -> Self {
        Self::Output { what, source }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
