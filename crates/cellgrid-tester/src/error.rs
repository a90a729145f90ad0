//! Error handling for the cellgrid-tester crate.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for tester operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running the tester.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Errors surfaced by the grid engine: bad boards, profiles or spans.
    #[error("Grid error: {0}")]
    Grid(#[from] cellgrid::Error),
    /// Failed to encode a JSON report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The command-line arguments do not describe a usable request.
    #[error("Invalid arguments: {0}")]
    Arguments(String),
}

impl Error {
    /// Helper to build an argument error from an arbitrary message.
    pub fn arguments<M: Into<String>>(msg: M) -> Self {
        Self::Arguments(msg.into())
    }
}
