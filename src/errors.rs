/*!
 * Error types for the prova application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors for input the structuring engine refuses outright.
///
/// Text that parses but yields no speakers is not an error; it produces a
/// degenerate script instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Input is empty or holds only whitespace and control characters
    #[error("Input text is blank")]
    BlankInput,

    /// Input exceeds the configured size cap
    #[error("Input text too large: {len} bytes (max {max})")]
    InputTooLarge {
        /// Input size in bytes
        len: usize,
        /// Configured maximum in bytes
        max: usize,
    },
}

/// Errors that can occur while acquiring document text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The source does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The source cannot be read with the current permissions
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The source exceeds the import size cap
    #[error("Document too large: {size} bytes (max {max})")]
    TooLarge {
        /// Source size in bytes
        size: u64,
        /// Configured maximum in bytes
        max: u64,
    },

    /// The source could not be read or decoded
    #[error("Unreadable document: {0}")]
    Unreadable(String),

    /// The source holds no usable text
    #[error("Document contains no text")]
    Empty,
}

impl ImportError {
    /// Map an I/O error on `path` to the matching import error.
    pub fn from_io(error: &std::io::Error, path: &str) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_string()),
            _ => Self::Unreadable(format!("{}: {}", path, error)),
        }
    }
}

/// Errors that can occur during speech playback
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// No speech backend is available
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    /// An utterance failed
    #[error("Speech failed: {0}")]
    Failed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from the structuring engine
    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    /// Error from document import
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Error from speech playback
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Requested character is not in the script
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Config(error.to_string())
    }
}
