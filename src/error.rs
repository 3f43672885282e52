//! Error types for the conversion engine and its collaborators.
//!
//! - `EngineError`: rejected before any conversion work starts
//! - `RemoteError`: anything that goes wrong talking to the translation endpoint
//! - `StoreError`: history persistence failures
//! - `OverlayError`: invalid custom mapping input

use thiserror::Error;

/// Errors surfaced to the caller of a conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Input was empty or whitespace only
    #[error("Please enter some text to convert.")]
    EmptyInput,
}

/// Failures of the remote translation path.
///
/// These never reach the end user directly; the engine turns them into a
/// local fallback and keeps the message for display.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Connection, DNS, TLS or timeout failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or "Unknown error"
        message: String,
    },

    /// Success status, but the body said otherwise
    #[error("{0}")]
    Rejected(String),

    /// Body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Stream broke while being read
    #[error("stream interrupted: {0}")]
    Stream(#[from] std::io::Error),

    /// Stream closed without producing any text
    #[error("stream ended without any output")]
    EmptyStream,
}

/// Errors from the translation history store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Nothing to save
    #[error("No content to save")]
    NothingToSave,

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// History file could not be encoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        StoreError::Io(err.error)
    }
}

/// Invalid input for a custom word mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// Word was empty after trimming
    #[error("Please enter a word to associate with emojis.")]
    MissingWord,

    /// No emoji left after splitting on spaces and commas
    #[error("Please enter valid emojis separated by spaces or commas.")]
    NoEmojis,
}
