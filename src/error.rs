//! Error types surfaced by the engine and its collaborators.

use thiserror::Error;

/// Failure reported by a host buffer while applying an edit batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("Edit out of bounds: line {line}, col {col}")]
    OutOfBounds { line: u32, col: u32 },

    #[error("Edits overlap")]
    Overlap,

    #[error("Buffer is read-only")]
    ReadOnly,

    #[error("Buffer error: {0}")]
    Other(String),
}

/// Malformed key notation such as `"<C-"` or `"<Foo>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyNotationError {
    #[error("Empty key notation")]
    Empty,

    #[error("Unknown key name: <{0}>")]
    UnknownKey(String),

    #[error("Modifier without a key: <{0}>")]
    DanglingModifier(String),
}

/// Problems in user configuration that prevent it from being loaded at all.
///
/// Per-entry remapping problems are not errors; they are reported through
/// [`crate::config::ValidatorResults`] and the offending entry is dropped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid leader key {0:?}")]
    InvalidLeader(String),
}

/// Errors returned by [`crate::Engine::handle_event`].
///
/// Unrecognised keys are not errors: they are dropped silently.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Key notation error: {0}")]
    Notation(#[from] KeyNotationError),
}

/// Engine result
pub type EngineResult<T> = Result<T, EngineError>;
