//! Error types for the bridge layer.
//!
//! Only one failure originates here: looking up a key that was never
//! registered. Everything else — decoding problems, missing models, pipeline
//! failures inside the engine — is the engine's to report and passes through
//! [`BridgeError::Engine`] unmodified. No retries, no partial-failure
//! recovery.

use thiserror::Error;

use crate::registry::DocKey;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors produced by registry and extraction operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A lookup used a key that is not present in the registry.
    #[error("unknown document key: {0}")]
    UnknownKey(DocKey),

    /// Paired inputs (texts and docnames) had different lengths.
    #[error("expected one docname per text: {texts} texts, {docnames} docnames")]
    LengthMismatch { texts: usize, docnames: usize },

    /// A failure raised by the external engine, surfaced as-is.
    #[error("engine error: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BridgeError {
    /// Wrap an engine-side failure.
    pub fn engine<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        BridgeError::Engine(err.into())
    }
}
