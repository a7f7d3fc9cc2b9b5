//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use azct_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No handler registered for the type key, and no default handler either
    #[error("Handler not found: {0}")]
    NotFound(String),

    /// A provider call failed; navigation state was left untouched
    #[error("Failed to {operation}: {source}")]
    FetchFailed {
        operation: String,
        source: ProviderError,
    },

    /// A storage key whose structure could not be interpreted
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// A selection-dependent action arrived with nothing selected
    #[error("Nothing selected")]
    NothingSelected,

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(String),
}

impl CoreError {
    /// Wrap a provider error with the operation that produced it.
    pub fn fetch(operation: impl Into<String>, source: ProviderError) -> Self {
        Self::FetchFailed {
            operation: operation.into(),
            source,
        }
    }

    /// Whether it is expected behavior (missing handler, empty selection, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::MalformedKey(_) | Self::NothingSelected => true,
            Self::FetchFailed { source, .. } => source.is_expected(),
            Self::Config(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
