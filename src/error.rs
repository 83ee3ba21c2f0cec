//! Error types surfaced to host callers.

use thiserror::Error;

/// The single error code this layer reports to the host. No structured
/// sub-codes are distinguished; the message carries the detail.
pub const ERROR_CODE: &str = "ERROR";

/// A failed scan request as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScanError {
    /// Human-readable diagnostic, passed through unchanged from the layer
    /// that produced it.
    pub message: String,
}

impl ScanError {
    /// Create an error from a diagnostic message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error code paired with this error on the host bridge.
    pub fn code(&self) -> &'static str {
        ERROR_CODE
    }
}
