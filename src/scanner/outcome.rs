//! Raw and normalized scan completion payloads.

/// Payload attached to a capability's completion signal.
///
/// Both capabilities report through this one shape, so the orchestrator and
/// the normalizer need no capability-specific branching beyond tag routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCompletion {
    /// The capture flow finished and handed back a result.
    Completed {
        /// Error reported by the capture flow, if any.
        error: Option<String>,
        /// Locations of the produced page images, in scan order. Local files
        /// may carry a `file://` scheme prefix.
        artifacts: Option<Vec<String>>,
    },
    /// The user dismissed the capture flow without completing it.
    Dismissed,
}

impl RawCompletion {
    /// A completion carrying page artifacts.
    pub fn with_artifacts(artifacts: Vec<String>) -> Self {
        RawCompletion::Completed {
            error: None,
            artifacts: Some(artifacts),
        }
    }

    /// A completion carrying an error message.
    pub fn with_error(message: impl Into<String>) -> Self {
        RawCompletion::Completed {
            error: Some(message.into()),
            artifacts: None,
        }
    }
}

/// Normalized scan result delivered to the waiting caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Capture finished. `pages` holds plain filesystem paths in scan order;
    /// an empty list means the flow completed with zero pages.
    Success { pages: Vec<String> },
    /// The user cancelled the capture flow. Not an error.
    Cancelled,
    /// The scan failed. The message is reported to the caller unchanged.
    Failed { message: String },
}

impl ScanOutcome {
    /// A failed outcome from a diagnostic message.
    pub fn failed(message: impl Into<String>) -> Self {
        ScanOutcome::Failed {
            message: message.into(),
        }
    }
}
