//! Document scan orchestration core.
//!
//! Tracks at most one in-flight scan request, launches a primary scanning
//! capability, falls back to a secondary one when the primary is
//! unavailable, and correlates the asynchronous completion signal back to
//! the waiting caller by request tag.
//!
//! # Architecture
//!
//! Capabilities implement the [`ScanCapability`] trait and report their
//! completions through a [`CompletionHub`]. The [`ScanOrchestrator`] owns
//! the single pending-request slot and subscribes to the hub; a completion
//! signal whose [`RequestTag`] does not match the pending request is dropped
//! silently. Raw payloads pass through [`normalize`] before delivery.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docuscan::scanner::{
//!     CompletionHub, RequestTag, ScanOptions, ScanOrchestrator, SimulatedBehavior,
//!     SimulatedScanner,
//! };
//!
//! let hub = Arc::new(CompletionHub::new());
//! let primary = Arc::new(SimulatedScanner::new(
//!     RequestTag::PRIMARY,
//!     "primary",
//!     SimulatedBehavior::Capture { pages: 3 },
//!     output_dir.clone(),
//!     hub.clone(),
//! ));
//! let fallback = Arc::new(SimulatedScanner::new(
//!     RequestTag::FALLBACK,
//!     "fallback",
//!     SimulatedBehavior::Capture { pages: 3 },
//!     output_dir,
//!     hub.clone(),
//! ));
//!
//! let orchestrator = Arc::new(ScanOrchestrator::new(primary, fallback));
//! hub.attach(orchestrator.clone());
//! let outcome = orchestrator.request(ScanOptions::default()).await;
//! ```

mod capability;
mod normalize;
mod options;
mod orchestrator;
mod outcome;
mod signal;
mod simulated;

pub use capability::{LaunchOutcome, RequestTag, ScanCapability};
pub use normalize::{normalize, strip_file_scheme, NO_ARTIFACTS_MESSAGE};
pub use options::{OutputFormat, ScanOptions, DEFAULT_COMPRESSION_QUALITY, DEFAULT_MAX_PAGES};
pub use orchestrator::{
    ScanOrchestrator, SCAN_IN_PROGRESS, START_FALLBACK_FAILED, START_SCANNER_FAILED,
};
pub use outcome::{RawCompletion, ScanOutcome};
pub use signal::{CompletionHub, CompletionSubscriber};
pub use simulated::{SimulatedBehavior, SimulatedScanner};
