//! Document scan orchestration for host applications.
//!
//! `docuscan` sits between a host application and two native scanning
//! capabilities: it tracks at most one in-flight scan request, launches the
//! primary capability, falls back to the secondary one when the primary is
//! unavailable, and correlates the asynchronous completion signal back to
//! the waiting caller by request tag, normalizing success, user cancellation
//! and failure into one uniform response.
//!
//! # Architecture
//!
//! - [`scanner`]: the orchestration core. Capability contract, request tags,
//!   the single pending-request slot, completion-signal routing and the
//!   payload normalizer.
//! - [`services`]: the host-facing service layer. `getPictures` and the
//!   loosely-typed method-call dispatch a host bridge calls into.
//! - [`config`]: settings and config file handling for scan defaults and the
//!   output directory.
//! - [`cli`]: a small demo CLI driving a simulated capability pair.

pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod services;

pub use error::ScanError;
pub use scanner::{ScanOptions, ScanOutcome};
pub use services::ScanService;
