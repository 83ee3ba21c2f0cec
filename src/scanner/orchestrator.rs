//! Scan request orchestration.
//!
//! Owns the single pending-request slot: launches the primary capability,
//! falls back to the secondary one when the primary is unavailable,
//! correlates the asynchronous completion signal back to the pending request
//! by tag, and delivers exactly one normalized response to the waiting
//! caller.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::capability::{LaunchOutcome, RequestTag, ScanCapability};
use super::normalize::normalize;
use super::options::ScanOptions;
use super::outcome::{RawCompletion, ScanOutcome};
use super::signal::CompletionSubscriber;

/// Diagnostic reported when the primary capability cannot start its flow.
pub const START_SCANNER_FAILED: &str = "failed to start document scanner";
/// Diagnostic reported when the fallback capability cannot start its flow.
pub const START_FALLBACK_FAILED: &str = "failed to start fallback scanner";
/// Diagnostic reported when a request arrives while another is pending.
pub const SCAN_IN_PROGRESS: &str = "scan already in progress";
/// Diagnostic reported when the pending slot disappears without a delivery.
const REQUEST_ABANDONED: &str = "scan request abandoned";

/// The single in-flight request: its active tag plus the caller's sink.
///
/// The sink is consumed exactly once, on the first matching completion
/// signal or on a synchronous launch failure.
struct PendingRequest {
    tag: RequestTag,
    sink: oneshot::Sender<ScanOutcome>,
}

/// Coordinates one scan request at a time across a capability pair.
///
/// The slot is the only mutable shared state. All transitions on it (tag
/// check, normalization, delivery, clear) run under one lock, so concurrent
/// completion signals can never interleave in a way that corrupts it.
pub struct ScanOrchestrator {
    primary: Arc<dyn ScanCapability>,
    fallback: Arc<dyn ScanCapability>,
    pending: Mutex<Option<PendingRequest>>,
}

impl ScanOrchestrator {
    /// Create an orchestrator over a primary/fallback capability pair.
    pub fn new(primary: Arc<dyn ScanCapability>, fallback: Arc<dyn ScanCapability>) -> Self {
        Self {
            primary,
            fallback,
            pending: Mutex::new(None),
        }
    }

    /// Whether a request is currently awaiting its completion signal.
    pub fn is_busy(&self) -> bool {
        self.pending.lock().unwrap().is_some()
    }

    /// Run one scan request to completion.
    ///
    /// A request arriving while another is pending is rejected immediately
    /// with [`SCAN_IN_PROGRESS`]; the in-flight caller keeps its slot. There
    /// is no timeout: if a launched capability never signals, the slot stays
    /// pending until the host tears the process down.
    pub async fn request(&self, options: ScanOptions) -> ScanOutcome {
        let receiver = {
            let mut pending = self.pending.lock().unwrap();
            if pending.is_some() {
                debug!("rejecting scan request: another request is pending");
                return ScanOutcome::failed(SCAN_IN_PROGRESS);
            }
            let (sink, receiver) = oneshot::channel();
            *pending = Some(PendingRequest {
                tag: self.primary.tag(),
                sink,
            });
            receiver
        };

        debug!(capability = self.primary.name(), "launching scan capability");
        match self.primary.try_launch(&options).await {
            LaunchOutcome::Started => {}
            LaunchOutcome::Unavailable(reason) => {
                debug!(
                    capability = self.primary.name(),
                    %reason,
                    "primary capability unavailable, trying fallback"
                );
                self.retag_pending(self.fallback.tag());
                match self.fallback.try_launch(&options).await {
                    LaunchOutcome::Started => {}
                    LaunchOutcome::Unavailable(reason) | LaunchOutcome::StartFailed(reason) => {
                        warn!(
                            capability = self.fallback.name(),
                            %reason,
                            "fallback capability failed to start"
                        );
                        self.fail_pending(START_FALLBACK_FAILED);
                    }
                }
            }
            LaunchOutcome::StartFailed(reason) => {
                warn!(
                    capability = self.primary.name(),
                    %reason,
                    "primary capability failed to start"
                );
                self.fail_pending(START_SCANNER_FAILED);
            }
        }

        match receiver.await {
            Ok(outcome) => outcome,
            // Only reachable if the slot were dropped without a send; report
            // a failed scan instead of panicking inside the host.
            Err(_) => ScanOutcome::failed(REQUEST_ABANDONED),
        }
    }

    /// Process one completion signal.
    ///
    /// A signal whose tag does not match the pending request, or that
    /// arrives with no request pending, is dropped without effect. Returns
    /// whether the signal was consumed.
    pub fn handle_completion(&self, tag: RequestTag, payload: RawCompletion) -> bool {
        let mut slot = self.pending.lock().unwrap();
        match &*slot {
            Some(pending) if pending.tag == tag => {}
            _ => {
                debug!(%tag, "dropping completion signal with no matching request");
                return false;
            }
        }

        if let Some(pending) = slot.take() {
            let outcome = normalize(payload);
            if pending.sink.send(outcome).is_err() {
                warn!(%tag, "scan caller went away before delivery");
            }
        }
        true
    }

    /// Swap the pending request's tag, preserving the caller's sink.
    fn retag_pending(&self, tag: RequestTag) {
        if let Some(pending) = self.pending.lock().unwrap().as_mut() {
            pending.tag = tag;
        }
    }

    /// Deliver a failure for the pending request and clear the slot.
    fn fail_pending(&self, message: &str) {
        if let Some(pending) = self.pending.lock().unwrap().take() {
            let _ = pending.sink.send(ScanOutcome::failed(message));
        }
    }
}

impl CompletionSubscriber for ScanOrchestrator {
    fn on_completion(&self, tag: RequestTag, payload: RawCompletion) -> bool {
        self.handle_completion(tag, payload)
    }
}
