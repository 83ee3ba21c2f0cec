//! Host-facing scan service.
//!
//! Wraps the orchestration core in the two surfaces the host bridge calls
//! into: a typed `get_pictures` entry point and a loosely-typed method-call
//! dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::ScanError;
use crate::scanner::{CompletionHub, ScanCapability, ScanOptions, ScanOrchestrator, ScanOutcome};

/// Method-call message arriving from the host bridge.
#[derive(Debug, Clone)]
pub struct MethodCall {
    /// Method name, e.g. `"getPictures"`.
    pub method: String,
    /// Loosely-typed argument map, if any.
    pub args: Option<Value>,
}

impl MethodCall {
    /// Build a call from a method name and optional arguments.
    pub fn new(method: impl Into<String>, args: Option<Value>) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }
}

/// Reply returned across the host bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum CallReply {
    /// The call succeeded; the payload is the method's result value.
    Success(Value),
    /// The call failed with the layer's generic error code and a message.
    Error { code: String, message: String },
    /// The method is not implemented by this layer.
    NotImplemented,
}

/// Scan service owning the orchestrator and its hub registration.
///
/// Construction attaches the orchestrator as the hub's completion
/// subscriber; [`reattach`](ScanService::reattach) and
/// [`detach`](ScanService::detach) mirror the host surface lifecycle.
pub struct ScanService {
    orchestrator: Arc<ScanOrchestrator>,
    hub: Arc<CompletionHub>,
}

impl ScanService {
    /// Build a service over a primary/fallback capability pair reporting
    /// through `hub`.
    pub fn new(
        primary: Arc<dyn ScanCapability>,
        fallback: Arc<dyn ScanCapability>,
        hub: Arc<CompletionHub>,
    ) -> Arc<Self> {
        let orchestrator = Arc::new(ScanOrchestrator::new(primary, fallback));
        hub.attach(orchestrator.clone());
        Arc::new(Self { orchestrator, hub })
    }

    /// Re-register the orchestrator after the host surface re-attached.
    ///
    /// Safe to call repeatedly; the hub keeps a single subscriber, so this
    /// never produces duplicate deliveries.
    pub fn reattach(&self) {
        self.hub.attach(self.orchestrator.clone());
    }

    /// Stop receiving completion signals while the host surface is detached.
    pub fn detach(&self) {
        self.hub.detach();
    }

    /// Whether a scan request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    /// Run one scan request and return the produced page paths.
    ///
    /// An empty list means the user cancelled, or completed with zero pages.
    pub async fn get_pictures(&self, options: ScanOptions) -> Result<Vec<String>, ScanError> {
        match self.orchestrator.request(options).await {
            ScanOutcome::Success { pages } => Ok(pages),
            ScanOutcome::Cancelled => Ok(Vec::new()),
            ScanOutcome::Failed { message } => Err(ScanError::new(message)),
        }
    }

    /// Dispatch a loosely-typed method call from the host bridge.
    pub async fn handle_call(&self, call: MethodCall) -> CallReply {
        match call.method.as_str() {
            "getPictures" => {
                let options = ScanOptions::from_args(call.args.as_ref());
                match self.get_pictures(options).await {
                    Ok(pages) => CallReply::Success(Value::from(pages)),
                    Err(error) => CallReply::Error {
                        code: error.code().to_string(),
                        message: error.message,
                    },
                }
            }
            other => {
                debug!(method = other, "method not implemented");
                CallReply::NotImplemented
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{RequestTag, SimulatedBehavior, SimulatedScanner};
    use serde_json::json;

    fn service_with(
        primary_behavior: SimulatedBehavior,
        fallback_behavior: SimulatedBehavior,
        output_dir: std::path::PathBuf,
    ) -> Arc<ScanService> {
        let hub = Arc::new(CompletionHub::new());
        let primary = Arc::new(SimulatedScanner::new(
            RequestTag::PRIMARY,
            "simulated-primary",
            primary_behavior,
            output_dir.clone(),
            hub.clone(),
        ));
        let fallback = Arc::new(SimulatedScanner::new(
            RequestTag::FALLBACK,
            "simulated-fallback",
            fallback_behavior,
            output_dir,
            hub.clone(),
        ));
        ScanService::new(primary, fallback, hub)
    }

    #[tokio::test]
    async fn test_get_pictures_returns_paths() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(
            SimulatedBehavior::Capture { pages: 2 },
            SimulatedBehavior::Cancel,
            dir.path().to_path_buf(),
        );

        let pages = service.get_pictures(ScanOptions::default()).await.unwrap();
        assert_eq!(pages.len(), 2);
        for page in &pages {
            assert!(!page.starts_with("file://"));
            assert!(std::path::Path::new(page).exists());
        }
    }

    #[tokio::test]
    async fn test_cancellation_is_an_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(
            SimulatedBehavior::Cancel,
            SimulatedBehavior::Cancel,
            dir.path().to_path_buf(),
        );

        let pages = service.get_pictures(ScanOptions::default()).await.unwrap();
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_failure_carries_generic_code() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(
            SimulatedBehavior::Fail {
                message: "camera permission denied".to_string(),
            },
            SimulatedBehavior::Cancel,
            dir.path().to_path_buf(),
        );

        let error = service
            .get_pictures(ScanOptions::default())
            .await
            .unwrap_err();
        assert_eq!(error.code(), "ERROR");
        assert_eq!(error.message, "camera permission denied");
    }

    #[tokio::test]
    async fn test_unavailable_primary_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(
            SimulatedBehavior::Unavailable {
                reason: "not installed".to_string(),
            },
            SimulatedBehavior::Capture { pages: 1 },
            dir.path().to_path_buf(),
        );

        let pages = service.get_pictures(ScanOptions::default()).await.unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_handle_call_dispatches_get_pictures() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(
            SimulatedBehavior::Capture { pages: 1 },
            SimulatedBehavior::Cancel,
            dir.path().to_path_buf(),
        );

        let reply = service
            .handle_call(MethodCall::new("getPictures", Some(json!({ "maxPages": 1 }))))
            .await;
        match reply {
            CallReply::Success(Value::Array(pages)) => assert_eq!(pages.len(), 1),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_call_unknown_method() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with(
            SimulatedBehavior::Cancel,
            SimulatedBehavior::Cancel,
            dir.path().to_path_buf(),
        );

        let reply = service
            .handle_call(MethodCall::new("burnPictures", None))
            .await;
        assert_eq!(reply, CallReply::NotImplemented);
    }
}
