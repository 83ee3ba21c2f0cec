//! Simulated scanning capability.
//!
//! Stands in for a native capture UI in the demo binary and in tests.
//! Behavior is scripted at construction time; a capture run writes one stub
//! page file per page and reports the locations with the same `file://`
//! scheme prefix native scanners use.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tracing::debug;

use super::capability::{LaunchOutcome, RequestTag, ScanCapability};
use super::options::ScanOptions;
use super::outcome::RawCompletion;
use super::signal::CompletionHub;

/// Scripted behavior for a [`SimulatedScanner`].
#[derive(Debug, Clone)]
pub enum SimulatedBehavior {
    /// Present the capture flow and produce `pages` pages, capped by the
    /// request's page limit.
    Capture { pages: u32 },
    /// Present the capture flow, then report that the user dismissed it.
    Cancel,
    /// Present the capture flow, then report a capture error.
    Fail { message: String },
    /// Report the capability as absent on this host.
    Unavailable { reason: String },
    /// Refuse to present the capture flow.
    RefuseLaunch { reason: String },
}

/// In-process capability with scripted behavior.
pub struct SimulatedScanner {
    tag: RequestTag,
    name: String,
    behavior: SimulatedBehavior,
    output_dir: PathBuf,
    hub: Arc<CompletionHub>,
    /// Delay between launch and completion, imitating the user driving the
    /// capture UI.
    capture_delay: Duration,
}

impl SimulatedScanner {
    /// Create a simulated scanner reporting through `hub` under `tag`.
    pub fn new(
        tag: RequestTag,
        name: impl Into<String>,
        behavior: SimulatedBehavior,
        output_dir: PathBuf,
        hub: Arc<CompletionHub>,
    ) -> Self {
        Self {
            tag,
            name: name.into(),
            behavior,
            output_dir,
            hub,
            capture_delay: Duration::ZERO,
        }
    }

    /// Delay completion signals by `delay` after a successful launch.
    pub fn with_capture_delay(mut self, delay: Duration) -> Self {
        self.capture_delay = delay;
        self
    }

    /// Write stub page files and return their locations in capture order.
    ///
    /// Files are named `YYYYMMDD-HHMMSS-<page>.<ext>`, matching the writer
    /// convention of the native capture flows this stands in for.
    fn capture_pages(
        options: &ScanOptions,
        pages: u32,
        output_dir: &Path,
    ) -> std::io::Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let mut artifacts = Vec::new();
        for page in 0..pages.min(options.max_pages) {
            let filename = format!("{stamp}-{page}.{}", options.output_format.extension());
            let path = output_dir.join(filename);
            // Placeholder bytes; a real capture flow writes encoded images.
            std::fs::write(&path, format!("page {page}\n"))?;
            artifacts.push(format!("file://{}", path.display()));
        }
        Ok(artifacts)
    }
}

#[async_trait]
impl ScanCapability for SimulatedScanner {
    fn tag(&self) -> RequestTag {
        self.tag
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn try_launch(&self, options: &ScanOptions) -> LaunchOutcome {
        let payload = match &self.behavior {
            SimulatedBehavior::Unavailable { reason } => {
                return LaunchOutcome::Unavailable(reason.clone());
            }
            SimulatedBehavior::RefuseLaunch { reason } => {
                return LaunchOutcome::StartFailed(reason.clone());
            }
            SimulatedBehavior::Cancel => RawCompletion::Dismissed,
            SimulatedBehavior::Fail { message } => RawCompletion::with_error(message.clone()),
            SimulatedBehavior::Capture { pages } => {
                match Self::capture_pages(options, *pages, &self.output_dir) {
                    Ok(artifacts) => RawCompletion::with_artifacts(artifacts),
                    Err(error) => {
                        RawCompletion::with_error(format!("could not write captured pages: {error}"))
                    }
                }
            }
        };

        debug!(capability = %self.name, "presenting simulated capture flow");
        let hub = self.hub.clone();
        let tag = self.tag;
        let delay = self.capture_delay;
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            hub.emit(tag, payload);
        });
        LaunchOutcome::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::options::OutputFormat;

    #[test]
    fn test_capture_writes_stub_pages() {
        let dir = tempfile::tempdir().unwrap();
        let options = ScanOptions {
            output_format: OutputFormat::Jpg,
            ..Default::default()
        };

        let artifacts = SimulatedScanner::capture_pages(&options, 3, dir.path()).unwrap();
        assert_eq!(artifacts.len(), 3);
        for location in &artifacts {
            assert!(location.starts_with("file://"));
            assert!(location.ends_with(".jpg"));
            assert!(Path::new(&location["file://".len()..]).exists());
        }
    }

    #[test]
    fn test_capture_respects_page_limit() {
        let dir = tempfile::tempdir().unwrap();
        let options = ScanOptions {
            max_pages: 2,
            ..Default::default()
        };

        let artifacts = SimulatedScanner::capture_pages(&options, 10, dir.path()).unwrap();
        assert_eq!(artifacts.len(), 2);
    }

    #[test]
    fn test_capture_zero_pages_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let options = ScanOptions::default();

        let artifacts = SimulatedScanner::capture_pages(&options, 0, dir.path()).unwrap();
        assert!(artifacts.is_empty());
    }
}
