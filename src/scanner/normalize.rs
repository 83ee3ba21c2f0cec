//! Completion payload normalization.
//!
//! Pure mapping from a capability's raw completion payload to the uniform
//! caller-facing outcome. No side effects, no suspension.

use super::outcome::{RawCompletion, ScanOutcome};

/// Scheme prefix native scanners report for local files.
const FILE_SCHEME: &str = "file://";

/// Diagnostic for a completion that carried neither artifacts nor an error.
pub const NO_ARTIFACTS_MESSAGE: &str = "no artifacts returned";

/// Strip a local-file scheme prefix, leaving other locations untouched.
pub fn strip_file_scheme(location: &str) -> &str {
    location.strip_prefix(FILE_SCHEME).unwrap_or(location)
}

/// Map a raw completion payload to the outcome delivered to the caller.
///
/// Page order is preserved: downstream consumers treat it as the document's
/// page order. An error message takes precedence over any artifacts that
/// arrived alongside it.
pub fn normalize(raw: RawCompletion) -> ScanOutcome {
    match raw {
        RawCompletion::Completed {
            error: Some(message),
            ..
        } => ScanOutcome::Failed { message },
        RawCompletion::Completed {
            artifacts: Some(locations),
            ..
        } => ScanOutcome::Success {
            pages: locations
                .iter()
                .map(|location| strip_file_scheme(location).to_string())
                .collect(),
        },
        RawCompletion::Completed { .. } => ScanOutcome::failed(NO_ARTIFACTS_MESSAGE),
        RawCompletion::Dismissed => ScanOutcome::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_file_scheme() {
        assert_eq!(strip_file_scheme("file:///tmp/a.jpg"), "/tmp/a.jpg");
        assert_eq!(strip_file_scheme("/tmp/a.jpg"), "/tmp/a.jpg");
        assert_eq!(strip_file_scheme("content://media/1"), "content://media/1");
        assert_eq!(strip_file_scheme(""), "");
    }

    #[test]
    fn test_stripped_location_is_byte_identical_suffix() {
        let location = "file:///var/data/scan 1 (copy).png";
        let stripped = strip_file_scheme(location);
        assert_eq!(stripped, &location["file://".len()..]);
    }

    #[test]
    fn test_artifacts_become_success_in_order() {
        let raw = RawCompletion::with_artifacts(vec![
            "file:///tmp/a.jpg".to_string(),
            "file:///tmp/b.jpg".to_string(),
            "/tmp/c.jpg".to_string(),
        ]);
        assert_eq!(
            normalize(raw),
            ScanOutcome::Success {
                pages: vec![
                    "/tmp/a.jpg".to_string(),
                    "/tmp/b.jpg".to_string(),
                    "/tmp/c.jpg".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_empty_artifact_list_is_still_success() {
        let raw = RawCompletion::with_artifacts(Vec::new());
        assert_eq!(normalize(raw), ScanOutcome::Success { pages: Vec::new() });
    }

    #[test]
    fn test_error_message_passes_through_verbatim() {
        let raw = RawCompletion::with_error("capture session interrupted");
        assert_eq!(
            normalize(raw),
            ScanOutcome::failed("capture session interrupted")
        );
    }

    #[test]
    fn test_error_takes_precedence_over_artifacts() {
        let raw = RawCompletion::Completed {
            error: Some("lens failure".to_string()),
            artifacts: Some(vec!["file:///tmp/a.jpg".to_string()]),
        };
        assert_eq!(normalize(raw), ScanOutcome::failed("lens failure"));
    }

    #[test]
    fn test_malformed_payload() {
        let raw = RawCompletion::Completed {
            error: None,
            artifacts: None,
        };
        assert_eq!(normalize(raw), ScanOutcome::failed(NO_ARTIFACTS_MESSAGE));
    }

    #[test]
    fn test_dismissed_becomes_cancelled() {
        assert_eq!(normalize(RawCompletion::Dismissed), ScanOutcome::Cancelled);
    }

    #[test]
    fn test_normalize_is_referentially_transparent() {
        let raw = RawCompletion::with_artifacts(vec!["file:///tmp/a.jpg".to_string()]);
        assert_eq!(normalize(raw.clone()), normalize(raw));
    }
}
