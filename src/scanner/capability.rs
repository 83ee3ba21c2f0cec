//! Capability adapter contract.

use std::fmt;

use async_trait::async_trait;

use super::options::ScanOptions;

/// Correlation tag identifying which capability a pending completion signal
/// belongs to.
///
/// Exactly two values are in use, one per capability role. The constants sit
/// high in the request-code space so they never collide with identifiers the
/// host application uses for its own requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag(u32);

impl RequestTag {
    /// Tag stamped by the first-choice scanning capability.
    pub const PRIMARY: RequestTag = RequestTag(0x0036_2738);
    /// Tag stamped by the second-choice scanning capability.
    pub const FALLBACK: RequestTag = RequestTag(0x0036_2737);
}

impl fmt::Display for RequestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Result of asking a capability to present its capture flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The capture flow is on screen; exactly one completion signal follows.
    Started,
    /// The capability is absent or unsupported on this host.
    Unavailable(String),
    /// The capability exists but its capture flow could not be presented.
    StartFailed(String),
}

/// One native scanning mechanism behind a launch-plus-completion contract.
///
/// A successfully launched capability later emits exactly one completion
/// signal tagged with its own fixed [`RequestTag`] and carrying a
/// [`RawCompletion`](super::RawCompletion) payload. Capture internals
/// (camera UI, edge detection, image encoding) live behind this boundary.
#[async_trait]
pub trait ScanCapability: Send + Sync {
    /// The fixed correlation tag this capability stamps on its completions.
    fn tag(&self) -> RequestTag;

    /// Capability name for logging.
    fn name(&self) -> &str;

    /// Attempt to present the capture flow for `options`.
    async fn try_launch(&self, options: &ScanOptions) -> LaunchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tags_are_distinct() {
        assert_ne!(RequestTag::PRIMARY, RequestTag::FALLBACK);
    }

    #[test]
    fn test_tag_display_is_hex() {
        assert_eq!(RequestTag::PRIMARY.to_string(), "0x362738");
        assert_eq!(RequestTag::FALLBACK.to_string(), "0x362737");
    }
}
