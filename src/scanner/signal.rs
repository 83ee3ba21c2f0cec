//! Completion-signal intake and subscriber registration.
//!
//! Host surfaces attach and detach across their lifecycle (including
//! re-attachment after configuration changes). The hub keeps a single
//! subscriber: attaching replaces any previous registration, so
//! re-attachment never produces duplicate deliveries.

use std::sync::{Arc, Mutex};

use tracing::trace;

use super::capability::RequestTag;
use super::outcome::RawCompletion;

/// Receiver side of the completion-signal contract.
pub trait CompletionSubscriber: Send + Sync {
    /// Handle one completion signal. Returns whether it was consumed.
    fn on_completion(&self, tag: RequestTag, payload: RawCompletion) -> bool;
}

/// Routes capability completion signals to the single registered subscriber.
///
/// Signals arriving while nothing is attached are dropped.
#[derive(Default)]
pub struct CompletionHub {
    subscriber: Mutex<Option<Arc<dyn CompletionSubscriber>>>,
}

impl CompletionHub {
    /// Create a hub with no subscriber attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `subscriber`, replacing any previous registration.
    pub fn attach(&self, subscriber: Arc<dyn CompletionSubscriber>) {
        *self.subscriber.lock().unwrap() = Some(subscriber);
    }

    /// Remove the current subscriber, if any.
    pub fn detach(&self) {
        *self.subscriber.lock().unwrap() = None;
    }

    /// Deliver one completion signal to the current subscriber.
    ///
    /// Returns whether a subscriber consumed the signal.
    pub fn emit(&self, tag: RequestTag, payload: RawCompletion) -> bool {
        // Clone the handle out so delivery runs without the hub lock held.
        let subscriber = self.subscriber.lock().unwrap().clone();
        match subscriber {
            Some(subscriber) => subscriber.on_completion(tag, payload),
            None => {
                trace!(%tag, "dropping completion signal: no subscriber attached");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        signals: Mutex<Vec<RequestTag>>,
    }

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                signals: Mutex::new(Vec::new()),
            })
        }

        fn count(&self) -> usize {
            self.signals.lock().unwrap().len()
        }
    }

    impl CompletionSubscriber for Recorder {
        fn on_completion(&self, tag: RequestTag, _payload: RawCompletion) -> bool {
            self.signals.lock().unwrap().push(tag);
            true
        }
    }

    #[test]
    fn test_emit_without_subscriber_is_dropped() {
        let hub = CompletionHub::new();
        assert!(!hub.emit(RequestTag::PRIMARY, RawCompletion::Dismissed));
    }

    #[test]
    fn test_attached_subscriber_receives_signals() {
        let hub = CompletionHub::new();
        let recorder = Recorder::new();
        hub.attach(recorder.clone());

        assert!(hub.emit(RequestTag::PRIMARY, RawCompletion::Dismissed));
        assert_eq!(recorder.count(), 1);
    }

    #[test]
    fn test_detach_stops_delivery() {
        let hub = CompletionHub::new();
        let recorder = Recorder::new();
        hub.attach(recorder.clone());
        hub.detach();

        assert!(!hub.emit(RequestTag::PRIMARY, RawCompletion::Dismissed));
        assert_eq!(recorder.count(), 0);
    }

    #[test]
    fn test_reattach_replaces_previous_subscriber() {
        let hub = CompletionHub::new();
        let first = Recorder::new();
        let second = Recorder::new();
        hub.attach(first.clone());
        hub.attach(second.clone());

        assert!(hub.emit(RequestTag::FALLBACK, RawCompletion::Dismissed));
        assert_eq!(first.count(), 0);
        assert_eq!(second.count(), 1);
    }
}
