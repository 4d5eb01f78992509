#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in treesum
//!
//! All output goes through events - no direct logging or printing is allowed
//! outside the CLI. Core crates emit domain events through an optional
//! sender; the CLI decides how to render them (plain, colored, or not at
//! all), which keeps hashing and verification independently testable.

pub mod events;
pub use events::{AppEvent, GeneralEvent, GenerateEvent, VerifyEvent, VerifyOutcome, VerifySummary};

use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout the treesum system
///
/// This trait provides a single, consistent API for emitting events regardless
/// of whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit an error event
    fn emit_error(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error(message)));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::Verify(VerifyEvent::RecordChecked {
            relative_path: "b/c.txt".to_string(),
            outcome: VerifyOutcome::Mismatch,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"mismatch\""));
        assert!(json.contains("b/c.txt"));

        let back: AppEvent = serde_json::from_str(&json).unwrap();
        match back {
            AppEvent::Verify(VerifyEvent::RecordChecked { outcome, .. }) => {
                assert_eq!(outcome, VerifyOutcome::Mismatch);
            }
            _ => panic!("wrong event variant"),
        }
    }

    #[test]
    fn test_emit_through_channel() {
        let (tx, mut rx) = channel();
        tx.emit_warning("walk skipped a symlink");

        match rx.try_recv().unwrap() {
            AppEvent::General(GeneralEvent::Warning { message, .. }) => {
                assert_eq!(message, "walk skipped a symlink");
            }
            _ => panic!("expected warning"),
        }
    }
}
