//! Domain-driven event types
//!
//! Events are grouped by functional domain (Generate, Verify) with a small
//! General domain for warnings and errors that do not belong anywhere else.

mod general;
mod generate;
mod verify;

pub use general::GeneralEvent;
pub use generate::GenerateEvent;
pub use verify::{VerifyEvent, VerifyOutcome, VerifySummary};

use serde::{Deserialize, Serialize};

/// Top-level event type carried over the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum AppEvent {
    General(GeneralEvent),
    Generate(GenerateEvent),
    Verify(VerifyEvent),
}
