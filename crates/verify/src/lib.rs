#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Manifest verification for treesum
//!
//! Re-hashes every file a manifest describes and classifies each record as
//! match, mismatch, missing, or error. Verification is exhaustive: one
//! record's failure never skips the rest, so the report is a complete
//! diagnostic rather than a first-failure signal.

mod verifier;

pub use treesum_events::{VerifyOutcome, VerifySummary};
pub use verifier::{RecordFailure, VerificationReport, Verifier};
