//! Jiminny REST API access
//!
//! - `client`: authenticated GET wrapper with prefix probing
//! - `participants`: best-effort participant name mapping

pub mod client;
pub mod participants;

pub use client::{ApiClient, ProbeOutcome};
pub use participants::ParticipantNames;
