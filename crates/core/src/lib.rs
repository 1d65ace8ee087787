//! Opstrack core data models.
//!
//! This crate defines the data structures shared by the scheduling
//! engine, the storage backends and the CLI: operations, phases,
//! blockers ("freins") and the duration arithmetic used by the
//! phase templates.

#![warn(missing_docs)]

// Core identities
mod id;

// Operation tracking
mod blocker;
mod operation;
mod phase;

// Duration arithmetic
mod duration;

// Re-exports
pub use id::*;

pub use blocker::{Blocker, BlockerCategory, BlockerImpact};
pub use duration::{format_duration, to_days, DurationError, DurationUnit};
pub use operation::{Operation, OperationKind, OperationStatus};
pub use phase::{Phase, PhaseDomain, PhaseStatus};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
