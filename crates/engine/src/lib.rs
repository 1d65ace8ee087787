//! Opstrack scheduling engine.
//!
//! Pure, deterministic transformations over operation phase lists:
//! expanding a workflow template into dated phases, inserting phases
//! with downstream shifting, deriving progress/risk aggregates, and
//! laying out the Gantt timeline. Storage and rendering live in
//! sibling crates; nothing here performs I/O.

#![warn(missing_docs)]

mod aggregate;
mod catalog;
mod mutator;
mod sequencer;
mod timeline;

pub use aggregate::{aggregates, OperationAggregates};
pub use catalog::{parse_kind, template, total_template_duration, PhaseBlueprint};
pub use mutator::{insert_phase, InsertPosition};
pub use sequencer::sequence;
pub use timeline::{build_layout, TimelineBar, TimelineConnector, TimelineLayout};

use opstrack_core::{DurationError, PhaseId};

/// Errors produced by the scheduling engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Bad user input (missing field, inverted date range).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Operation kind string not in the closed enum.
    #[error("unknown operation kind: {0}")]
    UnknownOperationKind(String),

    /// Duration conversion failure.
    #[error(transparent)]
    Duration(#[from] DurationError),

    /// Template or custom blueprint list has zero entries.
    #[error("template has no phases")]
    EmptyTemplate,

    /// Insertion reference phase missing from the list.
    #[error("phase not found: {0}")]
    TargetNotFound(PhaseId),
}
