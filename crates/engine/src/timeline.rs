//! Timeline layout builder - Gantt structure for the presentation layer.

use chrono::NaiveDate;
use opstrack_core::{format_duration, Phase, PhaseId, PhaseStatus};
use serde::{Deserialize, Serialize};

/// Color used for completed phases.
pub const COLOR_DONE: &str = "#28a745";
/// Color used for phases currently in progress.
pub const COLOR_ACTIVE: &str = "#007bff";
/// Color used for delayed phases.
pub const COLOR_ALERT: &str = "#dc3545";

/// One horizontal span on the date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBar {
    /// Phase this bar represents
    pub phase_id: PhaseId,

    /// Bar label (the phase name)
    pub label: String,

    /// First day on the axis
    pub start: NaiveDate,

    /// Width in days (inclusive range)
    pub span_days: i64,

    /// Effective display color after status override
    pub color: String,

    /// Hover text
    pub tooltip: String,

    /// Whether to draw the blocker glyph next to the bar.
    ///
    /// Kept separate from the color so a blocked-but-on-track phase
    /// stays distinguishable from a plain status color.
    pub has_blocker_marker: bool,
}

/// Directional link from one phase's end to the next phase's start.
///
/// Purely a rendering aid showing temporal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConnector {
    /// Source phase
    pub from: PhaseId,
    /// Date the arrow leaves from (source phase end)
    pub from_date: NaiveDate,
    /// Destination phase
    pub to: PhaseId,
    /// Date the arrow points at (destination phase start)
    pub to_date: NaiveDate,
}

/// Renderable Gantt layout for one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    /// One bar per phase, in phase-list order
    pub bars: Vec<TimelineBar>,
    /// One connector between each adjacent pair of phases
    pub connectors: Vec<TimelineConnector>,
}

fn effective_color(phase: &Phase) -> String {
    match phase.status {
        PhaseStatus::Done => COLOR_DONE.to_string(),
        PhaseStatus::InProgress => COLOR_ACTIVE.to_string(),
        PhaseStatus::Delayed => COLOR_ALERT.to_string(),
        PhaseStatus::Pending => phase.color.clone(),
    }
}

fn tooltip(phase: &Phase) -> String {
    format!(
        "{}\nDébut: {}\nFin: {}\nDurée: {}\nStatut: {}\nResponsable: {}\nFreins: {}",
        phase.name,
        phase.start.format("%d/%m/%Y"),
        phase.end.format("%d/%m/%Y"),
        format_duration(phase.span_days() as u32),
        phase.status,
        phase.responsible,
        phase.blockers.len(),
    )
}

/// Build the Gantt layout for a phase list.
///
/// An empty phase list yields an empty layout; the caller shows its
/// own "no phases" placeholder.
pub fn build_layout(phases: &[Phase]) -> TimelineLayout {
    let bars = phases
        .iter()
        .map(|phase| TimelineBar {
            phase_id: phase.id,
            label: phase.name.clone(),
            start: phase.start,
            span_days: phase.span_days(),
            color: effective_color(phase),
            tooltip: tooltip(phase),
            has_blocker_marker: phase.is_blocked(),
        })
        .collect();

    let connectors = phases
        .windows(2)
        .map(|pair| TimelineConnector {
            from: pair[0].id,
            from_date: pair[0].end,
            to: pair[1].id,
            to_date: pair[1].start,
        })
        .collect();

    TimelineLayout { bars, connectors }
}
