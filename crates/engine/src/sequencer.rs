//! Phase sequencer - expands blueprints into dated, contiguous phases.

use chrono::{Duration, NaiveDate};
use opstrack_core::{Phase, PhaseDomain, PhaseId, PhaseStatus};
use tracing::debug;

use crate::catalog::PhaseBlueprint;
use crate::EngineError;

/// Lay out blueprints back-to-back starting at `start`.
///
/// Each phase spans exactly its blueprint's nominal duration as an
/// inclusive date range, and each phase starts the day after the
/// previous one ends. The blueprint list may come from the catalog or
/// from a user-supplied custom configuration; both go through the
/// same validation.
pub fn sequence(
    blueprints: &[PhaseBlueprint],
    start: NaiveDate,
    responsible: &str,
) -> Result<Vec<Phase>, EngineError> {
    if blueprints.is_empty() {
        return Err(EngineError::EmptyTemplate);
    }

    let mut phases = Vec::with_capacity(blueprints.len());
    let mut cursor = start;

    for bp in blueprints {
        bp.validate()?;
        let end = cursor + Duration::days(i64::from(bp.duration_days) - 1);
        phases.push(Phase {
            id: PhaseId::new(),
            name: bp.name.clone(),
            start: cursor,
            end,
            color: bp.color.clone(),
            status: PhaseStatus::Pending,
            description: String::new(),
            responsible: responsible.to_string(),
            domain: PhaseDomain::default(),
            critical: false,
            blockers: Vec::new(),
        });
        cursor = end + Duration::days(1);
    }

    debug!(
        phases = phases.len(),
        start = %start,
        end = %phases.last().map(|p| p.end).unwrap_or(start),
        "sequenced phase list"
    );
    Ok(phases)
}
