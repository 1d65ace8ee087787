//! Sequence mutator - inserting phases into an existing schedule.

use chrono::{Duration, NaiveDate};
use opstrack_core::{Phase, PhaseDomain, PhaseId, PhaseStatus};
use tracing::debug;

use crate::catalog::PhaseBlueprint;
use crate::EngineError;

/// Where a new phase goes in the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// After the last phase (or at the operation start if empty).
    Append,
    /// Immediately before the given phase, taking over its slot.
    Before(PhaseId),
}

/// Insert a phase built from `blueprint` into `phases`.
///
/// Returns a new list; the input is never mutated, so views holding
/// the old list stay coherent. With `Before`, every phase from the
/// target onward is shifted forward by the new phase's duration,
/// which keeps the tail contiguous. Phases before the insertion point
/// are copied unchanged.
pub fn insert_phase(
    phases: &[Phase],
    blueprint: &PhaseBlueprint,
    position: InsertPosition,
    operation_start: NaiveDate,
    responsible: &str,
) -> Result<Vec<Phase>, EngineError> {
    blueprint.validate()?;
    let duration = Duration::days(i64::from(blueprint.duration_days));

    let (index, start) = match position {
        InsertPosition::Append => {
            let start = phases
                .last()
                .map(|last| last.end + Duration::days(1))
                .unwrap_or(operation_start);
            (phases.len(), start)
        }
        InsertPosition::Before(target) => {
            let index = phases
                .iter()
                .position(|p| p.id == target)
                .ok_or(EngineError::TargetNotFound(target))?;
            (index, phases[index].start)
        }
    };

    let new_phase = Phase {
        id: PhaseId::new(),
        name: blueprint.name.clone(),
        start,
        end: start + duration - Duration::days(1),
        color: blueprint.color.clone(),
        status: PhaseStatus::Pending,
        description: String::new(),
        responsible: responsible.to_string(),
        domain: PhaseDomain::default(),
        critical: false,
        blockers: Vec::new(),
    };

    let mut result = Vec::with_capacity(phases.len() + 1);
    result.extend_from_slice(&phases[..index]);
    result.push(new_phase);
    for phase in &phases[index..] {
        let mut shifted = phase.clone();
        shifted.start += duration;
        shifted.end += duration;
        result.push(shifted);
    }

    debug!(
        name = %blueprint.name,
        index,
        shifted = phases.len() - index,
        "inserted phase"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::sequence;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn bp(name: &str, days: u32) -> PhaseBlueprint {
        PhaseBlueprint::new(name, days, "#d62728")
    }

    fn base_phases() -> Vec<Phase> {
        sequence(
            &[bp("Études", 10), bp("Consultation", 5), bp("Travaux", 20)],
            d(2025, 1, 1),
            "Jean MARTIN",
        )
        .unwrap()
    }

    #[test]
    fn test_insert_before_shifts_tail() {
        // 7-day phase before the 2nd phase of [10, 5, 20] @ 2025-01-01.
        let phases = base_phases();
        let result = insert_phase(
            &phases,
            &bp("Géomètre", 7),
            InsertPosition::Before(phases[1].id),
            d(2025, 1, 1),
            "Jean MARTIN",
        )
        .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!((result[0].start, result[0].end), (d(2025, 1, 1), d(2025, 1, 10)));
        assert_eq!((result[1].start, result[1].end), (d(2025, 1, 11), d(2025, 1, 17)));
        assert_eq!((result[2].start, result[2].end), (d(2025, 1, 18), d(2025, 1, 22)));
        assert_eq!((result[3].start, result[3].end), (d(2025, 1, 23), d(2025, 2, 11)));
    }

    #[test]
    fn test_insert_preserves_head_and_contiguity() {
        let phases = base_phases();
        let result = insert_phase(
            &phases,
            &bp("Géomètre", 7),
            InsertPosition::Before(phases[2].id),
            d(2025, 1, 1),
            "Jean MARTIN",
        )
        .unwrap();

        // Head untouched, ids included.
        assert_eq!(result[0].id, phases[0].id);
        assert_eq!(result[1].id, phases[1].id);
        assert_eq!(result[0].end, phases[0].end);
        assert_eq!(result[1].end, phases[1].end);

        for pair in result.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
        }
    }

    #[test]
    fn test_append_continues_after_last() {
        let phases = base_phases();
        let result = insert_phase(
            &phases,
            &bp("Bilan", 15),
            InsertPosition::Append,
            d(2025, 1, 1),
            "Jean MARTIN",
        )
        .unwrap();

        assert_eq!(result.len(), 4);
        let added = result.last().unwrap();
        assert_eq!(added.start, d(2025, 2, 5));
        assert_eq!(added.end, d(2025, 2, 19));
        // Existing phases keep their dates.
        assert_eq!(result[2].end, phases[2].end);
    }

    #[test]
    fn test_append_to_empty_starts_at_operation_start() {
        let result = insert_phase(
            &[],
            &bp("Signature", 7),
            InsertPosition::Append,
            d(2025, 4, 1),
            "Marie DUBOIS",
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start, d(2025, 4, 1));
        assert_eq!(result[0].end, d(2025, 4, 7));
    }

    #[test]
    fn test_insert_before_first_takes_operation_head() {
        let phases = base_phases();
        let result = insert_phase(
            &phases,
            &bp("Diagnostic", 3),
            InsertPosition::Before(phases[0].id),
            d(2025, 1, 1),
            "Jean MARTIN",
        )
        .unwrap();

        assert_eq!(result[0].start, d(2025, 1, 1));
        assert_eq!(result[0].end, d(2025, 1, 3));
        assert_eq!(result[1].start, d(2025, 1, 4));
    }

    #[test]
    fn test_unknown_target_rejected() {
        let phases = base_phases();
        let missing = PhaseId::new();
        let err = insert_phase(
            &phases,
            &bp("Géomètre", 7),
            InsertPosition::Before(missing),
            d(2025, 1, 1),
            "x",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::TargetNotFound(id) if id == missing));
    }

    #[test]
    fn test_input_list_is_untouched() {
        let phases = base_phases();
        let snapshot = phases.clone();
        let _ = insert_phase(
            &phases,
            &bp("Géomètre", 7),
            InsertPosition::Before(phases[1].id),
            d(2025, 1, 1),
            "x",
        )
        .unwrap();

        for (before, after) in snapshot.iter().zip(&phases) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.start, after.start);
            assert_eq!(before.end, after.end);
        }
    }
}
