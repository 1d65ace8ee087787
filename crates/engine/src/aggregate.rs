//! Status and aggregate engine - derived progress and risk signals.

use opstrack_core::{Phase, PhaseStatus};
use serde::{Deserialize, Serialize};

/// Derived signals for one operation, recomputed from its phase list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationAggregates {
    /// Fraction of phases that are done, in [0, 1]
    pub progress_ratio: f64,

    /// Phases flagged as delayed
    pub delayed_count: usize,

    /// Phases carrying at least one blocker
    pub blocked_phase_count: usize,

    /// Notification volume: delayed + blocked.
    ///
    /// A delayed phase that also carries blockers counts twice; the
    /// two tallies track different concerns (schedule vs execution)
    /// and the dashboard shows their sum.
    pub alert_count: usize,
}

/// Compute the per-operation aggregates from a phase list.
pub fn aggregates(phases: &[Phase]) -> OperationAggregates {
    let done = phases
        .iter()
        .filter(|p| p.status == PhaseStatus::Done)
        .count();
    let delayed_count = phases
        .iter()
        .filter(|p| p.status == PhaseStatus::Delayed)
        .count();
    let blocked_phase_count = phases.iter().filter(|p| p.is_blocked()).count();

    let progress_ratio = if phases.is_empty() {
        0.0
    } else {
        done as f64 / phases.len() as f64
    };

    OperationAggregates {
        progress_ratio,
        delayed_count,
        blocked_phase_count,
        alert_count: delayed_count + blocked_phase_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PhaseBlueprint;
    use crate::sequencer::sequence;
    use chrono::NaiveDate;
    use opstrack_core::Blocker;

    fn phases_with_statuses(statuses: &[PhaseStatus]) -> Vec<Phase> {
        let blueprints: Vec<_> = statuses
            .iter()
            .enumerate()
            .map(|(i, _)| PhaseBlueprint::new(format!("Phase {}", i + 1), 10, "#1f77b4"))
            .collect();
        let mut phases = sequence(
            &blueprints,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "Jean MARTIN",
        )
        .unwrap();
        for (phase, status) in phases.iter_mut().zip(statuses) {
            phase.status = *status;
        }
        phases
    }

    #[test]
    fn test_dashboard_scenario() {
        // [Done, Done, Delayed, Pending], one blocker on the delayed phase.
        let mut phases = phases_with_statuses(&[
            PhaseStatus::Done,
            PhaseStatus::Done,
            PhaseStatus::Delayed,
            PhaseStatus::Pending,
        ]);
        phases[2]
            .blockers
            .push(Blocker::new("Attente validation", "Jean MARTIN"));

        let agg = aggregates(&phases);
        assert_eq!(agg.progress_ratio, 0.5);
        assert_eq!(agg.delayed_count, 1);
        assert_eq!(agg.blocked_phase_count, 1);
        // The delayed-and-blocked phase counts in both tallies.
        assert_eq!(agg.alert_count, 2);
    }

    #[test]
    fn test_empty_phase_list() {
        let agg = aggregates(&[]);
        assert_eq!(agg.progress_ratio, 0.0);
        assert_eq!(agg.alert_count, 0);
    }

    #[test]
    fn test_fresh_operation_has_zero_progress() {
        let phases = phases_with_statuses(&[PhaseStatus::Pending; 5]);
        let agg = aggregates(&phases);
        assert_eq!(agg.progress_ratio, 0.0);
        assert_eq!(agg.delayed_count, 0);
        assert_eq!(agg.blocked_phase_count, 0);
    }

    #[test]
    fn test_ratio_reaches_one_only_when_all_done() {
        let all_done = phases_with_statuses(&[PhaseStatus::Done; 3]);
        assert_eq!(aggregates(&all_done).progress_ratio, 1.0);

        let one_short = phases_with_statuses(&[
            PhaseStatus::Done,
            PhaseStatus::Done,
            PhaseStatus::InProgress,
        ]);
        let ratio = aggregates(&one_short).progress_ratio;
        assert!(ratio > 0.0 && ratio < 1.0);
    }

    #[test]
    fn test_in_progress_phase_with_blockers_counts_blocked() {
        let mut phases = phases_with_statuses(&[PhaseStatus::InProgress]);
        phases[0]
            .blockers
            .push(Blocker::new("Conditions météo", "Sophie LEROY"));

        let agg = aggregates(&phases);
        assert_eq!(agg.delayed_count, 0);
        assert_eq!(agg.blocked_phase_count, 1);
        assert_eq!(agg.alert_count, 1);
    }
}
