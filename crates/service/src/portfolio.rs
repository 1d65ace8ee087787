//! Portfolio-level aggregates across operations.

use opstrack_core::{Operation, OperationStatus, PhaseStatus};
use opstrack_engine::aggregates;
use serde::{Deserialize, Serialize};

/// Dashboard summary over a whole operation portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of operations
    pub operation_count: usize,

    /// Sum of operation budgets, in euros
    pub total_budget: f64,

    /// Mean of the per-operation progress ratios, in [0, 1]
    pub average_progress: f64,

    /// Delayed phases across the portfolio
    pub delayed_phase_count: usize,

    /// Blocked phases across the portfolio
    pub blocked_phase_count: usize,

    /// Operations whose overall status is blocked
    pub blocked_operation_count: usize,
}

/// Compute the portfolio summary from a list of operations.
pub fn summarize(operations: &[Operation]) -> PortfolioSummary {
    let total_budget = operations.iter().map(|op| op.budget).sum();
    let blocked_operation_count = operations
        .iter()
        .filter(|op| op.status == OperationStatus::Blocked)
        .count();

    let mut progress_sum = 0.0;
    let mut delayed_phase_count = 0;
    let mut blocked_phase_count = 0;
    for op in operations {
        let agg = aggregates(&op.phases);
        progress_sum += agg.progress_ratio;
        delayed_phase_count += agg.delayed_count;
        blocked_phase_count += agg.blocked_phase_count;
    }

    let average_progress = if operations.is_empty() {
        0.0
    } else {
        progress_sum / operations.len() as f64
    };

    PortfolioSummary {
        operation_count: operations.len(),
        total_budget,
        average_progress,
        delayed_phase_count,
        blocked_phase_count,
        blocked_operation_count,
    }
}

/// Count the done phases of an operation, for progress displays.
pub fn done_phase_count(op: &Operation) -> usize {
    op.phases
        .iter()
        .filter(|p| p.status == PhaseStatus::Done)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use opstrack_core::{Blocker, Operation, OperationId, OperationKind};
    use opstrack_engine::{sequence, PhaseBlueprint};

    fn operation(statuses: &[PhaseStatus], budget: f64) -> Operation {
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
        Operation {
            id: OperationId::new(),
            name: "Op".to_string(),
            kind: OperationKind::Opp,
            officer: "Jean MARTIN".to_string(),
            created_at: chrono::Utc::now(),
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            planned_end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            budget,
            status: OperationStatus::Active,
            version: 0,
            phases,
        }
    }

    #[test]
    fn test_summary_over_two_operations() {
        let done = operation(&[PhaseStatus::Done, PhaseStatus::Done], 100_000.0);
        let mut stuck = operation(
            &[PhaseStatus::Done, PhaseStatus::Delayed, PhaseStatus::Pending, PhaseStatus::Pending],
            300_000.0,
        );
        stuck.status = OperationStatus::Blocked;
        stuck.phases[1]
            .blockers
            .push(Blocker::new("Attente validation", "Marie DUBOIS"));

        let summary = summarize(&[done, stuck]);
        assert_eq!(summary.operation_count, 2);
        assert_eq!(summary.total_budget, 400_000.0);
        // (1.0 + 0.25) / 2
        assert!((summary.average_progress - 0.625).abs() < 1e-9);
        assert_eq!(summary.delayed_phase_count, 1);
        assert_eq!(summary.blocked_phase_count, 1);
        assert_eq!(summary.blocked_operation_count, 1);
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = summarize(&[]);
        assert_eq!(summary.operation_count, 0);
        assert_eq!(summary.average_progress, 0.0);
        assert_eq!(summary.total_budget, 0.0);
    }

    #[test]
    fn test_done_phase_count() {
        let op = operation(&[PhaseStatus::Done, PhaseStatus::Pending], 0.0);
        assert_eq!(done_phase_count(&op), 1);
    }
}
