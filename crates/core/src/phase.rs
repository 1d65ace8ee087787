//! Phase model - one scheduled step of an operation's workflow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::blocker::Blocker;
use crate::id::PhaseId;

/// A phase is one step of an operation, scheduled on the calendar.
///
/// Within an operation, phases are stored in chronological order and
/// are contiguous: each phase starts the day after the previous one
/// ends. Date ranges are inclusive on both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Unique identifier
    pub id: PhaseId,

    /// Phase name
    pub name: String,

    /// First day of the phase
    pub start: NaiveDate,

    /// Last day of the phase (inclusive, `end >= start`)
    pub end: NaiveDate,

    /// Display color token (hex string from the template)
    pub color: String,

    /// Phase status
    pub status: PhaseStatus,

    /// Free-text description
    pub description: String,

    /// Responsible party
    pub responsible: String,

    /// Business domain of the phase
    #[serde(default)]
    pub domain: PhaseDomain,

    /// Whether the phase sits on the operation's critical list
    #[serde(default)]
    pub critical: bool,

    /// Blockers currently reported against this phase
    #[serde(default)]
    pub blockers: Vec<Blocker>,
}

impl Phase {
    /// Number of calendar days the phase spans (inclusive range).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// A phase is blocked while it carries at least one blocker.
    pub fn is_blocked(&self) -> bool {
        !self.blockers.is_empty()
    }
}

/// Phase status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseStatus {
    /// Not started yet
    Pending,
    /// Currently running
    InProgress,
    /// Completed
    Done,
    /// Behind schedule
    Delayed,
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "in progress",
            PhaseStatus::Done => "done",
            PhaseStatus::Delayed => "delayed",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for PhaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(PhaseStatus::Pending),
            "in-progress" | "in_progress" | "started" => Ok(PhaseStatus::InProgress),
            "done" | "completed" => Ok(PhaseStatus::Done),
            "delayed" | "late" => Ok(PhaseStatus::Delayed),
            other => Err(format!("unknown phase status: {other}")),
        }
    }
}

/// Business domain a phase belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseDomain {
    /// Site and production work
    #[default]
    Operational,
    /// Contracts, procurement law
    Legal,
    /// Financing and budget
    Budgetary,
    /// Permits and filings
    Administrative,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::PhaseId;

    fn phase(start: (i32, u32, u32), end: (i32, u32, u32)) -> Phase {
        Phase {
            id: PhaseId::new(),
            name: "Instruction PC".to_string(),
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            color: "#ff7f0e".to_string(),
            status: PhaseStatus::Pending,
            description: String::new(),
            responsible: "Jean MARTIN".to_string(),
            domain: PhaseDomain::default(),
            critical: false,
            blockers: Vec::new(),
        }
    }

    #[test]
    fn test_span_is_inclusive() {
        let p = phase((2025, 1, 1), (2025, 1, 10));
        assert_eq!(p.span_days(), 10);

        let single_day = phase((2025, 3, 4), (2025, 3, 4));
        assert_eq!(single_day.span_days(), 1);
    }

    #[test]
    fn test_blocked_follows_blocker_list() {
        let mut p = phase((2025, 1, 1), (2025, 1, 10));
        assert!(!p.is_blocked());
        p.blockers.push(Blocker::new("Retard fournisseur", "Jean MARTIN"));
        assert!(p.is_blocked());
        p.blockers.clear();
        assert!(!p.is_blocked());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("done".parse::<PhaseStatus>().unwrap(), PhaseStatus::Done);
        assert_eq!(
            "in-progress".parse::<PhaseStatus>().unwrap(),
            PhaseStatus::InProgress
        );
        assert!("paused".parse::<PhaseStatus>().is_err());
    }
}
