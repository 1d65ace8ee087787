//! Operation model - a tracked construction/housing project.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::id::OperationId;
use crate::phase::Phase;
use crate::Time;

/// A tracked real-estate construction operation.
///
/// The operation owns its phase list exclusively; phases are never
/// shared across operations and are kept sorted by start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier
    pub id: OperationId,

    /// Operation name
    pub name: String,

    /// Workflow variant
    pub kind: OperationKind,

    /// Responsible project officer (ACO)
    pub officer: String,

    /// When the record was created
    pub created_at: Time,

    /// Overall start date
    pub start: NaiveDate,

    /// Planned end date
    pub planned_end: NaiveDate,

    /// Budget in euros
    pub budget: f64,

    /// Overall status
    pub status: OperationStatus,

    /// Version stamp, bumped by the store on every successful save
    #[serde(default)]
    pub version: u64,

    /// Scheduled phases, in chronological order
    pub phases: Vec<Phase>,
}

impl Operation {
    /// Find a phase by id.
    pub fn phase(&self, id: crate::PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Find a phase by id, mutably.
    pub fn phase_mut(&mut self, id: crate::PhaseId) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.id == id)
    }
}

/// The five workflow variants an operation can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Own-account development ("Opération Propre")
    Opp,
    /// Off-plan purchase ("Vente en État Futur d'Achèvement")
    Vefa,
    /// Study mandate on behalf of a principal
    StudyMandate,
    /// Works mandate on behalf of a principal
    WorksMandate,
    /// Project-owner assistance ("Assistance à Maîtrise d'Ouvrage")
    Amo,
}

impl OperationKind {
    /// All kinds, in template-catalog order.
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Opp,
        OperationKind::Vefa,
        OperationKind::StudyMandate,
        OperationKind::WorksMandate,
        OperationKind::Amo,
    ];
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OperationKind::Opp => "OPP",
            OperationKind::Vefa => "VEFA",
            OperationKind::StudyMandate => "MANDAT_ETUDES",
            OperationKind::WorksMandate => "MANDAT_REALISATION",
            OperationKind::Amo => "AMO",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPP" => Ok(OperationKind::Opp),
            "VEFA" => Ok(OperationKind::Vefa),
            "MANDAT_ETUDES" | "MANDATS_ETUDES" => Ok(OperationKind::StudyMandate),
            "MANDAT_REALISATION" | "MANDATS_REALISATION" => Ok(OperationKind::WorksMandate),
            "AMO" => Ok(OperationKind::Amo),
            other => Err(format!("unknown operation kind: {other}")),
        }
    }
}

/// Overall status of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Just created, not started
    Created,
    /// Running
    Active,
    /// Delivered and closed
    Completed,
    /// Stuck on one or more blockers
    Blocked,
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OperationStatus::Created => "created",
            OperationStatus::Active => "active",
            OperationStatus::Completed => "completed",
            OperationStatus::Blocked => "blocked",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(OperationStatus::Created),
            "active" => Ok(OperationStatus::Active),
            "completed" => Ok(OperationStatus::Completed),
            "blocked" => Ok(OperationStatus::Blocked),
            other => Err(format!("unknown operation status: {other}")),
        }
    }
}
