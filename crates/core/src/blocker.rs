//! Blocker model - obstacles ("freins") attached to a phase.

use serde::{Deserialize, Serialize};
use crate::id::BlockerId;
use crate::Time;

/// An obstacle reported against a phase, independent of its status.
///
/// A phase can be in progress and still carry blockers; the aggregate
/// engine counts them separately from delay flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blocker {
    /// Unique identifier
    pub id: BlockerId,

    /// Short title
    pub title: String,

    /// Free-text details
    pub description: String,

    /// Blocker category
    pub category: BlockerCategory,

    /// Impact level
    pub impact: BlockerImpact,

    /// Who reported it
    pub reported_by: String,

    /// When it was reported
    pub reported_at: Time,

    /// Remediation plan, if any
    pub remediation: String,
}

impl Blocker {
    /// Create a blocker with default category and impact.
    pub fn new(title: impl Into<String>, reported_by: impl Into<String>) -> Self {
        Self {
            id: BlockerId::new(),
            title: title.into(),
            description: String::new(),
            category: BlockerCategory::Other,
            impact: BlockerImpact::Medium,
            reported_by: reported_by.into(),
            reported_at: chrono::Utc::now(),
            remediation: String::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: BlockerCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the impact level.
    pub fn with_impact(mut self, impact: BlockerImpact) -> Self {
        self.impact = impact;
        self
    }
}

/// Blocker categories, from the predefined list in the reporting form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockerCategory {
    /// Supplier or subcontractor delay
    SupplierDelay,
    /// Technical problem on site or in studies
    Technical,
    /// Waiting on a validation or sign-off
    PendingValidation,
    /// Weather conditions
    Weather,
    /// Administrative issue (permits, filings)
    Administrative,
    /// Missing staff or equipment
    Resources,
    /// Anything else
    Other,
}

/// Impact level of a blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockerImpact {
    /// Minor friction
    Low,
    /// Noticeable but contained
    Medium,
    /// Threatens the phase schedule
    High,
    /// Threatens the operation
    Critical,
}
