//! Operation management service.

use chrono::{Duration, NaiveDate};
use opstrack_core::{
    Blocker, Operation, OperationId, OperationKind, OperationStatus, PhaseId, PhaseStatus,
};
use opstrack_engine::{
    aggregates, build_layout, insert_phase, sequence, template, EngineError, InsertPosition,
    OperationAggregates, PhaseBlueprint, TimelineLayout,
};
use opstrack_storage::{StorageError, Store};
use tracing::info;

/// Errors surfaced to the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No operation with that id in the store.
    #[error("operation not found: {0}")]
    OperationNotFound(OperationId),

    /// No phase with that id in the operation.
    #[error("phase not found: {0}")]
    PhaseNotFound(PhaseId),

    /// Engine validation or transformation failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Store failure, propagated unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Validated request to create an operation.
#[derive(Debug, Clone)]
pub struct CreateOperationRequest {
    /// Operation name
    pub name: String,
    /// Workflow variant
    pub kind: OperationKind,
    /// Responsible project officer
    pub officer: String,
    /// Budget in euros
    pub budget: f64,
    /// Overall start date
    pub start: NaiveDate,
    /// Planned end date (must be after `start`)
    pub planned_end: NaiveDate,
    /// Custom blueprint list; `None` expands the kind's template
    pub custom_blueprints: Option<Vec<PhaseBlueprint>>,
}

/// Operation management service over a storage backend.
///
/// Commands follow validate-then-apply-then-save: nothing is
/// persisted when validation fails, and every save replaces the whole
/// operation record.
pub struct OperationManager<S: Store> {
    store: S,
}

impl<S: Store> OperationManager<S> {
    /// Create a manager over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an operation from a template or custom blueprint list.
    pub async fn create_operation(
        &mut self,
        req: CreateOperationRequest,
    ) -> Result<Operation, ServiceError> {
        if req.name.trim().is_empty() {
            return Err(EngineError::Validation("operation name is required".to_string()).into());
        }
        if req.officer.trim().is_empty() {
            return Err(EngineError::Validation("responsible officer is required".to_string()).into());
        }
        if req.planned_end <= req.start {
            return Err(EngineError::Validation(
                "planned end date must be after the start date".to_string(),
            )
            .into());
        }

        let blueprints = match &req.custom_blueprints {
            Some(custom) => custom.clone(),
            None => template(req.kind),
        };
        let phases = sequence(&blueprints, req.start, &req.officer)?;

        let op = Operation {
            id: OperationId::new(),
            name: req.name,
            kind: req.kind,
            officer: req.officer,
            created_at: chrono::Utc::now(),
            start: req.start,
            planned_end: req.planned_end,
            budget: req.budget,
            status: OperationStatus::Created,
            version: 0,
            phases,
        };

        info!(id = %op.id, kind = %op.kind, phases = op.phases.len(), "created operation");
        self.persist(op).await
    }

    /// Insert a phase and persist the reshuffled schedule.
    pub async fn add_phase(
        &mut self,
        id: OperationId,
        blueprint: &PhaseBlueprint,
        position: InsertPosition,
    ) -> Result<Operation, ServiceError> {
        let mut op = self.load(id).await?;
        op.phases = insert_phase(&op.phases, blueprint, position, op.start, &op.officer)?;
        info!(id = %op.id, phase = %blueprint.name, "added phase");
        self.persist(op).await
    }

    /// Change a phase's status.
    pub async fn set_phase_status(
        &mut self,
        id: OperationId,
        phase_id: PhaseId,
        status: PhaseStatus,
    ) -> Result<Operation, ServiceError> {
        let mut op = self.load(id).await?;
        let phase = op
            .phase_mut(phase_id)
            .ok_or(ServiceError::PhaseNotFound(phase_id))?;
        phase.status = status;
        info!(id = %id, phase = %phase_id, status = %status, "set phase status");
        self.persist(op).await
    }

    /// Report a blocker against a phase.
    pub async fn add_blocker(
        &mut self,
        id: OperationId,
        phase_id: PhaseId,
        blocker: Blocker,
    ) -> Result<Operation, ServiceError> {
        let mut op = self.load(id).await?;
        let phase = op
            .phase_mut(phase_id)
            .ok_or(ServiceError::PhaseNotFound(phase_id))?;
        phase.blockers.push(blocker);
        info!(id = %id, phase = %phase_id, "added blocker");
        self.persist(op).await
    }

    /// Lift every blocker on a phase.
    pub async fn clear_blockers(
        &mut self,
        id: OperationId,
        phase_id: PhaseId,
    ) -> Result<Operation, ServiceError> {
        let mut op = self.load(id).await?;
        let phase = op
            .phase_mut(phase_id)
            .ok_or(ServiceError::PhaseNotFound(phase_id))?;
        let lifted = phase.blockers.len();
        phase.blockers.clear();
        info!(id = %id, phase = %phase_id, lifted, "cleared blockers");
        self.persist(op).await
    }

    /// Push a phase's end date out by `extra_days`.
    ///
    /// Only the rescheduled phase moves; the officer decides
    /// separately whether downstream phases need reshuffling.
    pub async fn reschedule_phase(
        &mut self,
        id: OperationId,
        phase_id: PhaseId,
        extra_days: u32,
    ) -> Result<Operation, ServiceError> {
        if extra_days == 0 {
            return Err(EngineError::Validation("extension must be positive".to_string()).into());
        }
        let mut op = self.load(id).await?;
        let phase = op
            .phase_mut(phase_id)
            .ok_or(ServiceError::PhaseNotFound(phase_id))?;
        phase.end += Duration::days(i64::from(extra_days));
        info!(id = %id, phase = %phase_id, extra_days, "rescheduled phase");
        self.persist(op).await
    }

    /// Update the operation's overall status.
    pub async fn set_operation_status(
        &mut self,
        id: OperationId,
        status: OperationStatus,
    ) -> Result<Operation, ServiceError> {
        let mut op = self.load(id).await?;
        op.status = status;
        info!(id = %id, status = %status, "set operation status");
        self.persist(op).await
    }

    /// Fetch one operation.
    pub async fn get(&self, id: OperationId) -> Result<Operation, ServiceError> {
        self.load(id).await
    }

    /// Fetch every operation.
    pub async fn list(&self) -> Result<Vec<Operation>, ServiceError> {
        Ok(self.store.list_operations().await?)
    }

    /// Gantt layout for one operation's timeline.
    pub async fn timeline(&self, id: OperationId) -> Result<TimelineLayout, ServiceError> {
        let op = self.load(id).await?;
        Ok(build_layout(&op.phases))
    }

    /// Derived progress/risk aggregates for one operation.
    pub async fn aggregates_for(
        &self,
        id: OperationId,
    ) -> Result<OperationAggregates, ServiceError> {
        let op = self.load(id).await?;
        Ok(aggregates(&op.phases))
    }

    async fn load(&self, id: OperationId) -> Result<Operation, ServiceError> {
        self.store
            .load_operation(id)
            .await?
            .ok_or(ServiceError::OperationNotFound(id))
    }

    async fn persist(&mut self, mut op: Operation) -> Result<Operation, ServiceError> {
        self.store.save_operation(&op).await?;
        // The store bumped the stored stamp; mirror it on the copy we
        // hand back so a follow-up save does not read as stale.
        op.version += 1;
        Ok(op)
    }
}
