//! Opstrack operation management service.
//!
//! Sits between the presentation layer and the engine/storage: each
//! command loads the full operation, validates, applies the engine
//! transformation, and persists the replacement record.

#![warn(missing_docs)]

mod manager;
mod portfolio;

pub use manager::{CreateOperationRequest, OperationManager, ServiceError};
pub use portfolio::{done_phase_count, summarize, PortfolioSummary};
