//! Execution log entity <-> model mapper

use remind_core::entities::{ExecutionLogEntry, ExecutionStatus};
use remind_core::error::DomainError;

use crate::models::ExecutionLogModel;

impl TryFrom<ExecutionLogModel> for ExecutionLogEntry {
    type Error = DomainError;

    fn try_from(model: ExecutionLogModel) -> Result<Self, Self::Error> {
        let status = ExecutionStatus::parse(&model.status).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown execution status: {}", model.status))
        })?;

        Ok(ExecutionLogEntry {
            id: model.id,
            reminder_id: model.reminder_id,
            triggered_at: model.triggered_at,
            status,
            error_message: model.error_message,
            rendered_message: model.rendered_message,
        })
    }
}
