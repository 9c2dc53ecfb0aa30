//! Execution log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the execution_logs table
#[derive(Debug, Clone, FromRow)]
pub struct ExecutionLogModel {
    pub id: Uuid,
    pub reminder_id: Uuid,
    pub triggered_at: DateTime<Utc>,
    pub status: String,
    pub error_message: Option<String>,
    pub rendered_message: Option<String>,
}
