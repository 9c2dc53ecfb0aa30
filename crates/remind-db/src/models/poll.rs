//! Poll database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for the polls table
#[derive(Debug, Clone, FromRow)]
pub struct PollModel {
    pub poll_id: String,
    pub question: String,
    pub options: Json<Vec<String>>,
    pub creator_id: i64,
    pub channel_id: i64,
    pub is_active: bool,
    pub is_advanced: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}
