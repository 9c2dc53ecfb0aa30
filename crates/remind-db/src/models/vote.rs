//! Vote database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub poll_id: String,
    pub user_id: i64,
    pub option_index: i32,
    pub voted_at: DateTime<Utc>,
}

/// Aggregated per-option vote count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct VoteCountModel {
    pub option_index: i32,
    pub count: i64,
}
