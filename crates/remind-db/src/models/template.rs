//! Template database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the templates table
#[derive(Debug, Clone, FromRow)]
pub struct TemplateModel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub message_pattern: String,
    pub priority: String,
    pub ping_role_ids: Json<Vec<i64>>,
    pub ping_user_ids: Json<Vec<i64>>,
    pub color: i32,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}
