//! Reminder database model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the reminders table
///
/// The trigger and target unions are flattened to a kind column plus value
/// columns; exactly one of the trigger value columns is set per kind.
#[derive(Debug, Clone, FromRow)]
pub struct ReminderModel {
    pub id: Uuid,
    pub template_id: Uuid,
    pub target_kind: String,
    pub target_id: Option<String>,
    pub channel_id: i64,
    pub trigger_kind: String,
    pub trigger_time: Option<DateTime<Utc>>,
    pub time_before_minutes: Option<i64>,
    pub interval_minutes: Option<i64>,
    pub is_recurring: bool,
    pub max_occurrences: Option<i32>,
    pub occurrence_count: i32,
    pub next_trigger: Option<DateTime<Utc>>,
    pub last_triggered: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub custom_data: Json<HashMap<String, String>>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}
