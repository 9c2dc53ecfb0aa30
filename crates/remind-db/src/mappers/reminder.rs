//! Reminder entity <-> model mapper
//!
//! The target and trigger unions flatten to (kind, value-columns) tuples on
//! the way out and re-validate on the way in.

use chrono::{DateTime, Utc};

use remind_core::entities::{Reminder, Target, TargetKind, Trigger, TriggerKind};
use remind_core::error::DomainError;
use remind_core::value_objects::{PollId, Snowflake};

use crate::models::ReminderModel;

/// Flatten a target to its (kind, id) columns
pub fn target_columns(target: &Target) -> (&'static str, Option<String>) {
    (target.kind().as_str(), target.id().map(String::from))
}

/// Flatten a trigger to its (kind, trigger_time, time_before, interval, max_occurrences) columns
pub fn trigger_columns(
    trigger: &Trigger,
) -> (
    &'static str,
    Option<DateTime<Utc>>,
    Option<i64>,
    Option<i64>,
    Option<i32>,
) {
    match trigger {
        Trigger::SpecificTime(at) => (trigger.kind().as_str(), Some(*at), None, None, None),
        Trigger::TimeBefore { minutes } => {
            (trigger.kind().as_str(), None, Some(*minutes), None, None)
        }
        Trigger::Interval {
            minutes,
            max_occurrences,
        } => (
            trigger.kind().as_str(),
            None,
            None,
            Some(*minutes),
            *max_occurrences,
        ),
    }
}

fn bad_row(msg: impl Into<String>) -> DomainError {
    DomainError::DatabaseError(msg.into())
}

impl TryFrom<ReminderModel> for Reminder {
    type Error = DomainError;

    fn try_from(model: ReminderModel) -> Result<Self, Self::Error> {
        let target = match TargetKind::parse(&model.target_kind)
            .ok_or_else(|| bad_row(format!("unknown target kind: {}", model.target_kind)))?
        {
            TargetKind::Poll => Target::Poll(PollId::new(
                model
                    .target_id
                    .clone()
                    .ok_or_else(|| bad_row("poll target without target_id"))?,
            )),
            TargetKind::Event => Target::Event(
                model
                    .target_id
                    .clone()
                    .ok_or_else(|| bad_row("event target without target_id"))?,
            ),
            TargetKind::Custom => Target::Custom,
        };

        let trigger = match TriggerKind::parse(&model.trigger_kind)
            .ok_or_else(|| bad_row(format!("unknown trigger kind: {}", model.trigger_kind)))?
        {
            TriggerKind::SpecificTime => Trigger::SpecificTime(
                model
                    .trigger_time
                    .ok_or_else(|| bad_row("specific_time trigger without trigger_time"))?,
            ),
            TriggerKind::TimeBefore => Trigger::TimeBefore {
                minutes: model
                    .time_before_minutes
                    .ok_or_else(|| bad_row("time_before trigger without minutes"))?,
            },
            TriggerKind::Interval => Trigger::Interval {
                minutes: model
                    .interval_minutes
                    .ok_or_else(|| bad_row("interval trigger without minutes"))?,
                max_occurrences: model.max_occurrences,
            },
        };

        Ok(Reminder {
            id: model.id,
            template_id: model.template_id,
            target,
            channel_id: Snowflake::new(model.channel_id),
            trigger,
            occurrence_count: model.occurrence_count,
            next_trigger: model.next_trigger,
            last_triggered: model.last_triggered,
            is_active: model.is_active,
            custom_data: model.custom_data.0,
            creator_id: Snowflake::new(model.creator_id),
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn base_model() -> ReminderModel {
        ReminderModel {
            id: Uuid::new_v4(),
            template_id: Uuid::new_v4(),
            target_kind: "custom".to_string(),
            target_id: None,
            channel_id: 42,
            trigger_kind: "interval".to_string(),
            trigger_time: None,
            time_before_minutes: None,
            interval_minutes: Some(5),
            is_recurring: true,
            max_occurrences: Some(3),
            occurrence_count: 0,
            next_trigger: None,
            last_triggered: None,
            is_active: true,
            custom_data: Json(HashMap::new()),
            creator_id: 7,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_interval_roundtrip() {
        let reminder = Reminder::try_from(base_model()).unwrap();
        assert_eq!(
            reminder.trigger,
            Trigger::Interval {
                minutes: 5,
                max_occurrences: Some(3)
            }
        );
        assert!(reminder.is_recurring());

        let (kind, time, before, interval, max) = trigger_columns(&reminder.trigger);
        assert_eq!(kind, "interval");
        assert_eq!(time, None);
        assert_eq!(before, None);
        assert_eq!(interval, Some(5));
        assert_eq!(max, Some(3));
    }

    #[test]
    fn test_poll_target_requires_id() {
        let mut model = base_model();
        model.target_kind = "poll".to_string();
        model.target_id = None;
        assert!(Reminder::try_from(model).is_err());

        let mut model = base_model();
        model.target_kind = "poll".to_string();
        model.target_id = Some("poll_abc12345".to_string());
        let reminder = Reminder::try_from(model).unwrap();
        assert_eq!(reminder.target, Target::Poll(PollId::new("poll_abc12345")));
    }

    #[test]
    fn test_trigger_value_column_missing() {
        let mut model = base_model();
        model.trigger_kind = "specific_time".to_string();
        model.trigger_time = None;
        assert!(Reminder::try_from(model).is_err());
    }

    #[test]
    fn test_target_columns() {
        assert_eq!(target_columns(&Target::Custom), ("custom", None));
        assert_eq!(
            target_columns(&Target::Event("standup".to_string())),
            ("event", Some("standup".to_string()))
        );
    }
}
