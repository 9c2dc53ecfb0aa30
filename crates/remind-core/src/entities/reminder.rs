//! Reminder entity - a scheduled, possibly recurring notification job

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{PollId, Snowflake};

/// What a reminder is contextually about, resolved just-in-time for rendering.
///
/// A loose reference: the target may vanish without invalidating the reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Poll(PollId),
    Event(String),
    Custom,
}

impl Target {
    /// The kind tag for this target
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Poll(_) => TargetKind::Poll,
            Self::Event(_) => TargetKind::Event,
            Self::Custom => TargetKind::Custom,
        }
    }

    /// The loose target id, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Poll(id) => Some(id.as_str()),
            Self::Event(id) => Some(id),
            Self::Custom => None,
        }
    }
}

/// Tag for the target union, as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Poll,
    Event,
    Custom,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poll => "poll",
            Self::Event => "event",
            Self::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "poll" => Some(Self::Poll),
            "event" => Some(Self::Event),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Policy for computing a reminder's next firing time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Fire exactly once at an absolute time
    SpecificTime(DateTime<Utc>),
    /// Fire once, this many minutes before the target expires
    TimeBefore { minutes: i64 },
    /// Fire every `minutes`, optionally capped at `max_occurrences` firings
    Interval {
        minutes: i64,
        max_occurrences: Option<i32>,
    },
}

impl Trigger {
    /// The kind tag for this trigger
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::SpecificTime(_) => TriggerKind::SpecificTime,
            Self::TimeBefore { .. } => TriggerKind::TimeBefore,
            Self::Interval { .. } => TriggerKind::Interval,
        }
    }

    /// Interval triggers recur; the others fire at most once
    #[inline]
    pub fn is_recurring(&self) -> bool {
        matches!(self, Self::Interval { .. })
    }
}

/// Tag for the trigger union, as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    SpecificTime,
    TimeBefore,
    Interval,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpecificTime => "specific_time",
            Self::TimeBefore => "time_before",
            Self::Interval => "interval",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "specific_time" => Some(Self::SpecificTime),
            "time_before" => Some(Self::TimeBefore),
            "interval" => Some(Self::Interval),
            _ => None,
        }
    }
}

/// Reminder entity
///
/// Mutated only by the scheduler/executor (occurrence_count, next_trigger,
/// is_active) and by explicit cancel. Never hard-deleted, so execution logs
/// keep a valid parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: Uuid,
    pub template_id: Uuid,
    pub target: Target,
    pub channel_id: Snowflake,
    pub trigger: Trigger,
    pub occurrence_count: i32,
    pub next_trigger: Option<DateTime<Utc>>,
    pub last_triggered: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub custom_data: HashMap<String, String>,
    pub creator_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Create a new active Reminder with no schedule yet
    pub fn new(
        template_id: Uuid,
        target: Target,
        channel_id: Snowflake,
        trigger: Trigger,
        creator_id: Snowflake,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id,
            target,
            channel_id,
            trigger,
            occurrence_count: 0,
            next_trigger: None,
            last_triggered: None,
            is_active: true,
            custom_data: HashMap::new(),
            creator_id,
            created_at: Utc::now(),
        }
    }

    /// Attach caller-supplied context data (wins over computed fields at render time)
    pub fn with_custom_data(mut self, data: HashMap<String, String>) -> Self {
        self.custom_data = data;
        self
    }

    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.trigger.is_recurring()
    }

    /// Whether another occurrence is allowed after the current one
    pub fn under_occurrence_cap(&self) -> bool {
        match self.trigger {
            Trigger::Interval {
                max_occurrences: Some(cap),
                ..
            } => self.occurrence_count < cap,
            Trigger::Interval { .. } => true,
            _ => false,
        }
    }

    /// Record a successful firing at `now`
    pub fn record_firing(&mut self, now: DateTime<Utc>) {
        self.last_triggered = Some(now);
        self.occurrence_count += 1;
    }

    /// Deactivate (terminal state; best-effort scheduler removal happens elsewhere)
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.next_trigger = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval_reminder(max: Option<i32>) -> Reminder {
        Reminder::new(
            Uuid::new_v4(),
            Target::Custom,
            Snowflake::new(1),
            Trigger::Interval {
                minutes: 5,
                max_occurrences: max,
            },
            Snowflake::new(2),
        )
    }

    #[test]
    fn test_target_kind_and_id() {
        let t = Target::Poll(PollId::new("poll_12345678"));
        assert_eq!(t.kind(), TargetKind::Poll);
        assert_eq!(t.id(), Some("poll_12345678"));
        assert_eq!(Target::Custom.id(), None);
    }

    #[test]
    fn test_trigger_kind_roundtrip() {
        for k in [
            TriggerKind::SpecificTime,
            TriggerKind::TimeBefore,
            TriggerKind::Interval,
        ] {
            assert_eq!(TriggerKind::parse(k.as_str()), Some(k));
        }
    }

    #[test]
    fn test_occurrence_cap() {
        let mut r = interval_reminder(Some(2));
        assert!(r.under_occurrence_cap());
        r.record_firing(Utc::now());
        assert!(r.under_occurrence_cap());
        r.record_firing(Utc::now());
        assert!(!r.under_occurrence_cap());
    }

    #[test]
    fn test_uncapped_interval_recurs() {
        let mut r = interval_reminder(None);
        for _ in 0..10 {
            r.record_firing(Utc::now());
        }
        assert!(r.under_occurrence_cap());
        assert_eq!(r.occurrence_count, 10);
    }

    #[test]
    fn test_one_shot_never_under_cap() {
        let r = Reminder::new(
            Uuid::new_v4(),
            Target::Custom,
            Snowflake::new(1),
            Trigger::SpecificTime(Utc::now()),
            Snowflake::new(2),
        );
        assert!(!r.is_recurring());
        assert!(!r.under_occurrence_cap());
    }

    #[test]
    fn test_deactivate_clears_schedule() {
        let mut r = interval_reminder(None);
        r.next_trigger = Some(Utc::now());
        r.deactivate();
        assert!(!r.is_active);
        assert!(r.next_trigger.is_none());
    }
}
