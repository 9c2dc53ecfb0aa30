//! Trigger calculation - pure next-fire-time computation
//!
//! Interval triggers are recomputed from the completion time of each firing,
//! not anchored to the original schedule, so intervals accumulate drift under
//! load. That matches the observed behavior this engine reproduces; treat a
//! drift-free variant as a deliberate deviation, not a fix.

use chrono::{DateTime, Duration, Utc};

use crate::entities::Trigger;

/// Compute a trigger's next fire time, or `None` when it should stay unscheduled.
///
/// `target_expires_at` is the live target deadline (polls only); `time_before`
/// triggers whose window has already passed are left unscheduled rather than
/// treated as an error, and a vanished target (no expiry available) likewise
/// yields `None` without failing the creating call.
pub fn next_trigger(
    trigger: &Trigger,
    now: DateTime<Utc>,
    target_expires_at: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match trigger {
        Trigger::SpecificTime(at) => Some(*at),
        Trigger::TimeBefore { minutes } => {
            let fire_at = target_expires_at? - Duration::minutes(*minutes);
            (fire_at > now).then_some(fire_at)
        }
        Trigger::Interval { minutes, .. } => Some(now + Duration::minutes(*minutes)),
    }
}
