//! Vote entity - one user's selection of one poll option

use chrono::{DateTime, Utc};

use crate::value_objects::{PollId, Snowflake};

/// Vote entity
///
/// Votes are replaced wholesale on each reconciliation pass (delete then
/// insert as one unit), never appended to, and bulk-deleted with their poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub poll_id: PollId,
    pub user_id: Snowflake,
    pub option_index: usize,
    pub voted_at: DateTime<Utc>,
}

impl Vote {
    /// Create a new Vote cast now
    pub fn new(poll_id: PollId, user_id: Snowflake, option_index: usize) -> Self {
        Self {
            poll_id,
            user_id,
            option_index,
            voted_at: Utc::now(),
        }
    }
}
