//! Poll entity <-> model mapper

use remind_core::entities::Poll;
use remind_core::value_objects::{PollId, Snowflake};

use crate::models::PollModel;

impl From<PollModel> for Poll {
    fn from(model: PollModel) -> Self {
        Poll {
            id: PollId::new(model.poll_id),
            question: model.question,
            options: model.options.0,
            creator_id: Snowflake::new(model.creator_id),
            channel_id: Snowflake::new(model.channel_id),
            is_active: model.is_active,
            is_advanced: model.is_advanced,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    #[test]
    fn test_model_to_entity() {
        let model = PollModel {
            poll_id: "poll_abc12345".to_string(),
            question: "Best day?".to_string(),
            options: Json(vec!["Sat".to_string(), "Sun".to_string()]),
            creator_id: 1,
            channel_id: 2,
            is_active: true,
            is_advanced: false,
            created_at: Utc::now(),
            expires_at: None,
        };
        let poll = Poll::from(model);
        assert_eq!(poll.id, PollId::new("poll_abc12345"));
        assert_eq!(poll.options.len(), 2);
        assert!(poll.is_active);
    }
}
