//! Vote entity <-> model mapper

use remind_core::entities::Vote;
use remind_core::value_objects::{PollId, Snowflake};

use crate::models::VoteModel;

impl From<VoteModel> for Vote {
    fn from(model: VoteModel) -> Self {
        Vote {
            poll_id: PollId::new(model.poll_id),
            user_id: Snowflake::new(model.user_id),
            option_index: model.option_index as usize,
            voted_at: model.voted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_entity() {
        let model = VoteModel {
            poll_id: "poll_abc12345".to_string(),
            user_id: 9,
            option_index: 3,
            voted_at: Utc::now(),
        };
        let vote = Vote::from(model);
        assert_eq!(vote.option_index, 3);
        assert_eq!(vote.user_id, Snowflake::new(9));
    }
}
