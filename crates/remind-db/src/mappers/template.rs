//! Template entity <-> model mapper

use remind_core::entities::{Priority, Template};
use remind_core::error::DomainError;
use remind_core::value_objects::Snowflake;

use crate::models::TemplateModel;

impl TryFrom<TemplateModel> for Template {
    type Error = DomainError;

    fn try_from(model: TemplateModel) -> Result<Self, Self::Error> {
        let priority = Priority::parse(&model.priority).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown priority value: {}", model.priority))
        })?;

        Ok(Template {
            id: model.id,
            name: model.name,
            description: model.description,
            message_pattern: model.message_pattern,
            priority,
            ping_role_ids: model.ping_role_ids.0.into_iter().map(Snowflake::new).collect(),
            ping_user_ids: model.ping_user_ids.0.into_iter().map(Snowflake::new).collect(),
            color: model.color as u32,
            creator_id: Snowflake::new(model.creator_id),
            created_at: model.created_at,
        })
    }
}
