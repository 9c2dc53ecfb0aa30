//! Template service
//!
//! Named message templates with priority and ping metadata.

use tracing::{info, instrument};

use remind_core::entities::{Priority, Template};
use remind_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Template service
pub struct TemplateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TemplateService<'a> {
    /// Create a new TemplateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new template with a unique name
    #[instrument(skip(self, message_pattern))]
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        message_pattern: &str,
        priority: Priority,
        ping_role_ids: Vec<Snowflake>,
        ping_user_ids: Vec<Snowflake>,
        creator_id: Snowflake,
    ) -> ServiceResult<Template> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("template name must not be empty"));
        }
        if message_pattern.trim().is_empty() {
            return Err(ServiceError::validation(
                "template message pattern must not be empty",
            ));
        }

        let template = Template::new(
            name.to_string(),
            description.to_string(),
            message_pattern.to_string(),
            priority,
            creator_id,
        )
        .with_pings(ping_role_ids, ping_user_ids);

        self.ctx.template_repo().create(&template).await?;

        info!(name, priority = priority.as_str(), "Template created");

        Ok(template)
    }

    /// Get a template by name
    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> ServiceResult<Template> {
        self.ctx
            .template_repo()
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found("Template", name))
    }

    /// List templates, optionally filtered by creator
    #[instrument(skip(self))]
    pub async fn list(&self, creator_id: Option<Snowflake>) -> ServiceResult<Vec<Template>> {
        Ok(self.ctx.template_repo().list(creator_id).await?)
    }

    /// Update an existing template's pattern, priority, or pings
    #[instrument(skip(self, template))]
    pub async fn update(&self, template: &Template) -> ServiceResult<()> {
        if template.message_pattern.trim().is_empty() {
            return Err(ServiceError::validation(
                "template message pattern must not be empty",
            ));
        }
        self.ctx.template_repo().update(template).await?;
        info!(name = %template.name, "Template updated");
        Ok(())
    }
}
