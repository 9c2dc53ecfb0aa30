//! PostgreSQL implementation of TemplateRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use remind_core::entities::Template;
use remind_core::traits::{RepoResult, TemplateRepository};
use remind_core::value_objects::Snowflake;

use crate::models::TemplateModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = "id, name, description, message_pattern, priority, \
     ping_role_ids, ping_user_ids, color, creator_id, created_at";

/// PostgreSQL implementation of TemplateRepository
#[derive(Clone)]
pub struct PgTemplateRepository {
    pool: PgPool,
}

impl PgTemplateRepository {
    /// Create a new PgTemplateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Template>> {
        let result = sqlx::query_as::<_, TemplateModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM templates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Template::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Template>> {
        let result = sqlx::query_as::<_, TemplateModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM templates WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Template::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, creator_id: Option<Snowflake>) -> RepoResult<Vec<Template>> {
        let results = match creator_id {
            Some(creator) => {
                sqlx::query_as::<_, TemplateModel>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM templates WHERE creator_id = $1 ORDER BY name"
                ))
                .bind(creator.into_inner())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TemplateModel>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM templates ORDER BY name"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        results.into_iter().map(Template::try_from).collect()
    }

    #[instrument(skip(self, template))]
    async fn create(&self, template: &Template) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO templates
                (id, name, description, message_pattern, priority,
                 ping_role_ids, ping_user_ids, color, creator_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.message_pattern)
        .bind(template.priority.as_str())
        .bind(Json(
            template
                .ping_role_ids
                .iter()
                .map(|s| s.into_inner())
                .collect::<Vec<i64>>(),
        ))
        .bind(Json(
            template
                .ping_user_ids
                .iter()
                .map(|s| s.into_inner())
                .collect::<Vec<i64>>(),
        ))
        .bind(template.color as i32)
        .bind(template.creator_id.into_inner())
        .bind(template.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                remind_core::DomainError::TemplateNameExists(template.name.clone())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, template))]
    async fn update(&self, template: &Template) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE templates
            SET description = $2, message_pattern = $3, priority = $4,
                ping_role_ids = $5, ping_user_ids = $6, color = $7
            WHERE id = $1
            "#,
        )
        .bind(template.id)
        .bind(&template.description)
        .bind(&template.message_pattern)
        .bind(template.priority.as_str())
        .bind(Json(
            template
                .ping_role_ids
                .iter()
                .map(|s| s.into_inner())
                .collect::<Vec<i64>>(),
        ))
        .bind(Json(
            template
                .ping_user_ids
                .iter()
                .map(|s| s.into_inner())
                .collect::<Vec<i64>>(),
        ))
        .bind(template.color as i32)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTemplateRepository>();
    }
}
