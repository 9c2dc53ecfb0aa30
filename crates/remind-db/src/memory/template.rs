//! In-memory implementation of TemplateRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use remind_core::entities::Template;
use remind_core::traits::{RepoResult, TemplateRepository};
use remind_core::value_objects::Snowflake;
use remind_core::DomainError;

/// In-memory implementation of TemplateRepository
#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<HashMap<Uuid, Template>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Template>> {
        Ok(self.templates.read().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Template>> {
        Ok(self
            .templates
            .read()
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn list(&self, creator_id: Option<Snowflake>) -> RepoResult<Vec<Template>> {
        let mut results: Vec<Template> = self
            .templates
            .read()
            .values()
            .filter(|t| creator_id.is_none_or(|c| t.creator_id == c))
            .cloned()
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(results)
    }

    async fn create(&self, template: &Template) -> RepoResult<()> {
        let mut templates = self.templates.write();
        if templates.values().any(|t| t.name == template.name) {
            return Err(DomainError::TemplateNameExists(template.name.clone()));
        }
        templates.insert(template.id, template.clone());
        Ok(())
    }

    async fn update(&self, template: &Template) -> RepoResult<()> {
        let mut templates = self.templates.write();
        if !templates.contains_key(&template.id) {
            return Err(DomainError::TemplateNotFound(template.name.clone()));
        }
        templates.insert(template.id, template.clone());
        Ok(())
    }
}
