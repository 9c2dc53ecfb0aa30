//! Target resolution
//!
//! One `resolve` covers all target kinds: polls resolve against live store
//! state, events degrade to static placeholders, custom targets contribute
//! nothing. A vanished target is not an error here; callers decide what an
//! empty resolution means.

use chrono::{DateTime, Utc};

use remind_core::entities::Target;
use remind_core::render::RenderContext;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What a target contributes to scheduling and rendering
#[derive(Debug, Clone, Default)]
pub struct ResolvedTarget {
    /// Live deadline, when the target has one (time_before input)
    pub expires_at: Option<DateTime<Utc>>,
    /// Render-context fields derived from the target
    pub fields: Vec<(&'static str, String)>,
}

impl ResolvedTarget {
    /// Copy the derived fields into a render context
    pub fn apply(&self, ctx: &mut RenderContext) {
        for (key, value) in &self.fields {
            ctx.insert(*key, value.clone());
        }
    }
}

/// Resolves a reminder's target just-in-time
pub struct TargetResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TargetResolver<'a> {
    /// Create a new TargetResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a target's live state at `now`
    pub async fn resolve(&self, target: &Target, now: DateTime<Utc>) -> ServiceResult<ResolvedTarget> {
        match target {
            Target::Poll(poll_id) => {
                let Some(poll) = self.ctx.poll_repo().find_by_id(poll_id).await? else {
                    // Target vanished; the reminder stays valid but unresolved
                    return Ok(ResolvedTarget::default());
                };
                let status = if poll.is_active && !poll.is_expired_at(now) {
                    "active"
                } else {
                    "closed"
                };
                Ok(ResolvedTarget {
                    expires_at: poll.expires_at,
                    fields: vec![
                        ("poll_title", poll.question.clone()),
                        ("poll_id", poll.id.to_string()),
                        ("time_left", poll.time_left_at(now)),
                        ("poll_status", status.to_string()),
                    ],
                })
            }
            Target::Event(event_id) => Ok(ResolvedTarget {
                expires_at: None,
                fields: vec![
                    ("event_title", event_id.clone()),
                    ("event_id", event_id.clone()),
                ],
            }),
            Target::Custom => Ok(ResolvedTarget::default()),
        }
    }
}
