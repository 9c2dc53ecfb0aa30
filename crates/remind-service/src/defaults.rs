//! Stock templates installed on first run

use tracing::{info, instrument};

use remind_core::entities::{Priority, Template};
use remind_core::value_objects::Snowflake;

use crate::services::{ServiceContext, ServiceResult};

struct Stock {
    name: &'static str,
    description: &'static str,
    pattern: &'static str,
    priority: Priority,
}

const STOCK: &[Stock] = &[
    Stock {
        name: "poll_closing_soon",
        description: "Standard poll closing reminder",
        pattern: "⏰ Don't forget to vote in the poll: **{poll_title}**\n\n🕒 Time left: {time_left}\n📊 Poll ID: {poll_id}",
        priority: Priority::Urgent,
    },
    Stock {
        name: "poll_last_call",
        description: "Final call before a poll closes",
        pattern: "🚨 **FINAL CALL** - Poll closing soon!\n\n📊 **Poll:** {poll_title}\n⏰ **Time left:** {time_left}\n\n👉 Vote now: Poll ID `{poll_id}`",
        priority: Priority::VeryUrgent,
    },
    Stock {
        name: "event_starting",
        description: "General event reminder",
        pattern: "📅 Upcoming event: **{event_title}**\n\n🕒 Starting soon!\n🆔 Event ID: {event_id}",
        priority: Priority::Urgent,
    },
    Stock {
        name: "generic_notice",
        description: "Plain notice with a custom message",
        pattern: "{message}",
        priority: Priority::Informational,
    },
];

/// Install the stock templates that do not exist yet.
///
/// Returns the number installed. Safe to call on every start.
#[instrument(skip(ctx))]
pub async fn install_default_templates(
    ctx: &ServiceContext,
    creator_id: Snowflake,
) -> ServiceResult<usize> {
    let mut installed = 0;
    for stock in STOCK {
        if ctx.template_repo().find_by_name(stock.name).await?.is_some() {
            continue;
        }
        let template = Template::new(
            stock.name.to_string(),
            stock.description.to_string(),
            stock.pattern.to_string(),
            stock.priority,
            creator_id,
        );
        ctx.template_repo().create(&template).await?;
        installed += 1;
        info!(name = stock.name, "Default template installed");
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::notify::NullNotifier;

    #[tokio::test]
    async fn test_install_is_idempotent() {
        let ctx = ServiceContext::in_memory(Arc::new(NullNotifier));
        let creator = Snowflake::new(0);

        assert_eq!(install_default_templates(&ctx, creator).await.unwrap(), 4);
        assert_eq!(install_default_templates(&ctx, creator).await.unwrap(), 0);

        let last_call = ctx
            .template_repo()
            .find_by_name("poll_last_call")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(last_call.priority, Priority::VeryUrgent);
    }

    #[tokio::test]
    async fn test_install_skips_existing_without_overwrite() {
        let ctx = ServiceContext::in_memory(Arc::new(NullNotifier));
        let creator = Snowflake::new(0);

        let custom = Template::new(
            "generic_notice".to_string(),
            String::new(),
            "custom body {message}".to_string(),
            Priority::Critical,
            Snowflake::new(42),
        );
        ctx.template_repo().create(&custom).await.unwrap();

        assert_eq!(install_default_templates(&ctx, creator).await.unwrap(), 3);

        let kept = ctx
            .template_repo()
            .find_by_name("generic_notice")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.priority, Priority::Critical);
    }
}
