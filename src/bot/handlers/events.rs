//! Gateway event dispatch.
//!
//! Routes raw serenity events to their handlers: every message touches the
//! chat-activity tracker, and pushpin reactions in configured threads pin or
//! unpin their message.

use crate::{bot::BotData, errors::Result};
use poise::serenity_prelude as serenity;

/// Handles a raw gateway event.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Message { .. } => {
            data.activity.touch();
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            super::pin::handle_pin_reaction(ctx, add_reaction, &data.config, true).await?;
        }
        serenity::FullEvent::ReactionRemove { removed_reaction } => {
            super::pin::handle_pin_reaction(ctx, removed_reaction, &data.config, false).await?;
        }
        _ => {}
    }
    Ok(())
}
