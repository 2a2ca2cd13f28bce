//! Reaction-based thread pinning.
//!
//! Reacting with a pushpin in a configured thread pins the message; removing
//! the reaction unpins it. Which user may do this per thread comes from the
//! `THREAD_PIN_OWNERS` registry in the application config.

use crate::{config::AppConfig, errors::Result};
use poise::serenity_prelude as serenity;
use tracing::error;

const PIN_EMOJI: &str = "\u{1F4CC}"; // 📌

/// Pins or unpins the reacted-to message when the reaction is a pushpin in a
/// configured thread from that thread's registered owner. All other
/// reactions are ignored silently.
pub async fn handle_pin_reaction(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    config: &AppConfig,
    pin: bool,
) -> Result<()> {
    // Must be in a guild
    if reaction.guild_id.is_none() {
        return Ok(());
    }

    // Must be the pushpin
    if !reaction.emoji.unicode_eq(PIN_EMOJI) {
        return Ok(());
    }

    // Must come from the registered owner of this thread
    let Some(user_id) = reaction.user_id else {
        return Ok(());
    };
    let Some(owner) = config.thread_pin_owners.get(&reaction.channel_id.get()) else {
        return Ok(());
    };
    if *owner != user_id.get() {
        return Ok(());
    }

    // Must be a thread
    let channel = reaction.channel_id.to_channel(ctx).await?;
    let Some(guild_channel) = channel.guild() else {
        return Ok(());
    };
    if guild_channel.thread_metadata.is_none() {
        return Ok(());
    }

    let message = reaction.message(ctx).await?;
    let result = if pin {
        message.pin(ctx).await
    } else {
        message.unpin(ctx).await
    };

    if let Err(e) = result {
        let action = if pin { "pin" } else { "unpin" };
        error!(
            "Failed to {action} {} for {user_id} in {}: {e}",
            message.id, reaction.channel_id
        );
    }

    Ok(())
}
