//! Manual chat-revival command - `/revive_chat`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::topics,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    const REVIVAL_EMBED_COLOR: u32 = 0x00E9_1E63;

    /// Tries to revive chat with a new random topic.
    #[poise::command(slash_command)]
    pub async fn revive_chat(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let topic = topics::random_topic();

        let embed = serenity::CreateEmbed::new()
            .title("Chat Revival")
            .color(REVIVAL_EMBED_COLOR)
            .description(format!(
                "If you don't know what to talk about, here's a random topic.\n\n**__{topic}__**"
            ))
            .footer(serenity::CreateEmbedFooter::new(
                "To generate these manually use `/revive_chat`.",
            ));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
