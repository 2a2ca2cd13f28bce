//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**GuildShop Help**\n\
        Here is a summary of all available commands.\n\n\
        **Economy Commands**\n\
        • `/wallet` - Shows your current wallet balance.\n\
        • `/store view` - Shows the items in the server's store.\n\
        • `/store inspect <item>` - Inspects a single store item.\n\
        • `/store add <name> <description> <price> [metadata] [count]` - Adds items (Manage Server).\n\
        • `/store buy <item>` - Buys an item from the store.\n\
        • `/inventory view` - Shows the items you own.\n\
        • `/inventory inspect <item>` - Inspects an item you own.\n\n\
        **Moderation & Utility**\n\
        • `/purge [dry_run]` - Purges inactive members (Kick Members).\n\
        • `/report <member> <reason>` - Reports an issue to the staff.\n\
        • `/revive_chat` - Posts a random conversation topic.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
