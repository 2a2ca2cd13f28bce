//! Wallet Discord command - `/wallet`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::account,
        errors::{Error, Result},
    };

    /// Shows your current wallet balance.
    ///
    /// The wallet is created with the starting balance on first use.
    #[poise::command(slash_command, guild_only)]
    pub async fn wallet(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let wallet =
            account::get_or_create_account(db, &guild_id.to_string(), &user_id).await?;

        ctx.send(
            poise::CreateReply::default()
                .content(format!("You have `${}`", wallet.balance))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
