//! Inventory Discord commands - `/inventory view` and `/inventory inspect`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{item, ledger},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for a member's inventory.
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("inventory_view", "inventory_inspect")
    )]
    pub async fn inventory(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Inventory commands. Available subcommands:\n\
            `/inventory view` - Show the items in your inventory\n\
            `/inventory inspect` - Inspect a single item you own";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the items in the caller's inventory with their total value.
    #[poise::command(slash_command, rename = "view")]
    pub async fn inventory_view(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let items = item::get_inventory_items(db, &guild_id.to_string(), &user_id).await?;
        if items.is_empty() {
            ctx.send(
                poise::CreateReply::default()
                    .content("Your inventory is empty. Buy something with `/store buy`!")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let lines: Vec<String> = items
            .iter()
            .map(|i| format!("**{}** - {} [${}]", i.name, i.description, i.price))
            .collect();
        let total: i64 = items.iter().map(|i| i.price).sum();

        let embed = serenity::CreateEmbed::new()
            .color(utils::ITEM_EMBED_COLOR)
            .description(format!(
                "Here are the items in your inventory\n{}\nTotal value: ${total}",
                lines.join("\n")
            ));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Inspects a single item from the caller's inventory.
    #[poise::command(slash_command, rename = "inspect")]
    pub async fn inventory_inspect(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Which item do you want to inspect?"]
        #[autocomplete = "autocomplete::autocomplete_inventory_item"]
        item: String,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let found =
            item::resolve_inventory_item(db, &guild_id.to_string(), &user_id, &item).await?;
        let highest = ledger::max_sale_price(db, &guild_id.to_string(), &found.item_id).await?;

        ctx.send(
            poise::CreateReply::default()
                .embed(utils::item_embed(&found, highest))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
