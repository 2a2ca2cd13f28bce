//! Store Discord commands - `/store view`, `/store inspect`, `/store add`,
//! and `/store buy`.
//!
//! The buy path is the only multi-entity mutation in the bot and runs
//! entirely through the purchase coordinator in `core::purchase`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{item, ledger, purchase},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::collections::{HashMap, HashSet};

    /// Parent command for the server's store.
    #[poise::command(
        slash_command,
        guild_only,
        subcommands("store_view", "store_inspect", "store_add", "store_buy")
    )]
    pub async fn store(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Store commands. Available subcommands:\n\
            `/store view` - Show the items in the server's store\n\
            `/store inspect` - Inspect a single item in the store\n\
            `/store add` - Add a new item to the store (Manage Server)\n\
            `/store buy` - Buy an item from the store";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the items currently in the server's store.
    ///
    /// Copies of the same catalog entry are collapsed into a count.
    #[poise::command(slash_command, rename = "view")]
    pub async fn store_view(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;

        let items = item::get_store_items(db, &guild_id.to_string()).await?;
        if items.is_empty() {
            ctx.send(
                poise::CreateReply::default()
                    .content("The store is empty right now.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let mut copies: HashMap<&str, usize> = HashMap::new();
        for i in &items {
            *copies.entry(i.item_id.as_str()).or_default() += 1;
        }

        let mut seen = HashSet::new();
        let mut lines = Vec::new();
        for i in &items {
            if seen.insert(i.item_id.as_str()) {
                lines.push(format!(
                    "**{}** - {} (x{}) [${}]",
                    i.name,
                    i.description,
                    copies[i.item_id.as_str()],
                    i.price
                ));
            }
        }

        let embed = serenity::CreateEmbed::new()
            .color(utils::ITEM_EMBED_COLOR)
            .description(format!(
                "Here are the items in the store\n{}",
                lines.join("\n")
            ));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Inspects a single item in the store: description, price, highest
    /// known sale price, and metadata.
    #[poise::command(slash_command, rename = "inspect")]
    pub async fn store_inspect(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The item you want to inspect"]
        #[autocomplete = "autocomplete::autocomplete_store_item"]
        item: String,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;

        let found = item::resolve_store_item(db, &guild_id.to_string(), &item).await?;
        let highest = ledger::max_sale_price(db, &guild_id.to_string(), &found.item_id).await?;

        ctx.send(
            poise::CreateReply::default()
                .embed(utils::item_embed(&found, highest))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Adds a new item to the server's store, optionally replicated as
    /// several purchasable copies.
    #[poise::command(slash_command, rename = "add", required_permissions = "MANAGE_GUILD")]
    pub async fn store_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The item's name"] name: String,
        #[description = "The item's description"] description: String,
        #[description = "The item's price"]
        #[min = 0]
        price: i64,
        #[description = "The item's metadata as JSON (defaults to {})"] metadata: Option<String>,
        #[description = "How many copies to add to the store (default 1)"]
        #[min = 1]
        count: Option<i64>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;
        let metadata = metadata.unwrap_or_else(|| "{}".to_string());
        let count = count.unwrap_or(1);

        let copies = item::add_items_to_store(
            db,
            &guild_id.to_string(),
            &name,
            &description,
            price,
            &metadata,
            count,
        )
        .await?;

        ctx.say(format!(
            "**{name}** - \"{description}\" has been added to the store for ${price} (x{})",
            copies.len()
        ))
        .await?;
        Ok(())
    }

    /// Buys an item from the server's store.
    #[poise::command(slash_command, rename = "buy")]
    pub async fn store_buy(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The item you want to buy"]
        #[autocomplete = "autocomplete::autocomplete_store_item"]
        item: String,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let wanted = item::resolve_store_item(db, &guild_id.to_string(), &item).await?;
        let receipt =
            purchase::buy_item(db, &guild_id.to_string(), &user_id, &wanted.uuid).await?;

        ctx.say(format!(
            "Purchased **{}** - \"{}\" for ${}. You have ${} left.",
            receipt.item.name, receipt.item.description, receipt.record.price, receipt.account.balance
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
