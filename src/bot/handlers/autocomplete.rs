//! Autocomplete handlers for Discord slash command parameters.
//!
//! Both handlers run a case-insensitive prefix search against the database
//! and return plain item names; the receiving command re-resolves the final
//! string, so a user bypassing autocomplete still gets prefix matching.

use crate::{bot::BotData, core::item, errors::Error};

/// Discord shows at most a handful of suggestions; keep the list short.
const SUGGESTION_LIMIT: usize = 10;

/// Provides autocomplete suggestions for items currently in the store.
///
/// Copies of the same catalog entry share a name, so consecutive duplicates
/// are collapsed before returning.
pub async fn autocomplete_store_item(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Some(guild_id) = ctx.guild_id() else {
        return Vec::new();
    };
    let db = &ctx.data().database;

    let Ok(items) =
        item::search_store_by_prefix(db, &guild_id.to_string(), partial, SUGGESTION_LIMIT).await
    else {
        return Vec::new();
    };

    let mut names: Vec<String> = items.into_iter().map(|i| i.name).collect();
    names.dedup();
    names
}

/// Provides autocomplete suggestions for items in the caller's inventory.
pub async fn autocomplete_inventory_item(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Some(guild_id) = ctx.guild_id() else {
        return Vec::new();
    };
    let db = &ctx.data().database;
    let user_id = ctx.author().id.to_string();

    let Ok(items) = item::search_inventory_by_prefix(
        db,
        &guild_id.to_string(),
        &user_id,
        partial,
        SUGGESTION_LIMIT,
    )
    .await
    else {
        return Vec::new();
    };

    let mut names: Vec<String> = items.into_iter().map(|i| i.name).collect();
    names.dedup();
    names
}
