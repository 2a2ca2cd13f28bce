//! Shared presentation helpers for item embeds.

use crate::entities::item::Model as ItemModel;
use poise::serenity_prelude as serenity;

/// Embed color shared by all item cards.
pub(crate) const ITEM_EMBED_COLOR: u32 = 0x0003_8FD0;

/// Builds the inspection embed shown by both `/store inspect` and
/// `/inventory inspect`.
pub(crate) fn item_embed(item: &ItemModel, highest_price: Option<i64>) -> serenity::CreateEmbed {
    let highest = highest_price.map_or_else(|| "Never sold".to_string(), |p| format!("${p}"));

    serenity::CreateEmbed::new()
        .title(item.name.clone())
        .color(ITEM_EMBED_COLOR)
        .field("Description", item.description.clone(), false)
        .field("Purchase price", format!("${}", item.price), false)
        .field("Highest known price", highest, false)
        .field(
            "Metadata",
            format!("```json\n{}\n```", pretty_metadata(&item.metadata)),
            false,
        )
}

/// Pretty-prints the stored metadata blob; falls back to the raw string if it
/// somehow stopped being JSON.
fn pretty_metadata(metadata: &str) -> String {
    serde_json::from_str::<serde_json::Value>(metadata)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| metadata.to_string())
}
