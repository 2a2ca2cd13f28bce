//! Price-history ledger logic - append-only sale records.
//!
//! Every completed purchase appends exactly one record; nothing ever updates
//! or deletes one. The ledger answers one query: the highest price a catalog
//! entry has ever sold for in a guild.

use crate::{
    entities::{PriceHistory, price_history},
    errors::Result,
};
use sea_orm::{FromQueryResult, QuerySelect, Set, prelude::*};
use std::fmt;

/// A tagged party identifier on a ledger record.
///
/// Distinguishes the guild's store (`guild:<id>`) from a member
/// (`member:<id>`), so the original stocking sale stays distinguishable from
/// a peer resale if one is ever added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyRef {
    /// The guild itself, i.e. the store
    Guild(String),
    /// A specific member
    Member(String),
}

impl fmt::Display for PartyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guild(id) => write!(f, "guild:{id}"),
            Self::Member(id) => write!(f, "member:{id}"),
        }
    }
}

impl PartyRef {
    /// Parses a stored tag back into a party reference. Returns None for
    /// unknown tags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (tag, id) = value.split_once(':')?;
        match tag {
            "guild" => Some(Self::Guild(id.to_string())),
            "member" => Some(Self::Member(id.to_string())),
            _ => None,
        }
    }
}

/// Appends one sale record to the ledger.
pub async fn append_sale<C>(
    db: &C,
    guild_id: &str,
    item_id: &str,
    price: i64,
    seller: &PartyRef,
    buyer: &PartyRef,
    date: chrono::DateTime<chrono::Utc>,
) -> Result<price_history::Model>
where
    C: ConnectionTrait,
{
    let record = price_history::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        item_id: Set(item_id.to_string()),
        date: Set(date),
        price: Set(price),
        seller: Set(seller.to_string()),
        buyer: Set(buyer.to_string()),
        ..Default::default()
    };
    record.insert(db).await.map_err(Into::into)
}

#[derive(FromQueryResult)]
struct MaxPriceRow {
    max_price: Option<i64>,
}

/// Returns the highest price ever recorded for `(guild_id, item_id)`, or
/// None when the entry has never been sold.
pub async fn max_sale_price<C>(db: &C, guild_id: &str, item_id: &str) -> Result<Option<i64>>
where
    C: ConnectionTrait,
{
    let row = PriceHistory::find()
        .select_only()
        .column_as(price_history::Column::Price.max(), "max_price")
        .filter(price_history::Column::GuildId.eq(guild_id))
        .filter(price_history::Column::ItemId.eq(item_id))
        .into_model::<MaxPriceRow>()
        .one(db)
        .await?;

    Ok(row.and_then(|r| r.max_price))
}

/// Retrieves all sale records for `(guild_id, item_id)`, oldest first.
pub async fn get_sales<C>(
    db: &C,
    guild_id: &str,
    item_id: &str,
) -> Result<Vec<price_history::Model>>
where
    C: ConnectionTrait,
{
    use sea_orm::QueryOrder;

    PriceHistory::find()
        .filter(price_history::Column::GuildId.eq(guild_id))
        .filter(price_history::Column::ItemId.eq(item_id))
        .order_by_asc(price_history::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_party_ref_round_trip() {
        let guild = PartyRef::Guild("123".to_string());
        assert_eq!(guild.to_string(), "guild:123");
        assert_eq!(PartyRef::parse("guild:123"), Some(guild));

        let member = PartyRef::Member("456".to_string());
        assert_eq!(member.to_string(), "member:456");
        assert_eq!(PartyRef::parse("member:456"), Some(member));

        assert_eq!(PartyRef::parse("bogus"), None);
        assert_eq!(PartyRef::parse("shop:1"), None);
    }

    #[tokio::test]
    async fn test_max_price_empty_ledger_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(max_sale_price(&db, "guild1", "item1").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_max_price_is_scoped_by_key() -> Result<()> {
        let db = setup_test_db().await?;
        let seller = PartyRef::Guild("guild1".to_string());
        let buyer = PartyRef::Member("user1".to_string());
        let now = chrono::Utc::now();

        append_sale(&db, "guild1", "item1", 100, &seller, &buyer, now).await?;
        append_sale(&db, "guild1", "item1", 400, &seller, &buyer, now).await?;
        append_sale(&db, "guild1", "item1", 250, &seller, &buyer, now).await?;
        // Same item id in another guild, and another item in the same guild
        append_sale(&db, "guild2", "item1", 9_999, &seller, &buyer, now).await?;
        append_sale(&db, "guild1", "item2", 5_000, &seller, &buyer, now).await?;

        assert_eq!(max_sale_price(&db, "guild1", "item1").await?, Some(400));
        assert_eq!(max_sale_price(&db, "guild2", "item1").await?, Some(9_999));
        Ok(())
    }

    #[tokio::test]
    async fn test_sales_keep_party_tags() -> Result<()> {
        let db = setup_test_db().await?;
        let seller = PartyRef::Guild("guild1".to_string());
        let buyer = PartyRef::Member("user1".to_string());

        append_sale(&db, "guild1", "item1", 100, &seller, &buyer, chrono::Utc::now()).await?;

        let sales = get_sales(&db, "guild1", "item1").await?;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].seller, "guild:guild1");
        assert_eq!(sales[0].buyer, "member:user1");
        Ok(())
    }
}
