//! Item business logic - Handles the catalog and ownership store.
//!
//! Stocking creates `copies` rows sharing one `item_id` but each with a fresh
//! `uuid`. Ownership moves exactly once, store to buyer, through a
//! compare-and-set UPDATE that only matches while the owner column is still
//! NULL - that single statement is what guarantees at-most-one successful
//! transfer per copy even under concurrent buyers.

use crate::{
    entities::{Item, item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Creates `copies` unowned rows for one new catalog entry.
///
/// Every copy shares a freshly generated `item_id` and gets its own `uuid`.
/// Validates a non-empty name, non-negative price, at least one copy, and
/// that `metadata` parses as JSON.
pub async fn add_items_to_store<C>(
    db: &C,
    guild_id: &str,
    name: &str,
    description: &str,
    price: i64,
    metadata: &str,
    copies: i64,
) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }
    if price < 0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    if copies < 1 {
        return Err(Error::InvalidAmount { amount: copies });
    }
    serde_json::from_str::<serde_json::Value>(metadata).map_err(|e| Error::InvalidMetadata {
        message: e.to_string(),
    })?;

    let item_id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now();

    let mut created = Vec::with_capacity(usize::try_from(copies).unwrap_or(1));
    for _ in 0..copies {
        let copy = item::ActiveModel {
            uuid: Set(Uuid::new_v4().to_string()),
            item_id: Set(item_id.clone()),
            guild_id: Set(guild_id.to_string()),
            owner_user_id: Set(None),
            name: Set(name.trim().to_string()),
            description: Set(description.to_string()),
            price: Set(price),
            metadata: Set(metadata.to_string()),
            created_at: Set(now),
        };
        created.push(copy.insert(db).await?);
    }

    Ok(created)
}

/// Retrieves all unowned items in a guild's store, ordered by name.
pub async fn get_store_items<C>(db: &C, guild_id: &str) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .filter(item::Column::GuildId.eq(guild_id))
        .filter(item::Column::OwnerUserId.is_null())
        .order_by_asc(item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all items a member owns within a guild, ordered by name.
pub async fn get_inventory_items<C>(
    db: &C,
    guild_id: &str,
    user_id: &str,
) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find()
        .filter(item::Column::GuildId.eq(guild_id))
        .filter(item::Column::OwnerUserId.eq(user_id))
        .order_by_asc(item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a single item copy by its uuid, returning None if absent.
pub async fn get_item_by_uuid<C>(db: &C, uuid: &str) -> Result<Option<item::Model>>
where
    C: ConnectionTrait,
{
    Item::find_by_id(uuid).one(db).await.map_err(Into::into)
}

/// Moves one copy from the store to `new_owner` via compare-and-set.
///
/// The UPDATE only matches while `owner_user_id IS NULL`; zero rows affected
/// means the race was lost. `ItemNotFound` when the uuid does not exist at
/// all, `AlreadySold` when somebody else owns it.
pub async fn transfer_item_ownership<C>(
    db: &C,
    uuid: &str,
    new_owner: &str,
) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let update = Item::update_many()
        .col_expr(
            item::Column::OwnerUserId,
            Expr::value(new_owner.to_string()),
        )
        .filter(item::Column::Uuid.eq(uuid))
        .filter(item::Column::OwnerUserId.is_null())
        .exec(db)
        .await?;

    if update.rows_affected == 0 {
        return match get_item_by_uuid(db, uuid).await? {
            None => Err(Error::ItemNotFound {
                reference: uuid.to_string(),
            }),
            Some(_) => Err(Error::AlreadySold {
                uuid: uuid.to_string(),
            }),
        };
    }

    get_item_by_uuid(db, uuid)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            reference: uuid.to_string(),
        })
}

/// Case-insensitive prefix search over a guild's in-store items, capped at
/// `limit`. Used to feed autocomplete suggestion lists.
pub async fn search_store_by_prefix<C>(
    db: &C,
    guild_id: &str,
    prefix: &str,
    limit: usize,
) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    let items = get_store_items(db, guild_id).await?;
    Ok(filter_by_prefix(items, prefix, limit))
}

/// Case-insensitive prefix search over a member's inventory, capped at `limit`.
pub async fn search_inventory_by_prefix<C>(
    db: &C,
    guild_id: &str,
    user_id: &str,
    prefix: &str,
    limit: usize,
) -> Result<Vec<item::Model>>
where
    C: ConnectionTrait,
{
    let items = get_inventory_items(db, guild_id, user_id).await?;
    Ok(filter_by_prefix(items, prefix, limit))
}

/// Resolves user input for a store item: tries it as a uuid first (the value
/// autocomplete fills in), then falls back to the first in-store name match
/// for users who typed free text.
pub async fn resolve_store_item<C>(db: &C, guild_id: &str, input: &str) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    if let Some(found) = get_item_by_uuid(db, input).await?
        && found.guild_id == guild_id
        && found.is_in_store()
    {
        return Ok(found);
    }

    search_store_by_prefix(db, guild_id, input, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::ItemNotFound {
            reference: input.to_string(),
        })
}

/// Resolves user input for an inventory item, uuid first then name prefix.
pub async fn resolve_inventory_item<C>(
    db: &C,
    guild_id: &str,
    user_id: &str,
    input: &str,
) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    if let Some(found) = get_item_by_uuid(db, input).await?
        && found.guild_id == guild_id
        && found.owner_user_id.as_deref() == Some(user_id)
    {
        return Ok(found);
    }

    search_inventory_by_prefix(db, guild_id, user_id, input, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::ItemNotFound {
            reference: input.to_string(),
        })
}

fn filter_by_prefix(items: Vec<item::Model>, prefix: &str, limit: usize) -> Vec<item::Model> {
    let prefix_lower = prefix.to_lowercase();
    items
        .into_iter()
        .filter(|i| i.name.to_lowercase().starts_with(&prefix_lower))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_item, setup_test_db};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_add_items_creates_distinct_copies() -> Result<()> {
        let db = setup_test_db().await?;

        let copies = add_items_to_store(&db, "guild1", "Sword", "Sharp", 400, "{}", 3).await?;
        assert_eq!(copies.len(), 3);

        let uuids: HashSet<_> = copies.iter().map(|c| c.uuid.clone()).collect();
        assert_eq!(uuids.len(), 3, "each copy must get its own uuid");

        let item_ids: HashSet<_> = copies.iter().map(|c| c.item_id.clone()).collect();
        assert_eq!(item_ids.len(), 1, "all copies share one item_id");

        assert!(copies.iter().all(item::Model::is_in_store));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_items_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = add_items_to_store(&db, "g", "  ", "desc", 10, "{}", 1).await;
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        let result = add_items_to_store(&db, "g", "Sword", "desc", -1, "{}", 1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1 }
        ));

        let result = add_items_to_store(&db, "g", "Sword", "desc", 10, "{}", 0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: 0 }
        ));

        let result = add_items_to_store(&db, "g", "Sword", "desc", 10, "not json", 1).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidMetadata { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_store_and_inventory_listings_are_disjoint() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "guild1", "Shield", 250).await?;
        create_test_item(&db, "guild1", "Potion", 50).await?;

        transfer_item_ownership(&db, &item.uuid, "user1").await?;

        let store = get_store_items(&db, "guild1").await?;
        assert_eq!(store.len(), 1);
        assert_eq!(store[0].name, "Potion");

        let inventory = get_inventory_items(&db, "guild1", "user1").await?;
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].name, "Shield");
        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_is_at_most_once() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "guild1", "Shield", 250).await?;

        let won = transfer_item_ownership(&db, &item.uuid, "user1").await?;
        assert_eq!(won.owner_user_id.as_deref(), Some("user1"));

        // Second transfer loses the compare-and-set
        let lost = transfer_item_ownership(&db, &item.uuid, "user2").await;
        assert!(matches!(lost.unwrap_err(), Error::AlreadySold { .. }));

        // Owner is unchanged by the failed attempt
        let after = get_item_by_uuid(&db, &item.uuid).await?.unwrap();
        assert_eq!(after.owner_user_id.as_deref(), Some("user1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_transfer_missing_uuid_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = transfer_item_ownership(&db, "no-such-uuid", "user1").await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_prefix_search_is_case_insensitive_and_capped() -> Result<()> {
        let db = setup_test_db().await?;

        for n in 0..15 {
            create_test_item(&db, "guild1", &format!("Sword {n:02}"), 100).await?;
        }
        create_test_item(&db, "guild1", "Shield", 100).await?;

        let hits = search_store_by_prefix(&db, "guild1", "swo", 10).await?;
        assert_eq!(hits.len(), 10);
        assert!(hits.iter().all(|i| i.name.starts_with("Sword")));

        let none = search_store_by_prefix(&db, "guild1", "axe", 10).await?;
        assert!(none.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_store_item_by_uuid_and_name() -> Result<()> {
        let db = setup_test_db().await?;

        let item = create_test_item(&db, "guild1", "Shield", 250).await?;

        let by_uuid = resolve_store_item(&db, "guild1", &item.uuid).await?;
        assert_eq!(by_uuid.uuid, item.uuid);

        let by_name = resolve_store_item(&db, "guild1", "shi").await?;
        assert_eq!(by_name.uuid, item.uuid);

        // Items from another guild do not resolve
        let foreign = resolve_store_item(&db, "guild2", &item.uuid).await;
        assert!(matches!(foreign.unwrap_err(), Error::ItemNotFound { .. }));
        Ok(())
    }
}
