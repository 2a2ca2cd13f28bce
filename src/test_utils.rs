//! Shared test utilities for `GuildShop`.
//!
//! Common helpers for setting up in-memory test databases and creating test
//! entities with sensible defaults.

use crate::{
    core::{account, item},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Stocks a single in-store item with empty metadata and returns it.
pub async fn create_test_item(
    db: &DatabaseConnection,
    guild_id: &str,
    name: &str,
    price: i64,
) -> Result<entities::item::Model> {
    let mut copies =
        item::add_items_to_store(db, guild_id, name, "Test item", price, "{}", 1).await?;
    Ok(copies.remove(0))
}

/// Creates a wallet and adjusts it to the requested balance.
pub async fn create_test_account(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    balance: i64,
) -> Result<entities::account::Model> {
    let fresh = account::get_or_create_account(db, guild_id, user_id).await?;
    match balance.cmp(&fresh.balance) {
        std::cmp::Ordering::Greater => {
            account::credit_account(db, guild_id, user_id, balance - fresh.balance).await
        }
        std::cmp::Ordering::Less => {
            account::debit_account(db, guild_id, user_id, fresh.balance - balance).await
        }
        std::cmp::Ordering::Equal => Ok(fresh),
    }
}
