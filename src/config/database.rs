//! Database configuration module for `GuildShop`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without hand-written SQL.

use crate::entities::{Account, Item, PriceHistory};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/guildshop.sqlite?mode=rwc";

/// Gets the database URL from `DATABASE_URL` or falls back to the default
/// local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes the `SQLite` connection for the configured database URL.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Creates all tables from the entity definitions if they do not exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let account_table = schema
        .create_table_from_entity(Account)
        .if_not_exists()
        .to_owned();
    let item_table = schema
        .create_table_from_entity(Item)
        .if_not_exists()
        .to_owned();
    let price_history_table = schema
        .create_table_from_entity(PriceHistory)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&account_table)).await?;
    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&price_history_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        account::Model as AccountModel, item::Model as ItemModel,
        price_history::Model as PriceHistoryModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if we can query them
        let _: Vec<AccountModel> = Account::find().limit(1).all(&db).await?;
        let _: Vec<ItemModel> = Item::find().limit(1).all(&db).await?;
        let _: Vec<PriceHistoryModel> = PriceHistory::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
