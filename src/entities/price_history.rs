//! Price-history entity - The append-only sale ledger.
//!
//! One row is written per completed purchase and never updated or deleted.
//! `seller` and `buyer` hold tagged party references (`guild:<id>` or
//! `member:<id>`) so a store stocking sale is distinguishable from a future
//! peer resale. Records are scoped by `(guild_id, item_id)`, i.e. per catalog
//! entry, not per physical copy.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Price-history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_history")]
pub struct Model {
    /// Unique identifier for the record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Guild the sale happened in
    pub guild_id: String,
    /// Catalog entry that was sold
    pub item_id: String,
    /// When the sale completed
    pub date: DateTimeUtc,
    /// Sale price in whole currency units
    pub price: i64,
    /// Tagged party reference of the seller, e.g. `guild:123`
    pub seller: String,
    /// Tagged party reference of the buyer, e.g. `member:456`
    pub buyer: String,
}

/// Ledger rows have no relations; they are joined by value
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
