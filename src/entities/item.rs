//! Item entity - Represents a single physical copy of a store catalog entry.
//!
//! Each row is one purchasable copy: `uuid` is its unique, immutable identity
//! while `item_id` groups the N copies created together by one `/store add`.
//! `owner_user_id` is `None` while the copy sits in the store and is set
//! exactly once, on purchase. There is no resale path, so ownership is
//! terminal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identity of this physical copy (v4 uuid, immutable)
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: String,
    /// Groups the copies created by a single stocking operation
    pub item_id: String,
    /// Guild whose store this copy belongs to
    pub guild_id: String,
    /// Owning member, or `None` while the copy is in the store
    pub owner_user_id: Option<String>,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Store price in whole currency units
    pub price: i64,
    /// Opaque structured blob, stored as a JSON string
    pub metadata: String,
    /// When the copy was stocked
    pub created_at: DateTimeUtc,
}

/// Items have no foreign-key relations; price history is joined by value
/// on `(guild_id, item_id)`
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this copy is still sitting in the store, available to buy.
    #[must_use]
    pub const fn is_in_store(&self) -> bool {
        self.owner_user_id.is_none()
    }
}
