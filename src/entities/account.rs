//! Account entity - Represents a member's wallet within a guild.
//!
//! Accounts are keyed by `(guild_id, user_id)` so the same Discord user has an
//! independent balance in every guild. Rows are created lazily on first access
//! with a fixed starting balance and are never deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Guild the wallet belongs to (tenant-isolation boundary)
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    /// Discord user ID of the wallet's owner
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Current balance in whole currency units; never persisted negative
    pub balance: i64,
    /// When the wallet was first created
    pub created_at: DateTimeUtc,
}

/// Accounts have no relations to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
