//! Account business logic - Handles all wallet operations.
//!
//! Accounts are created lazily: the first time a member touches the economy
//! they get a wallet with a fixed starting balance. Creation is an atomic
//! insert-if-absent so two concurrent first accesses cannot both insert.
//! Credit and debit are single conditional UPDATE statements, never
//! read-modify-write, so a negative balance can never be persisted.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Balance every freshly created wallet starts with.
pub const STARTING_BALANCE: i64 = 1_000;

/// Finds an account by its `(guild_id, user_id)` key, returning None if absent.
pub async fn get_account<C>(db: &C, guild_id: &str, user_id: &str) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find_by_id((guild_id.to_string(), user_id.to_string()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fetches the account for `(guild_id, user_id)`, creating it with
/// [`STARTING_BALANCE`] if it does not exist yet.
///
/// The insert uses `ON CONFLICT DO NOTHING` on the composite key, so a
/// concurrent first access that wins the insert race is simply read back
/// afterwards instead of failing.
pub async fn get_or_create_account<C>(
    db: &C,
    guild_id: &str,
    user_id: &str,
) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = get_account(db, guild_id, user_id).await? {
        return Ok(existing);
    }

    let fresh = account::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        user_id: Set(user_id.to_string()),
        balance: Set(STARTING_BALANCE),
        created_at: Set(chrono::Utc::now()),
    };

    Account::insert(fresh)
        .on_conflict(
            OnConflict::columns([account::Column::GuildId, account::Column::UserId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    get_account(db, guild_id, user_id)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
        })
}

/// Adds `amount` to a wallet atomically (`balance = balance + amount`).
///
/// The wallet is created first if it does not exist. Rejects non-positive
/// amounts.
pub async fn credit_account<C>(
    db: &C,
    guild_id: &str,
    user_id: &str,
    amount: i64,
) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    get_or_create_account(db, guild_id, user_id).await?;

    Account::update_many()
        .col_expr(
            account::Column::Balance,
            Expr::col(account::Column::Balance).add(amount),
        )
        .filter(account::Column::GuildId.eq(guild_id))
        .filter(account::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    get_account(db, guild_id, user_id)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
        })
}

/// Removes `amount` from a wallet, failing with `InsufficientFunds` if the
/// balance cannot cover it. The balance is unchanged on failure.
///
/// The debit is a conditional UPDATE guarded by `balance >= amount`, so even
/// two concurrent debits cannot drive the balance negative: the second one
/// matches zero rows and fails.
pub async fn debit_account<C>(
    db: &C,
    guild_id: &str,
    user_id: &str,
    amount: i64,
) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let current = get_account(db, guild_id, user_id)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
        })?;

    let update = Account::update_many()
        .col_expr(
            account::Column::Balance,
            Expr::col(account::Column::Balance).sub(amount),
        )
        .filter(account::Column::GuildId.eq(guild_id))
        .filter(account::Column::UserId.eq(user_id))
        .filter(account::Column::Balance.gte(amount))
        .exec(db)
        .await?;

    if update.rows_affected == 0 {
        return Err(Error::InsufficientFunds {
            balance: current.balance,
            price: amount,
        });
    }

    get_account(db, guild_id, user_id)
        .await?
        .ok_or_else(|| Error::AccountNotFound {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
        })
}
