//! Purchase coordinator - the one multi-entity operation in the economy.
//!
//! A buy touches three stores as a unit: debit the buyer's wallet, move the
//! item out of the store, append a ledger record. All three run inside a
//! single database transaction, so a failure at any step (including losing
//! the ownership compare-and-set to a concurrent buyer) rolls everything
//! back - no wallet is ever left debited without the item. Wallet creation
//! happens before the transaction: a first-time buyer keeps their freshly
//! created wallet even when the purchase itself fails.

use crate::{
    core::{account, item, ledger},
    entities::{account::Model as AccountModel, item::Model as ItemModel,
        price_history::Model as PriceHistoryModel},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, TransactionTrait};

/// The outcome of a completed purchase, returned for confirmation messaging.
#[derive(Debug, Clone)]
pub struct Purchase {
    /// The item, now owned by the buyer
    pub item: ItemModel,
    /// The buyer's wallet after the debit
    pub account: AccountModel,
    /// The ledger record that was appended
    pub record: PriceHistoryModel,
}

/// Buys the item copy `uuid` for `user_id` in `guild_id`.
///
/// Sequence: get-or-create the buyer's wallet, then transactionally look up
/// the copy, verify it is unowned and in this guild, check funds, debit,
/// compare-and-set the ownership transfer, append the ledger record, commit.
/// Losing the transfer race surfaces as `AlreadySold` and the transaction
/// rollback undoes the debit. The wallet is created on the outer connection,
/// outside the transaction, so a failed buy never discards it.
pub async fn buy_item(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    uuid: &str,
) -> Result<Purchase> {
    let buyer = account::get_or_create_account(db, guild_id, user_id).await?;

    let txn = db.begin().await?;

    let wanted = item::get_item_by_uuid(&txn, uuid)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            reference: uuid.to_string(),
        })?;

    // Tenant isolation: a uuid from another guild's store does not exist here
    if wanted.guild_id != guild_id {
        return Err(Error::ItemNotFound {
            reference: uuid.to_string(),
        });
    }

    if !wanted.is_in_store() {
        return Err(Error::AlreadySold {
            uuid: uuid.to_string(),
        });
    }

    if buyer.balance < wanted.price {
        return Err(Error::InsufficientFunds {
            balance: buyer.balance,
            price: wanted.price,
        });
    }

    // Conditional debit re-checks the balance at write time
    let buyer = account::debit_account(&txn, guild_id, user_id, wanted.price).await?;

    // Compare-and-set; a concurrent buyer that got here first wins and we
    // roll back the debit with the transaction
    let owned = item::transfer_item_ownership(&txn, uuid, user_id).await?;

    let record = ledger::append_sale(
        &txn,
        guild_id,
        &owned.item_id,
        owned.price,
        &ledger::PartyRef::Guild(guild_id.to_string()),
        &ledger::PartyRef::Member(user_id.to_string()),
        chrono::Utc::now(),
    )
    .await?;

    txn.commit().await?;

    Ok(Purchase {
        item: owned,
        account: buyer,
        record,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{account::STARTING_BALANCE, ledger};
    use crate::test_utils::{create_test_account, create_test_item, setup_test_db};

    #[tokio::test]
    async fn test_buy_debits_transfers_and_records() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, "guild1", "Shield", 400).await?;

        let purchase = buy_item(&db, "guild1", "user1", &item.uuid).await?;

        assert_eq!(purchase.account.balance, STARTING_BALANCE - 400);
        assert_eq!(purchase.item.owner_user_id.as_deref(), Some("user1"));

        let sales = ledger::get_sales(&db, "guild1", &item.item_id).await?;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].price, 400);
        assert_eq!(sales[0].seller, "guild:guild1");
        assert_eq!(sales[0].buyer, "member:user1");
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_insufficient_funds_changes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, "guild1", "Crown", STARTING_BALANCE + 500).await?;

        let result = buy_item(&db, "guild1", "user1", &item.uuid).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds { balance, price }
                if balance == STARTING_BALANCE && price == STARTING_BALANCE + 500
        ));

        // Wallet untouched, item still in store, no ledger record
        let wallet = crate::core::account::get_account(&db, "guild1", "user1")
            .await?
            .unwrap();
        assert_eq!(wallet.balance, STARTING_BALANCE);

        let after = crate::core::item::get_item_by_uuid(&db, &item.uuid)
            .await?
            .unwrap();
        assert!(after.is_in_store());

        assert!(ledger::get_sales(&db, "guild1", &item.item_id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_second_buyer_gets_already_sold() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, "guild1", "Shield", 100).await?;

        buy_item(&db, "guild1", "user1", &item.uuid).await?;
        let result = buy_item(&db, "guild1", "user2", &item.uuid).await;
        assert!(matches!(result.unwrap_err(), Error::AlreadySold { .. }));

        // Loser's wallet is unchanged
        let loser = crate::core::account::get_account(&db, "guild1", "user2")
            .await?
            .unwrap();
        assert_eq!(loser.balance, STARTING_BALANCE);

        // Exactly one sale was recorded
        let sales = ledger::get_sales(&db, "guild1", &item.item_id).await?;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].buyer, "member:user1");
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_buyers_one_winner() -> Result<()> {
        // One pooled connection so the two buys contend on real transactions
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = sea_orm::Database::connect(options).await?;
        crate::config::database::create_tables(&db).await?;

        let item = create_test_item(&db, "guild1", "Shield", 100).await?;

        let (first, second) = tokio::join!(
            buy_item(&db, "guild1", "user1", &item.uuid),
            buy_item(&db, "guild1", "user2", &item.uuid),
        );

        let wins = usize::from(first.is_ok()) + usize::from(second.is_ok());
        assert_eq!(wins, 1, "exactly one buyer must win the copy");

        let loser = if first.is_ok() { second } else { first };
        assert!(matches!(loser.unwrap_err(), Error::AlreadySold { .. }));

        // One owner, one ledger record, loser's wallet intact
        let sales = ledger::get_sales(&db, "guild1", &item.item_id).await?;
        assert_eq!(sales.len(), 1);

        let after = crate::core::item::get_item_by_uuid(&db, &item.uuid)
            .await?
            .unwrap();
        assert!(!after.is_in_store());
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_with_drained_wallet_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, "guild1", "Shield", 400).await?;
        create_test_account(&db, "guild1", "user1", 250).await?;

        let result = buy_item(&db, "guild1", "user1", &item.uuid).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientFunds {
                balance: 250,
                price: 400
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_unknown_uuid_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = buy_item(&db, "guild1", "user1", "no-such-uuid").await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_buy_is_guild_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_test_item(&db, "guild1", "Shield", 100).await?;

        let result = buy_item(&db, "guild2", "user1", &item.uuid).await;
        assert!(matches!(result.unwrap_err(), Error::ItemNotFound { .. }));

        let after = crate::core::item::get_item_by_uuid(&db, &item.uuid)
            .await?
            .unwrap();
        assert!(after.is_in_store());
        Ok(())
    }

    #[tokio::test]
    async fn test_copies_sell_independently() -> Result<()> {
        let db = setup_test_db().await?;
        let copies =
            crate::core::item::add_items_to_store(&db, "guild1", "Potion", "Red", 100, "{}", 2)
                .await?;

        buy_item(&db, "guild1", "user1", &copies[0].uuid).await?;
        buy_item(&db, "guild1", "user2", &copies[1].uuid).await?;

        let sales = ledger::get_sales(&db, "guild1", &copies[0].item_id).await?;
        assert_eq!(sales.len(), 2);
        assert_eq!(
            ledger::max_sale_price(&db, "guild1", &copies[0].item_id).await?,
            Some(100)
        );
        Ok(())
    }
}
