//! Core business logic module - Framework-agnostic economy operations.
//!
//! Everything in here speaks SeaORM and crate errors only; no Discord types.
//! The bot layer calls into these functions from command handlers.

/// Wallet operations - lazy creation, atomic credit/debit
pub mod account;
/// Item catalog and ownership operations, including the compare-and-set transfer
pub mod item;
/// Append-only price-history ledger and party-reference tagging
pub mod ledger;
/// The purchase coordinator - debit, transfer, and ledger append as one transaction
pub mod purchase;
/// Conversation topic pool for chat revival
pub mod topics;
