//! Unified error types for `GuildShop`.
//!
//! The enum splits into two classes: expected, user-facing conditions (an item
//! already sold, a wallet too thin) which commands report verbatim, and
//! internal faults (database, config, framework) which are logged and
//! surfaced to the user as a generic failure message.

use thiserror::Error;

/// All errors that can occur within the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced item does not exist (or belongs to another guild).
    #[error("Couldn't find that item in the store.")]
    ItemNotFound {
        /// The uuid or search term the caller supplied
        reference: String,
    },

    /// The item was owned by someone else at the time of transfer.
    #[error("That item has already been sold.")]
    AlreadySold {
        /// Uuid of the contested item
        uuid: String,
    },

    /// The buyer's balance cannot cover the price.
    #[error("You don't have enough money in your wallet. You have ${balance} but this costs ${price}.")]
    InsufficientFunds {
        /// Current wallet balance
        balance: i64,
        /// Amount that was required
        price: i64,
    },

    /// No account row exists where one was required.
    #[error("No wallet exists for user {user_id} in guild {guild_id}.")]
    AccountNotFound {
        /// Guild the lookup was scoped to
        guild_id: String,
        /// User whose account was missing
        user_id: String,
    },

    /// An amount or count failed validation (zero, negative, etc).
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: i64,
    },

    /// Item metadata did not parse as JSON.
    #[error("Item metadata must be valid JSON: {message}")]
    InvalidMetadata {
        /// Parser error detail
        message: String,
    },

    /// Configuration error (missing or malformed settings).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Persistence failure - the "store unavailable" class.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Background scheduler error.
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Serenity/Poise framework error.
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Whether this error is an expected condition whose message should be
    /// shown to the invoking user verbatim. Everything else is an internal
    /// fault: logged, with only a generic message sent to Discord.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound { .. }
                | Self::AlreadySold { .. }
                | Self::InsufficientFunds { .. }
                | Self::AccountNotFound { .. }
                | Self::InvalidAmount { .. }
                | Self::InvalidMetadata { .. }
        )
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
