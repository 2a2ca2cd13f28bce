//! Discord command implementations organized by category.

/// General utility commands (ping, help)
pub mod general;

/// Inventory commands (view, inspect)
pub mod inventory;

/// Member purge command
pub mod purge;

/// Member report command
pub mod report;

/// Manual chat-revival command
pub mod revive;

/// Store commands (view, inspect, add, buy)
pub mod store;

/// Shared embed helpers
pub mod utils;

/// Wallet command
pub mod wallet;

// Export commands
pub use general::*;
pub use inventory::*;
pub use purge::*;
pub use report::*;
pub use revive::*;
pub use store::*;
pub use wallet::*;
