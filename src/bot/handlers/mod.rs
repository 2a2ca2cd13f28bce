//! Discord interaction handlers.
//!
//! Handlers for interactions and gateway traffic that are not slash
//! commands: autocomplete suggestions, the raw event dispatcher, and
//! reaction-based thread pinning.

/// Autocomplete handlers for store and inventory item names
pub mod autocomplete;
/// Gateway event dispatch (message activity, reactions)
pub mod events;
/// Pin/unpin a thread message via the pushpin reaction
pub mod pin;
