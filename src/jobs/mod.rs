//! Scheduled background jobs.
//!
//! Currently just the chat-revival prompt, plus the activity-tracker state it
//! reads. The tracker is explicit injected state owned by the bot context,
//! written by the message gateway event and read by the cron job.

/// Chat-revival scheduler and activity tracking
pub mod chat_revival;

pub use chat_revival::{ActivityTracker, start_revival_scheduler};
