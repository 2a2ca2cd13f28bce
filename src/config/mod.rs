//! Configuration management for `GuildShop`.
//!
//! Everything is environment-driven (with `.env` support via `dotenvy`):
//! the database URL, the optional chat-revival channel, and the explicit
//! thread-pin owner registry.

/// Database configuration and connection management
pub mod database;

use crate::errors::{Error, Result};
use std::collections::HashMap;

/// Settings for the scheduled chat-revival prompt. Absent when no revival
/// channel is configured, which disables the job entirely.
#[derive(Debug, Clone)]
pub struct RevivalConfig {
    /// Channel the prompt is posted to
    pub channel_id: u64,
    /// Role to mention in the prompt, if any
    pub mention_role_id: Option<u64>,
}

/// Application configuration, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Chat-revival settings, when configured
    pub revival: Option<RevivalConfig>,
    /// Thread channel id -> user id allowed to pin via reaction in it
    pub thread_pin_owners: HashMap<u64, u64>,
}

/// Loads the application configuration from the environment.
///
/// `REVIVAL_CHANNEL_ID` (with optional `REVIVAL_ROLE_ID`) enables the
/// chat-revival job. `THREAD_PIN_OWNERS` is a comma-separated list of
/// `channel_id=user_id` pairs.
pub fn load_app_config() -> Result<AppConfig> {
    let revival = match std::env::var("REVIVAL_CHANNEL_ID") {
        Ok(raw) => Some(RevivalConfig {
            channel_id: parse_snowflake("REVIVAL_CHANNEL_ID", &raw)?,
            mention_role_id: match std::env::var("REVIVAL_ROLE_ID") {
                Ok(role) => Some(parse_snowflake("REVIVAL_ROLE_ID", &role)?),
                Err(_) => None,
            },
        }),
        Err(_) => None,
    };

    let thread_pin_owners = match std::env::var("THREAD_PIN_OWNERS") {
        Ok(raw) => parse_thread_pin_owners(&raw)?,
        Err(_) => HashMap::new(),
    };

    Ok(AppConfig {
        revival,
        thread_pin_owners,
    })
}

fn parse_snowflake(name: &str, raw: &str) -> Result<u64> {
    let value: u64 = raw.trim().parse().map_err(|_| Error::Config {
        message: format!("{name} must be a Discord snowflake, got '{raw}'"),
    })?;
    if value == 0 {
        return Err(Error::Config {
            message: format!("{name} must be non-zero"),
        });
    }
    Ok(value)
}

/// Parses `channel_id=user_id` pairs, comma separated. Whitespace around
/// pairs is tolerated; empty segments are skipped.
fn parse_thread_pin_owners(raw: &str) -> Result<HashMap<u64, u64>> {
    let mut owners = HashMap::new();
    for pair in raw.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (channel, user) = pair.split_once('=').ok_or_else(|| Error::Config {
            message: format!("THREAD_PIN_OWNERS entry '{pair}' is not channel_id=user_id"),
        })?;
        owners.insert(
            parse_snowflake("THREAD_PIN_OWNERS channel", channel)?,
            parse_snowflake("THREAD_PIN_OWNERS user", user)?,
        );
    }
    Ok(owners)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_thread_pin_owners() {
        let owners =
            parse_thread_pin_owners("979291390162894918=802440261543264288, 1003029764128374904=699464544078266388")
                .unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(
            owners.get(&979_291_390_162_894_918),
            Some(&802_440_261_543_264_288)
        );
    }

    #[test]
    fn test_parse_thread_pin_owners_empty() {
        assert!(parse_thread_pin_owners("").unwrap().is_empty());
        assert!(parse_thread_pin_owners(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_thread_pin_owners_rejects_garbage() {
        assert!(parse_thread_pin_owners("123").is_err());
        assert!(parse_thread_pin_owners("abc=def").is_err());
    }

    #[test]
    fn test_parse_snowflake_rejects_zero() {
        assert!(parse_snowflake("X", "0").is_err());
        assert_eq!(parse_snowflake("X", " 42 ").unwrap(), 42);
    }
}
