//! Bot layer - Discord-specific interface and command handlers.
//!
//! This module provides the Discord interface for the `GuildShop`
//! application: all slash commands, autocomplete handlers, gateway event
//! handlers, and the shared bot context.

/// Discord command implementations (store, inventory, wallet, purge, revive, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, gateway events, reaction pinning)
pub mod handlers;

use crate::{
    config::AppConfig,
    errors::{Error, Result},
    jobs::{self, ActivityTracker},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::{Arc, atomic::AtomicBool};
use tracing::info;

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// Database connection for all economy operations
    pub database: DatabaseConnection,
    /// Application configuration loaded at startup
    pub config: Arc<AppConfig>,
    /// Last-message tracker feeding the chat-revival job
    pub activity: Arc<ActivityTracker>,
    /// Set while a purge is in flight so only one runs at a time
    pub purge_running: AtomicBool,
}

impl BotData {
    /// Creates the shared context handed to every command invocation.
    #[must_use]
    pub fn new(
        database: DatabaseConnection,
        config: Arc<AppConfig>,
        activity: Arc<ActivityTracker>,
    ) -> Self {
        Self {
            database,
            config,
            activity,
            purge_running: AtomicBool::new(false),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            // Expected conditions go to the user verbatim; anything else is
            // an internal fault that only gets a generic reply
            let reply = if error.is_user_facing() {
                error.to_string()
            } else {
                tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
                "Something went wrong running that command. Please try again later.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to the Discord gateway and runs the bot until shutdown.
pub async fn run_bot(
    token: String,
    config: Arc<AppConfig>,
    database: DatabaseConnection,
) -> Result<()> {
    let activity = Arc::new(ActivityTracker::new());
    let setup_config = Arc::clone(&config);
    let setup_activity = Arc::clone(&activity);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::store(),
                commands::inventory(),
                commands::wallet(),
                commands::purge(),
                commands::report(),
                commands::revive_chat(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(handlers::events::handle_event(ctx, event, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                if let Some(revival) = setup_config.revival.clone() {
                    jobs::start_revival_scheduler(
                        Arc::clone(&ctx.http),
                        revival,
                        Arc::clone(&setup_activity),
                    )
                    .await?;
                } else {
                    info!("No revival channel configured; chat revival disabled");
                }

                Ok(BotData::new(database, setup_config, setup_activity))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Discord rejects slash-command descriptions over 100 characters.
    const DESCRIPTION_LIMIT: usize = 100;

    fn assert_descriptions_fit(command: &poise::Command<BotData, Error>) {
        if let Some(description) = &command.description {
            assert!(
                description.chars().count() <= DESCRIPTION_LIMIT,
                "description of `{}` is {} chars, Discord caps at {DESCRIPTION_LIMIT}",
                command.name,
                description.chars().count()
            );
        }
        for sub in &command.subcommands {
            assert_descriptions_fit(sub);
        }
    }

    #[test]
    fn test_command_descriptions_fit_discord_limit() {
        for command in [
            commands::store(),
            commands::inventory(),
            commands::wallet(),
            commands::purge(),
            commands::report(),
            commands::revive_chat(),
            commands::ping(),
            commands::help(),
        ] {
            assert_descriptions_fit(&command);
        }
    }
}
