//! `GuildShop` binary entry point.

use dotenvy::dotenv;
use guildshop::{bot, config, errors::Result};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = Arc::new(
        config::load_app_config()
            .inspect_err(|e| error!("Failed to load application configuration: {e}"))?,
    );
    info!("Successfully processed application configuration.");

    // 4. Initialize the database
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to the database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database tables: {e}"))?;

    // 5. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))?;

    bot::run_bot(token, app_config, db).await?;

    Ok(())
}
