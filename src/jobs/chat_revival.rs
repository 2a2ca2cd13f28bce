//! Chat-revival job - posts a conversation topic when the guild goes quiet.
//!
//! A cron job fires every five minutes and checks the [`ActivityTracker`];
//! once no message has been seen for an hour it posts a random topic embed to
//! the configured channel. The tracker is touched on every inbound message by
//! the gateway event handler.

use crate::{config::RevivalConfig, core::topics, errors::Result};
use chrono::{DateTime, Duration, Utc};
use poise::serenity_prelude as serenity;
use std::sync::{Arc, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info};

/// How long the channel must stay quiet before a prompt is posted.
const IDLE_THRESHOLD_MINUTES: i64 = 60;

/// Cron expression: every five minutes.
const REVIVAL_SCHEDULE: &str = "0 */5 * * * *";

/// Tracks when the last guild message was seen.
///
/// Written on every message event, read by the revival job. Explicit shared
/// state with a defined lifecycle instead of a module-level singleton.
#[derive(Debug)]
pub struct ActivityTracker {
    last_message: RwLock<DateTime<Utc>>,
}

impl ActivityTracker {
    /// Creates a tracker primed with the current time, so a freshly started
    /// bot waits a full idle period before prompting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_message: RwLock::new(Utc::now()),
        }
    }

    /// Records that a message was just seen.
    pub fn touch(&self) {
        let now = Utc::now();
        match self.last_message.write() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    /// When the last message was seen.
    #[must_use]
    pub fn last_message(&self) -> DateTime<Utc> {
        match self.last_message.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// How long the chat has been quiet.
    #[must_use]
    pub fn idle_duration(&self) -> Duration {
        Utc::now() - self.last_message()
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts the chat-revival scheduler.
///
/// The returned scheduler handle is kept alive by `tokio-cron-scheduler`
/// internally; callers only need to invoke this once after the gateway is up.
pub async fn start_revival_scheduler(
    http: Arc<serenity::Http>,
    config: RevivalConfig,
    tracker: Arc<ActivityTracker>,
) -> Result<()> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(REVIVAL_SCHEDULE, move |_uuid, _lock| {
        let http = Arc::clone(&http);
        let config = config.clone();
        let tracker = Arc::clone(&tracker);

        Box::pin(async move {
            if let Err(e) = maybe_revive(&http, &config, &tracker).await {
                error!("Error running chat revival: {e}");
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Chat revival scheduler started");
    Ok(())
}

/// Posts a topic prompt if the chat has been idle long enough.
async fn maybe_revive(
    http: &Arc<serenity::Http>,
    config: &RevivalConfig,
    tracker: &ActivityTracker,
) -> Result<()> {
    let idle = tracker.idle_duration();
    if idle < Duration::minutes(IDLE_THRESHOLD_MINUTES) {
        debug!("Chat active {}m ago, no revival needed", idle.num_minutes());
        return Ok(());
    }

    let topic = topics::random_topic();
    let embed = serenity::CreateEmbed::new().description(format!(
        "If you don't know what to talk about, here's a random topic. \
         To generate these manually use `/revive_chat`.\n**__{topic}__**"
    ));

    let mut message = serenity::CreateMessage::new().embed(embed);
    if let Some(role_id) = config.mention_role_id {
        message = message.content(format!("<@&{role_id}>"));
    }

    serenity::ChannelId::new(config.channel_id)
        .send_message(http, message)
        .await?;

    // The prompt itself counts as activity, otherwise we would repost every
    // five minutes until a human speaks
    tracker.touch();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_starts_recent() {
        let tracker = ActivityTracker::new();
        assert!(tracker.idle_duration() < Duration::minutes(1));
    }

    #[test]
    fn test_touch_resets_idle_time() {
        let tracker = ActivityTracker::new();
        match tracker.last_message.write() {
            Ok(mut guard) => *guard = Utc::now() - Duration::hours(2),
            Err(poisoned) => *poisoned.into_inner() = Utc::now() - Duration::hours(2),
        }
        assert!(tracker.idle_duration() >= Duration::hours(2));

        tracker.touch();
        assert!(tracker.idle_duration() < Duration::minutes(1));
    }
}
