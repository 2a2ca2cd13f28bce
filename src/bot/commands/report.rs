//! Member report command - `/report`.
//!
//! Forwards a report to the guild's reports channel (the first text channel
//! whose name contains "reports"). A send failure is logged and reported to
//! the caller rather than propagated.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::error;

    /// Reports an issue with a member to the server staff.
    #[poise::command(slash_command, guild_only)]
    pub async fn report(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Who to report?"] member: serenity::User,
        #[description = "What to report?"] reason: String,
    ) -> Result<()> {
        // The cache guard cannot be held across an await
        let reports_channel = ctx.guild().and_then(|guild| {
            guild
                .channels
                .values()
                .find(|c| is_reports_channel(c.kind, &c.name))
                .map(|c| c.id)
        });

        let Some(channel_id) = reports_channel else {
            ctx.send(
                poise::CreateReply::default()
                    .content("Please ask a member of staff to create the reports channel first.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        };

        let embed = serenity::CreateEmbed::new()
            .title("User report")
            .color(serenity::Colour::RED)
            .description(report_description(
                &ctx.author().mention().to_string(),
                &member.mention().to_string(),
                &reason,
            ));
        let message = serenity::CreateMessage::new()
            .content("@here a user has reported an issue")
            .embed(embed);

        let reply = match channel_id.send_message(ctx.serenity_context(), message).await {
            Ok(_) => "Your report has been sent to the staff.".to_string(),
            Err(e) => {
                error!("Failed to send report to {channel_id}: {e}");
                "Failed to send report, please let a member of staff know.".to_string()
            }
        };

        ctx.send(poise::CreateReply::default().content(reply).ephemeral(true))
            .await?;
        Ok(())
    }

    pub(super) fn is_reports_channel(kind: serenity::ChannelType, name: &str) -> bool {
        kind == serenity::ChannelType::Text && name.contains("reports")
    }

    pub(super) fn report_description(reporter: &str, reported: &str, reason: &str) -> String {
        format!("{reporter} is reporting {reported} for:\n```{reason}```")
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::inner::{is_reports_channel, report_description};
    use poise::serenity_prelude::ChannelType;

    #[test]
    fn test_reports_channel_matches_text_channels_by_name() {
        assert!(is_reports_channel(ChannelType::Text, "reports"));
        assert!(is_reports_channel(ChannelType::Text, "mod-reports"));
        assert!(!is_reports_channel(ChannelType::Text, "general"));
        assert!(!is_reports_channel(ChannelType::Voice, "reports"));
    }

    #[test]
    fn test_report_description_names_both_parties() {
        let description = report_description("<@1>", "<@2>", "spamming");
        assert_eq!(description, "<@1> is reporting <@2> for:\n```spamming```");
    }
}
