//! Member purge command - `/purge`.
//!
//! Kicks a random sample of members that look like they never engaged with
//! the guild: no roles, stuck on the "just joined" role, or levelled up
//! without ever verifying. Defaults to a dry run that only reports who would
//! be kicked.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::collections::HashMap;
    use std::sync::atomic::Ordering;
    use tracing::debug;

    /// Members younger than this are never purged; they may still be setting
    /// themselves up.
    pub(super) const MIN_MEMBER_AGE_SECS: i64 = 20 * 60;

    /// At most this many members are kicked per invocation.
    const PURGE_SAMPLE_SIZE: usize = 50;

    /// Largest page the member list endpoint serves.
    const MEMBER_PAGE_SIZE: u64 = 1000;

    /// Purges inactive/unverified members. Dry-run by default.
    #[poise::command(slash_command, guild_only, required_permissions = "KICK_MEMBERS")]
    pub async fn purge(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Should this be a dry-run? (default true)"] dry_run: Option<bool>,
    ) -> Result<()> {
        let dry_run = dry_run.unwrap_or(true);
        let data = ctx.data();

        if data.purge_running.swap(true, Ordering::SeqCst) {
            ctx.say("A purge is already running, please wait for that to finish first.")
                .await?;
            return Ok(());
        }

        let result = run_purge(ctx, dry_run).await;
        data.purge_running.store(false, Ordering::SeqCst);
        result
    }

    async fn run_purge(ctx: poise::Context<'_, BotData, Error>, dry_run: bool) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            ctx.say("This command can only be run in a guild.").await?;
            return Ok(());
        };

        // Fetching every member can take a while on large guilds
        ctx.defer().await?;

        // The member list endpoint pages at 1000; keep fetching until a
        // short page so large guilds are not silently truncated
        let mut members: Vec<serenity::Member> = Vec::new();
        let mut after: Option<serenity::UserId> = None;
        loop {
            let page = guild_id
                .members(ctx.serenity_context(), Some(MEMBER_PAGE_SIZE), after)
                .await?;
            let full_page = page.len() as u64 == MEMBER_PAGE_SIZE;
            after = page.last().map(|m| m.user.id);
            members.extend(page);
            if !full_page {
                break;
            }
        }
        let roles = guild_id.roles(ctx.serenity_context()).await?;

        let now = chrono::Utc::now().timestamp();
        let candidates: Vec<&serenity::Member> = members
            .iter()
            .filter(|m| {
                let joined = m.joined_at.map_or(0, |t| t.unix_timestamp());
                is_purgeable(m.user.bot, &member_role_names(m, &roles), joined, now)
            })
            .collect();

        let picked: Vec<serenity::Member> = {
            use rand::seq::IndexedRandom;
            let mut rng = rand::rng();
            candidates
                .choose_multiple(&mut rng, PURGE_SAMPLE_SIZE)
                .map(|m| (*m).clone())
                .collect()
        };

        let prefix = if dry_run { "[DRY-RUN] " } else { "" };
        ctx.say(format!(
            "{prefix}Kicking {}/{} members, please stand by…",
            picked.len(),
            candidates.len()
        ))
        .await?;

        let mut kicked = 0_usize;
        for member in &picked {
            debug!("{prefix}Kicking {}", member.display_name());
            if dry_run {
                kicked += 1;
                continue;
            }
            match member.kick(ctx.serenity_context()).await {
                Ok(()) => kicked += 1,
                Err(e) => tracing::error!("Failed to kick {}: {e}", member.display_name()),
            }
        }

        ctx.say(format!(
            "{prefix}Kicked {kicked}/{} members. :white_check_mark:",
            candidates.len()
        ))
        .await?;
        Ok(())
    }

    /// Lowercased names of the roles a member holds.
    fn member_role_names(
        member: &serenity::Member,
        roles: &HashMap<serenity::RoleId, serenity::Role>,
    ) -> Vec<String> {
        member
            .roles
            .iter()
            .filter_map(|id| roles.get(id))
            .map(|r| r.name.to_lowercase())
            .collect()
    }

    /// Decides whether one member matches the purge criteria. `role_names`
    /// must already be lowercased.
    pub(super) fn is_purgeable(
        is_bot: bool,
        role_names: &[String],
        joined_at: i64,
        now: i64,
    ) -> bool {
        // Never purge bots
        if is_bot {
            return false;
        }

        let has_role_containing =
            |needle: &str| role_names.iter().any(|n| n.contains(needle));

        // Never purge members marked as bots, verified, or trusted
        if has_role_containing("bot")
            || has_role_containing("verified")
            || has_role_containing("[sfw only]")
            || has_role_containing("trusted")
        {
            return false;
        }

        // Never purge members who joined in the last few minutes
        if now - joined_at < MIN_MEMBER_AGE_SECS {
            return false;
        }

        // No roles at all beyond @everyone
        if role_names.is_empty() {
            return true;
        }

        // Never accepted the rules
        if role_names.iter().any(|n| n.starts_with("just joined")) {
            return true;
        }

        // Never earned a level role
        if !role_names.iter().any(|n| n.starts_with("level")) {
            return true;
        }

        // Levelled far enough to verify, but never did
        role_names.iter().any(|n| {
            n.strip_prefix("level ")
                .and_then(|lvl| lvl.trim().parse::<u32>().ok())
                .is_some_and(|lvl| lvl >= 1)
        })
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::inner::{MIN_MEMBER_AGE_SECS, is_purgeable};

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_lowercase()).collect()
    }

    const NOW: i64 = 1_700_000_000;
    const OLD_ENOUGH: i64 = NOW - MIN_MEMBER_AGE_SECS - 1;

    #[test]
    fn test_protected_members_are_never_purgeable() {
        assert!(!is_purgeable(true, &roles(&[]), OLD_ENOUGH, NOW));
        assert!(!is_purgeable(false, &roles(&["Verified"]), OLD_ENOUGH, NOW));
        assert!(!is_purgeable(false, &roles(&["Trusted"]), OLD_ENOUGH, NOW));
        assert!(!is_purgeable(false, &roles(&["Music Bot"]), OLD_ENOUGH, NOW));
        assert!(!is_purgeable(
            false,
            &roles(&["[SFW only]"]),
            OLD_ENOUGH,
            NOW
        ));
    }

    #[test]
    fn test_recent_joiners_are_spared() {
        let just_joined = NOW - MIN_MEMBER_AGE_SECS + 60;
        assert!(!is_purgeable(false, &roles(&[]), just_joined, NOW));
    }

    #[test]
    fn test_unengaged_members_are_purgeable() {
        // No roles at all
        assert!(is_purgeable(false, &roles(&[]), OLD_ENOUGH, NOW));
        // Never accepted the rules
        assert!(is_purgeable(
            false,
            &roles(&["Just Joined"]),
            OLD_ENOUGH,
            NOW
        ));
        // No level progress
        assert!(is_purgeable(false, &roles(&["Gamer"]), OLD_ENOUGH, NOW));
        // Levelled enough to verify but never did
        assert!(is_purgeable(false, &roles(&["Level 3"]), OLD_ENOUGH, NOW));
    }

    #[test]
    fn test_level_zero_without_verification_is_spared() {
        assert!(!is_purgeable(false, &roles(&["Level 0"]), OLD_ENOUGH, NOW));
    }
}
