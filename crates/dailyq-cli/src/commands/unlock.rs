//! Unlock command handler
//!
//! Stands in for the reward provider: publishes an earned reward on a
//! `RewardHub` and lets the session react to what the subscription receives.

use anyhow::Result;
use tracing::debug;

use dailyq_core::{RewardEvent, RewardHub, RewardOutcome, Session};

use crate::output::Output;

/// Unlock a premium author
pub fn unlock(session: &mut Session, name: &str, output: &Output) -> Result<()> {
    let author = session.author(name)?;
    let (author_name, locked) = (author.name.clone(), author.locked);

    if !locked {
        output.message(&format!("{} is free and needs no unlock.", author_name));
        return Ok(());
    }

    // A terminal has no ad provider: this command plays the provider and the
    // listening screen at once. The subscription lives only as long as the
    // command, like a screen's listener lives only as long as the screen.
    let hub = RewardHub::new();
    let mut subscription = hub.subscribe();
    let delivered = hub.publish(RewardEvent::Earned {
        author: author_name,
    });
    debug!("Reward delivered to {} listener(s)", delivered);

    while let Some(event) = subscription.try_recv() {
        match session.apply_reward(event)? {
            RewardOutcome::Unlocked {
                author,
                newly: true,
            } => output.success(&format!("Unlocked {}", author)),
            RewardOutcome::Unlocked {
                author,
                newly: false,
            } => output.message(&format!("{} is already unlocked.", author)),
            RewardOutcome::NotReady => {
                output.message("Reward not available right now. Try again later.")
            }
        }
    }

    Ok(())
}
