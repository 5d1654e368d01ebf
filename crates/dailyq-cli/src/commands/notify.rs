//! Daily reminder command handlers

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use tracing::info;

use dailyq_core::{NotificationSchedule, Session};

use crate::output::Output;

/// Schedule the daily reminder at `HH:MM` local time
pub fn set(session: &mut Session, time: &str, output: &Output) -> Result<()> {
    let (hour, minute) = NotificationSchedule::parse_time(time)?;
    let schedule = session.schedule_notification(hour, minute)?;

    let next = schedule.next_fire_after(&Local::now());
    let mut message = format!(
        "Reminder set for {} every day ({})",
        schedule.time_label(),
        schedule.author
    );
    if let Some(next) = next {
        message.push_str(&format!(", next at {}", next.format("%Y-%m-%d %H:%M")));
    }
    output.success(&message);
    Ok(())
}

/// Show the current reminder
pub fn show(session: &Session, output: &Output) -> Result<()> {
    let schedule = session.notification_schedule()?;
    let next = schedule
        .as_ref()
        .and_then(|s| s.next_fire_after(&Local::now()));
    output.print_schedule(schedule.as_ref(), next);
    Ok(())
}

/// Remove the reminder
pub fn cancel(session: &mut Session, output: &Output) -> Result<()> {
    if session.cancel_notification()? {
        output.success("Reminder cancelled");
    } else {
        output.message("No reminder was scheduled.");
    }
    Ok(())
}

/// Wait for each reminder and print it, until Ctrl-C
///
/// The schedule is re-read after every reminder, so `notify set` or
/// `notify cancel` from another shell takes effect at the next fire.
pub async fn watch(session: &mut Session, output: &Output) -> Result<()> {
    let mut last_fired: Option<DateTime<Local>> = None;

    loop {
        let Some(schedule) = session.notification_schedule()? else {
            output.message("No reminder scheduled. Use `dailyq notify set HH:MM`.");
            return Ok(());
        };

        let now = Local::now();
        let from = next_search_start(now, last_fired);
        let Some(next) = schedule.next_fire_after(&from) else {
            bail!(
                "Could not compute the next reminder time for {}",
                schedule.time_label()
            );
        };

        let wait = (next - now).to_std().unwrap_or_default();
        info!("Next reminder at {} (in {:?})", next, wait);
        output.message(&format!(
            "Waiting for {} (Ctrl-C to stop)",
            next.format("%Y-%m-%d %H:%M")
        ));

        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                output.message("Stopped.");
                return Ok(());
            }
        }

        last_fired = Some(next);
        if let Some(notification) = session.compose_notification()? {
            output.print_notification(&notification);
        }
    }
}

/// Never search from before the last reminder, so a timer that wakes a
/// little early cannot fire the same reminder twice
fn next_search_start(
    now: DateTime<Local>,
    last_fired: Option<DateTime<Local>>,
) -> DateTime<Local> {
    match last_fired {
        Some(last) if last > now => last,
        _ => now,
    }
}
