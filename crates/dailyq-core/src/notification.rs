//! Daily reminder schedule
//!
//! The core does not deliver notifications. It stores when the user wants
//! to be reminded and for which author, computes the next fire time, and
//! supplies the title and body when the reminder fires.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};
use crate::models::DailyQuote;

/// Repeating daily reminder at a local wall-clock time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSchedule {
    pub hour: u32,
    pub minute: u32,
    pub author: String,
}

impl NotificationSchedule {
    pub fn new(hour: u32, minute: u32, author: impl Into<String>) -> QuoteResult<Self> {
        if NaiveTime::from_hms_opt(hour, minute, 0).is_none() {
            return Err(QuoteError::InvalidSchedule {
                time: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(Self {
            hour,
            minute,
            author: author.into(),
        })
    }

    /// Parse an `HH:MM` string
    pub fn parse_time(value: &str) -> QuoteResult<(u32, u32)> {
        let time = NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
            QuoteError::InvalidSchedule {
                time: value.trim().to_string(),
            }
        })?;
        Ok((time.hour(), time.minute()))
    }

    /// The next time strictly after `now` at which the reminder fires
    ///
    /// Local times that fall into a DST gap are skipped to the next day;
    /// ambiguous local times fire at the earlier instant.
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        let tz = now.timezone();
        let today = now.date_naive();

        (0..=2).find_map(|offset| {
            let date = today + Duration::days(offset);
            tz.from_local_datetime(&date.and_time(time))
                .earliest()
                .filter(|candidate| candidate > now)
        })
    }

    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Content of a fired reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub author: String,
}

impl Notification {
    pub fn for_quote(app_title: &str, daily: &DailyQuote) -> Self {
        Self {
            title: format!("{}: your daily quote from {}", app_title, daily.author),
            body: daily.quote.clone(),
            author: daily.author.clone(),
        }
    }
}
