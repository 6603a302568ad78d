//! Clock-derived badges: status (Soon / Now / Playing) and the start countdown.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// More than this before start shows "Soon".
const SOON_THRESHOLD_SECS: i64 = 30 * 60;
/// Countdown turns urgent at or under this.
const URGENT_THRESHOLD_SECS: i64 = 5 * 60;

/// Badge shown on public tournament cards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Soon,
    Now,
    Playing,
}

impl DisplayStatus {
    pub fn at(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let until_ms = (start - now).num_milliseconds();
        if until_ms > SOON_THRESHOLD_SECS * 1000 {
            DisplayStatus::Soon
        } else if until_ms > 0 {
            DisplayStatus::Now
        } else {
            DisplayStatus::Playing
        }
    }
}

/// Time left until start, broken down for display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Countdown {
    Live,
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        urgent: bool,
    },
}

impl Countdown {
    pub fn until(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let until_ms = (start - now).num_milliseconds();
        if until_ms <= 0 {
            return Countdown::Live;
        }
        let total_secs = until_ms / 1000;
        Countdown::Remaining {
            days: total_secs / 86_400,
            hours: total_secs % 86_400 / 3_600,
            minutes: total_secs % 3_600 / 60,
            seconds: total_secs % 60,
            urgent: until_ms <= URGENT_THRESHOLD_SECS * 1000,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Countdown::Live)
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Countdown::Remaining { urgent: true, .. })
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Countdown::Live => write!(f, "LIVE NOW"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
                ..
            } => {
                if *days > 0 {
                    write!(f, "{}d ", days)?;
                }
                write!(f, "{}h {}m {}s", hours, minutes, seconds)
            }
        }
    }
}
