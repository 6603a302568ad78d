//! Server settings from environment variables.
//!
//! | Variable             | Default   |
//! |----------------------|-----------|
//! | `HOST`               | `0.0.0.0` |
//! | `PORT`               | `8080`    |
//! | `DATA_FILE`          | unset (in-memory only) |
//! | `ADMIN_UIDS`         | unset (comma separated uids) |
//! | `SESSION_KEY`        | unset (random key per start, at least 64 bytes when set) |
//! | `COOKIE_SECURE`      | `false`   |
//! | `UNDO_WINDOW_SECS`   | `15`      |
//! | `REMINDER_LEAD_MINS` | `5`       |
//! | `AUTH_SECRET`        | unset (HS256 secret shared with the identity provider) |
//! | `AUTH_PUBLIC_KEY_FILE` | unset (PEM file, RS256; takes precedence over `AUTH_SECRET`) |
//! | `AUTH_ISSUER`        | unset (required `iss` claim) |
//! | `AUTH_AUDIENCE`      | unset (required `aud` claim) |
//!
//! Without `AUTH_SECRET` or `AUTH_PUBLIC_KEY_FILE` every sign-in is refused.

use chrono::Duration;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: Option<PathBuf>,
    pub admin_uids: Vec<String>,
    pub session_key: Option<String>,
    pub cookie_secure: bool,
    /// How long a deleted tournament can be restored.
    pub undo_window: Duration,
    /// How far ahead of start reminders go out.
    pub reminder_lead: Duration,
    pub auth_secret: Option<String>,
    pub auth_public_key_file: Option<PathBuf>,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_file: None,
            admin_uids: Vec::new(),
            session_key: None,
            cookie_secure: false,
            undo_window: Duration::seconds(15),
            reminder_lead: Duration::minutes(5),
            auth_secret: None,
            auth_public_key_file: None,
            auth_issuer: None,
            auth_audience: None,
        }
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}", name, value);
            default
        }),
        None => default,
    }
}

/// Non-negative count converted with `convert`; negatives and overflow fall back to `default`.
fn duration_or(
    name: &str,
    raw: Option<String>,
    default: Duration,
    convert: fn(i64) -> Option<Duration>,
) -> Duration {
    let Some(value) = raw else {
        return default;
    };
    match value.trim().parse::<i64>().ok().filter(|n| *n >= 0).and_then(convert) {
        Some(duration) => duration,
        None => {
            log::warn!("Ignoring invalid {}={:?}", name, value);
            default
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", non_empty("PORT"), defaults.port),
            data_file: non_empty("DATA_FILE").map(PathBuf::from),
            admin_uids: non_empty("ADMIN_UIDS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|uid| !uid.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            session_key: non_empty("SESSION_KEY"),
            cookie_secure: parse_or("COOKIE_SECURE", non_empty("COOKIE_SECURE"), defaults.cookie_secure),
            undo_window: duration_or(
                "UNDO_WINDOW_SECS",
                non_empty("UNDO_WINDOW_SECS"),
                defaults.undo_window,
                Duration::try_seconds,
            ),
            reminder_lead: duration_or(
                "REMINDER_LEAD_MINS",
                non_empty("REMINDER_LEAD_MINS"),
                defaults.reminder_lead,
                Duration::try_minutes,
            ),
            auth_secret: non_empty("AUTH_SECRET"),
            auth_public_key_file: non_empty("AUTH_PUBLIC_KEY_FILE").map(PathBuf::from),
            auth_issuer: non_empty("AUTH_ISSUER"),
            auth_audience: non_empty("AUTH_AUDIENCE"),
        }
    }
}
