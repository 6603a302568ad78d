//! Tournament, its category/match type, and the admin form draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Game mode family.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Battle Royale.
    Br,
    /// Clash Squad.
    Cs,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Br => "br",
            Category::Cs => "cs",
        }
    }

    /// Match types offered for this category, in form order.
    pub fn match_types(self) -> &'static [MatchType] {
        match self {
            Category::Br => &[MatchType::Solo, MatchType::Duo, MatchType::Squad],
            Category::Cs => &[MatchType::FourVFour, MatchType::SixVSix],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "br" => Ok(Category::Br),
            "cs" => Ok(Category::Cs),
            _ => Err(()),
        }
    }
}

/// Team size / format within a category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchType {
    Solo,
    Duo,
    Squad,
    #[serde(rename = "4v4")]
    FourVFour,
    #[serde(rename = "6v6")]
    SixVSix,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Solo => "Solo",
            MatchType::Duo => "Duo",
            MatchType::Squad => "Squad",
            MatchType::FourVFour => "4v4",
            MatchType::SixVSix => "6v6",
        }
    }

    pub fn category(self) -> Category {
        match self {
            MatchType::Solo | MatchType::Duo | MatchType::Squad => Category::Br,
            MatchType::FourVFour | MatchType::SixVSix => Category::Cs,
        }
    }

    /// Clash Squad rooms have a fixed size: both teams' players.
    pub fn fixed_seats(self) -> Option<u32> {
        match self {
            MatchType::FourVFour => Some(8),
            MatchType::SixVSix => Some(12),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solo" => Ok(MatchType::Solo),
            "duo" => Ok(MatchType::Duo),
            "squad" => Ok(MatchType::Squad),
            "4v4" => Ok(MatchType::FourVFour),
            "6v6" => Ok(MatchType::SixVSix),
            _ => Err(()),
        }
    }
}

/// Status label chosen by the admin (independent of the clock-derived badge).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Soon,
    Now,
    Ongoing,
    Completed,
}

/// Room credentials shared with joined players once the room is set up.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoomDetails {
    pub room_type: Option<String>,
    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub game_uid: Option<String>,
}

/// A published tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub title: String,
    pub category: Category,
    pub match_type: MatchType,
    pub total_seats: u32,
    /// Always `total_seats - joined players`.
    pub seats_left: u32,
    pub start_time: DateTime<Utc>,
    /// Coins charged on join; 0 means free.
    pub entry_fee: u64,
    pub prize: String,
    #[serde(flatten)]
    pub room: RoomDetails,
    pub require_game_uid: bool,
    pub status: TournamentStatus,
    /// Prize per kill (Battle Royale only).
    pub kill_per_pkr: Option<String>,
    pub image_url: Option<String>,
    /// Set once start reminders went out; cleared when the start time moves.
    #[serde(default)]
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin-side hiding threshold: a "soon"/"now" tournament this far past its start is stale.
const STALE_AFTER_SECS: i64 = 30 * 60;

impl Tournament {
    /// Build a new tournament from an already validated draft.
    pub fn from_draft(draft: TournamentDraft, total_seats: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            category: draft.category,
            match_type: draft.match_type,
            total_seats,
            seats_left: total_seats,
            start_time: draft.start_time,
            entry_fee: draft.entry_fee,
            prize: draft.prize,
            room: draft.room,
            require_game_uid: draft.require_game_uid,
            status: draft.status,
            kill_per_pkr: draft.kill_per_pkr,
            image_url: draft.image_url,
            reminder_sent: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn joined_count(&self) -> u32 {
        self.total_seats.saturating_sub(self.seats_left)
    }

    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.start_time
    }

    pub fn is_free(&self) -> bool {
        self.entry_fee == 0
    }

    /// Started over 30 minutes ago while still labelled soon/now: hidden from the admin board.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        (now - self.start_time).num_seconds() > STALE_AFTER_SECS
            && matches!(self.status, TournamentStatus::Soon | TournamentStatus::Now)
    }
}

/// Admin form input for creating or editing a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentDraft {
    pub title: String,
    pub category: Category,
    pub match_type: MatchType,
    /// Ignored for Clash Squad (derived from the match type).
    #[serde(default)]
    pub total_seats: Option<u32>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub entry_fee: u64,
    #[serde(default)]
    pub prize: String,
    #[serde(flatten)]
    pub room: RoomDetails,
    #[serde(default)]
    pub require_game_uid: bool,
    #[serde(default)]
    pub status: TournamentStatus,
    #[serde(default)]
    pub kill_per_pkr: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
