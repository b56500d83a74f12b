//! Records mirrored from the tournament API.
//!
//! Everything here is a plain snapshot of remote state. The client never
//! edits these in place: to change a tournament you build a
//! [`TournamentInput`] and resubmit it, then use whatever the server sends
//! back.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a tournament.
///
/// Newtype wrapper over the API's numeric primary key, so a `PlayerId`
/// can't be passed where a `TournamentId` is expected even though both
/// are `u64` underneath. `#[serde(transparent)]` keeps the JSON form a
/// bare number: `TournamentId(7)` is just `7` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentId(pub u64);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// A unique identifier for a player on a tournament roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M-{}", self.0)
    }
}

/// A unique identifier for an account (the person logged in, not a
/// roster entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Status enums
// ---------------------------------------------------------------------------

/// Where a tournament is in its life.
///
/// The server owns this value; the client only displays and filters on
/// it. `#[serde(other)]` maps any status string we don't know about to
/// `Unknown` instead of failing the whole list decode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Completed => write!(f, "completed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Where a match is in its life.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Completed => write!(f, "completed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tournament
// ---------------------------------------------------------------------------

/// A tournament as the API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The game being played, e.g. "Street Fighter 6".
    pub game: String,
    #[serde(deserialize_with = "dates::date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "dates::date")]
    pub end_date: NaiveDate,
    pub max_players: u32,
    #[serde(default)]
    pub status: TournamentStatus,
    /// Roster size. Only present on list endpoints that count players,
    /// so a missing value reads as zero.
    #[serde(default)]
    pub players_count: u32,
}

/// Body for creating a tournament or resubmitting an edited one.
///
/// The defaults mirror a blank creation form: eight player slots, status
/// `upcoming`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub game: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_players: u32,
    pub status: TournamentStatus,
}

impl TournamentInput {
    /// Starts an input with the required fields and form defaults.
    pub fn new(
        name: impl Into<String>,
        game: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            game: game.into(),
            start_date,
            end_date,
            max_players: 8,
            status: TournamentStatus::Upcoming,
        }
    }

    /// Names of required text fields that are blank.
    ///
    /// Dates are typed, so they can't be blank; only the free-text fields
    /// need checking. The clients never call this; it's for forms that
    /// want to refuse to submit early.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.game.trim().is_empty() {
            missing.push("game");
        }
        missing
    }
}

impl From<&Tournament> for TournamentInput {
    /// Prefills an edit form from the current record.
    fn from(t: &Tournament) -> Self {
        Self {
            name: t.name.clone(),
            description: t.description.clone(),
            game: t.game.clone(),
            start_date: t.start_date,
            end_date: t.end_date,
            max_players: t.max_players,
            status: t.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A roster entry in a tournament.
///
/// Also used for the `player1`/`player2` objects embedded in a [`Match`],
/// which is why everything except `id` and `name` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub tournament_id: Option<TournamentId>,
    #[serde(default, deserialize_with = "dates::optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for adding a player to a roster or renaming one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
}

impl PlayerInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        if self.name.trim().is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// Shown in place of a player that hasn't been assigned yet.
const UNASSIGNED: &str = "TBD";

/// A single match between two roster entries.
///
/// Matches are flat records: there's no bracket position or round, and
/// either side may still be unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    #[serde(default)]
    pub player1_id: Option<PlayerId>,
    #[serde(default)]
    pub player2_id: Option<PlayerId>,
    #[serde(default)]
    pub player1: Option<Player>,
    #[serde(default)]
    pub player2: Option<Player>,
    #[serde(default)]
    pub player1_score: Option<u32>,
    #[serde(default)]
    pub player2_score: Option<u32>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default, deserialize_with = "dates::optional_datetime")]
    pub scheduled_date: Option<DateTime<Utc>>,
}

impl Match {
    /// Display name for the first slot, or `"TBD"`.
    pub fn player1_name(&self) -> &str {
        self.player1.as_ref().map_or(UNASSIGNED, |p| p.name.as_str())
    }

    /// Display name for the second slot, or `"TBD"`.
    pub fn player2_name(&self) -> &str {
        self.player2.as_ref().map_or(UNASSIGNED, |p| p.name.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}

/// Body for creating a match or resubmitting an edited one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub tournament_id: TournamentId,
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    pub status: MatchStatus,
}

impl MatchInput {
    /// Starts an unscheduled match with both slots empty.
    pub fn new(tournament_id: TournamentId) -> Self {
        Self {
            tournament_id,
            player1_id: None,
            player2_id: None,
            scheduled_date: None,
            status: MatchStatus::Scheduled,
        }
    }
}

/// Body for `/matches/{id}/scores`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub player1_score: u32,
    pub player2_score: u32,
}
