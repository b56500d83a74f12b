//! Wire types for the tournament API.
//!
//! This crate defines the "language" that the client and the remote API
//! speak:
//!
//! - **Identifiers** ([`TournamentId`], [`PlayerId`], [`MatchId`], [`UserId`])
//! - **Records** ([`Tournament`], [`Player`], [`Match`]) mirrored from the
//!   API, plus the input bodies used to create or resubmit them.
//! - **Auth bodies** ([`LoginRequest`], [`RegisterRequest`],
//!   [`AuthResponse`], [`UserProfile`]).
//! - **Envelopes** ([`DataEnvelope`], [`ErrorBody`]): how the API wraps
//!   successful payloads and reports failures.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else. It doesn't know about
//! HTTP, tokens, or sessions. It only knows the shapes of the JSON
//! documents that travel over the wire.
//!
//! ```text
//! Session (who am I) → Transport (HTTP + bearer) → Protocol (JSON shapes)
//! ```

mod auth;
mod dates;
mod envelope;
mod types;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
pub use envelope::{DataEnvelope, ErrorBody};
pub use types::{
    Match, MatchId, MatchInput, MatchStatus, Player, PlayerId, PlayerInput,
    ScoreInput, Tournament, TournamentId, TournamentInput, TournamentStatus,
    UserId,
};
