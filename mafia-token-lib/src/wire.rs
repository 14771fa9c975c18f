//! Message types of the framed JSON transport.
//!
//! Every message is one JSON object tagged with `"type"`, framed as an
//! 8-byte big-endian length followed by exactly that many UTF-8 JSON bytes.
//! Both directions use the same framing.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::Action;
use crate::DonCheckNote;
use crate::Role;
use crate::Seat;
use crate::SheriffCheckNote;
use crate::Team;

/// Legal moves keyed by verb name (`"NOMINATE"`, `"SAY"`, ...).
///
/// Each entry lists the valid argument tuples for that verb as raw token IDs
/// (player tokens 13..=22, colors 23/24); argument-less verbs map to a
/// single empty tuple.
pub type ValidActions = BTreeMap<String, Vec<Vec<u16>>>;

/// A message on the wire, either direction.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Server → client: it is this player's turn to act.
    #[serde(rename = "ACTION_REQUEST")]
    ActionRequest {
        player_id: usize,
        phase: String,
        valid_actions: ValidActions,
        observation: Observation,
    },
    /// Client → server: the chosen action.
    #[serde(rename = "ACTION_RESPONSE")]
    ActionResponse { player_id: usize, action: Action },
    /// Server → client: something happened.
    #[serde(rename = "GAME_EVENT")]
    GameEvent {
        #[serde(flatten)]
        event: GameEvent,
    },
    /// Server → client: the last request failed; the client keeps its turn.
    #[serde(rename = "ERROR")]
    Error { message: String },
}

/// What a player is allowed to see of the game.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Observation {
    pub phase: String,
    pub alive: Vec<Seat>,
    pub nominations: Vec<Seat>,
    pub tied: Vec<Seat>,
    pub role: Role,
    /// Fellow Black-team seats; empty for Red players.
    pub mafia_team: Vec<Seat>,
    pub sheriff_checks: Vec<SheriffCheckNote>,
    pub don_checks: Vec<DonCheckNote>,
    /// The player's stored token stream plus the ephemeral turn signals.
    pub tokens: Vec<u16>,
}

/// Why a player left the game.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EliminationCause {
    VotedOut,
    NightKill,
}

/// Events pushed by the server. Check results are private and sent only to
/// the acting player; the rest are broadcast.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    PlayerEliminated {
        player: Seat,
        cause: EliminationCause,
    },
    SheriffCheckResult {
        target: Seat,
        color: Team,
    },
    DonCheckResult {
        target: Seat,
        is_sheriff: bool,
    },
    PhaseChanged {
        phase: String,
    },
    GameOver {
        winner: Team,
    },
}
