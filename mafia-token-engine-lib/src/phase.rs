//! The phase state machine's vocabulary.
//!
//! Normal progression within one day cycle:
//! `Day(n) → Voting(n,0) [→ Voting(n,1) [→ Voting(n,2)]] → NightKill(n) →
//! NightDon(n) → NightSheriff(n) → Day(n+1)`. The end-of-night bookkeeping
//! (promoting night kills, win checks, day advance) is a synthetic
//! transition inside the engine, not a stored phase.

use std::fmt::Display;

use mafia_token_lib::Team;
use serde::Deserialize;
use serde::Serialize;

/// Day cycles run 1..=5; a game that survives Voting(5) is terminated by
/// policy (Black win).
pub const MAX_DAYS: u8 = 5;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Phase {
    Day { day: u8 },
    Voting { day: u8, round: u8 },
    NightKill { day: u8 },
    NightDon { day: u8 },
    NightSheriff { day: u8 },
    GameOver { day: u8, winner: Team },
}

impl Phase {
    pub fn day(&self) -> u8 {
        match *self {
            Phase::Day { day }
            | Phase::Voting { day, .. }
            | Phase::NightKill { day }
            | Phase::NightDon { day }
            | Phase::NightSheriff { day }
            | Phase::GameOver { day, .. } => day,
        }
    }

    pub fn is_day(&self) -> bool {
        matches!(self, Phase::Day { .. })
    }

    pub fn is_voting(&self) -> bool {
        matches!(self, Phase::Voting { .. })
    }

    pub fn is_night(&self) -> bool {
        matches!(
            self,
            Phase::NightKill { .. } | Phase::NightDon { .. } | Phase::NightSheriff { .. }
        )
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Phase::Day { day } => write!(f, "DAY_{day}"),
            Phase::Voting { day, round } => write!(f, "VOTING_{day}_ROUND_{round}"),
            Phase::NightKill { day } => write!(f, "NIGHT_KILL_{day}"),
            Phase::NightDon { day } => write!(f, "NIGHT_DON_{day}"),
            Phase::NightSheriff { day } => write!(f, "NIGHT_SHERIFF_{day}"),
            Phase::GameOver { .. } => write!(f, "GAME_OVER"),
        }
    }
}
