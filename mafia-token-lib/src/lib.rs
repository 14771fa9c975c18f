//! Data structures shared by the Mafia token engine, server, and clients.

use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

pub mod action;
pub mod tokens;
pub mod wire;

pub use action::Action;
pub use action::CodecError;
pub use tokens::Token;

/// Number of seats at the table. Games are always played ten-handed.
pub const SEAT_COUNT: usize = 10;

/// Identifier for a seat at the table (player index 0..=9).
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct Seat(pub usize);

impl Seat {
    /// Iterate all ten seats in index order.
    pub fn all() -> impl Iterator<Item = Seat> {
        (0..SEAT_COUNT).map(Seat)
    }
}

impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Unique identifier for a single played game, used in artifact metadata.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A player's secret role.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub enum Role {
    Citizen,
    Sheriff,
    Mafia,
    Don,
}

impl Role {
    pub fn team(&self) -> Team {
        match self {
            Role::Citizen | Role::Sheriff => Team::Red,
            Role::Mafia | Role::Don => Team::Black,
        }
    }
}

/// Which side a player is on. Doubles as the color argument of declarations
/// and the sheriff's check result.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub enum Team {
    Red,
    Black,
}

/// One entry of the sheriff's private check log.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SheriffCheckNote {
    pub day: u8,
    pub target: Seat,
    pub color: Team,
}

/// One entry of the don's private check log.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DonCheckNote {
    pub day: u8,
    pub target: Seat,
    pub is_sheriff: bool,
}
