//! Core engine for the token-based Russian Mafia game.
//!
//! The engine is a pure state machine: a seed deterministically places the
//! roles, every accepted action appends to the ten per-player token
//! sequences, and the [`TurnServer`] arbitrates whose action is required.
//! Hosts that want lookahead clone the server and play the clone.

use mafia_token_lib::Seat;
use mafia_token_lib::Token;

pub mod agent;
pub mod arrangement;
pub mod chronicle;
mod error;
pub mod game;
pub mod mask;
pub mod phase;
pub mod seats;
mod votes;

pub use error::EngineError;
pub use game::Game;
pub use game::LifeState;
pub use game::PlayerState;
pub use phase::Phase;

/// Arbitrates turns for one game: hands out observations and legal actions
/// for the active player and applies validated submissions.
#[derive(Clone, Debug)]
pub struct TurnServer {
    game: Game,
}

impl TurnServer {
    /// Start a fresh game from a seed (0..=2519 covers every arrangement).
    pub fn initialize(seed: u16) -> Self {
        TurnServer { game: Game::new(seed) }
    }

    /// Adopt a previously snapshotted game, re-validating its invariants.
    pub fn restore(game: Game) -> Result<Self, EngineError> {
        game.verify_integrity()?;
        Ok(TurnServer { game })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The stored sequence of `seat` plus the ephemeral turn signals.
    pub fn observation(&self, seat: Seat) -> Vec<Token> {
        self.game.observation(seat)
    }

    /// Legal action sequences for the current active player; empty once the
    /// game is over.
    pub fn legal_actions(&self) -> Vec<Vec<Token>> {
        mask::legal_actions(&self.game)
    }

    /// Apply `seat`'s submitted tokens. The submission either takes effect
    /// in full or the game is left untouched.
    pub fn apply_action(&mut self, seat: Seat, tokens: &[Token]) -> Result<(), EngineError> {
        self.game.apply_action(seat, tokens)
    }

    /// The winner token, once there is one.
    pub fn result(&self) -> Option<Token> {
        self.game.result()
    }
}
