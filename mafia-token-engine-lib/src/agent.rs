//! A seeded random agent for self-play and replays.

use mafia_token_lib::Token;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::TurnServer;
use crate::error::EngineError;

/// Picks uniformly among the legal action sequences. Day turns grow
/// organically: picking an atom without End-Turn continues the turn, and the
/// per-turn quota eventually forces the End-Turn.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(random_seed: u64) -> Self {
        RandomAgent { rng: StdRng::seed_from_u64(random_seed) }
    }

    pub fn choose(&mut self, legal: &[Vec<Token>]) -> Option<Vec<Token>> {
        legal.choose(&mut self.rng).cloned()
    }
}

/// Drive a game to its terminal state with one agent playing every seat.
/// Returns the winner token.
pub fn play_to_completion(
    server: &mut TurnServer,
    agent: &mut RandomAgent,
) -> Result<Token, EngineError> {
    loop {
        if let Some(result) = server.result() {
            return Ok(result);
        }
        let seat = server.game().active_seat();
        let legal = server.legal_actions();
        let tokens = agent.choose(&legal).ok_or_else(|| {
            EngineError::IllegalAction(format!("no legal actions for {seat}"))
        })?;
        server.apply_action(seat, &tokens)?;
    }
}
