//! Local self-play: the built-in random agent plays all ten seats.

use std::path::Path;
use std::path::PathBuf;

use mafia_token_lib::GameId;
use mafia_token_lib::Team;
use mafia_token_engine_lib::TurnServer;
use mafia_token_engine_lib::agent::RandomAgent;

use crate::artifacts;
use crate::error::ServerError;

pub struct SelfPlayReport {
    pub game_id: GameId,
    pub winner: Team,
    pub actions: usize,
    pub artifacts: Vec<PathBuf>,
}

/// Play one full game from `seed` with agent choices drawn from
/// `random_seed`, optionally writing training artifacts. Replays with the
/// same pair of seeds are byte-identical.
pub fn run_self_play(
    seed: u16,
    random_seed: u64,
    log_dir: Option<&Path>,
) -> Result<SelfPlayReport, ServerError> {
    let mut session = TurnServer::initialize(seed);
    let mut agent = RandomAgent::new(random_seed);
    let game_id = GameId::new();

    let mut actions = 0usize;
    let winner = loop {
        if let Some(winner) = session.game().winner() {
            break winner;
        }
        let seat = session.game().active_seat();
        let tokens = agent
            .choose(&session.legal_actions())
            .ok_or(ServerError::NoLegalAction)?;
        session.apply_action(seat, &tokens)?;
        actions += 1;
    };
    tracing::info!(%game_id, seed, random_seed, ?winner, actions, "self-play finished");

    let artifacts = match log_dir {
        Some(dir) => artifacts::write_training_artifacts(dir, &session, game_id)?,
        None => Vec::new(),
    };

    Ok(SelfPlayReport { game_id, winner, actions, artifacts })
}
