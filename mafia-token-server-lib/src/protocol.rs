//! Translation between engine state and wire payloads.

use mafia_token_lib::Seat;
use mafia_token_lib::Token;
use mafia_token_lib::action::parse_turn;
use mafia_token_lib::wire::Observation;
use mafia_token_lib::wire::ValidActions;
use mafia_token_engine_lib::TurnServer;

/// Group the legal action sequences by verb for the wire.
///
/// Day atoms appear both bare and with a trailing End-Turn in the legal set;
/// on the wire that collapses to one entry per atom, and the client drives a
/// multi-action turn by sending atoms one at a time until `END_TURN`.
pub fn build_valid_actions(legal: &[Vec<Token>]) -> ValidActions {
    let mut valid = ValidActions::new();
    for sequence in legal {
        let Ok(atoms) = parse_turn(sequence) else {
            continue;
        };
        let Some(first) = atoms.first() else {
            continue;
        };
        let args: Vec<u16> = first.encode()[1..].iter().map(|t| t.id()).collect();
        let entry = valid.entry(first.kind().to_string()).or_default();
        if !entry.contains(&args) {
            entry.push(args);
        }
    }
    valid
}

/// Everything `seat` is allowed to see, including their token stream with
/// the ephemeral turn signals.
pub fn observation_payload(session: &TurnServer, seat: Seat) -> Observation {
    let game = session.game();
    let player = game.player(seat);
    Observation {
        phase: game.phase().to_string(),
        alive: game.alive_seats().iter().collect(),
        nominations: game.nominations().to_vec(),
        tied: game.tied().to_vec(),
        role: player.role,
        mafia_team: player.mafia_team.clone(),
        sheriff_checks: player.sheriff_checks.clone(),
        don_checks: player.don_checks.clone(),
        tokens: session.observation(seat).iter().map(|t| t.id()).collect(),
    }
}
