//! Legal-action enumeration for the active player.
//!
//! The mask produces whole token *sequences*, not individual tokens. During
//! the day each atom is offered both bare (continue the turn) and with a
//! trailing End-Turn (finish it), plus the bare End-Turn; multi-action
//! submissions are validated by rule in the engine rather than enumerated
//! here.

use mafia_token_lib::Action;
use mafia_token_lib::Seat;
use mafia_token_lib::Team;
use mafia_token_lib::Token;
use tap::Tap;

use crate::game::Game;
use crate::game::LifeState;
use crate::game::MAX_DAY_ATOMS;
use crate::phase::Phase;
use crate::seats::SeatSet;

/// All legal action token sequences for the current active player.
pub fn legal_actions(game: &Game) -> Vec<Vec<Token>> {
    match game.phase() {
        Phase::Day { .. } => day_actions(game),
        Phase::Voting { round, .. } => voting_actions(game, round),
        Phase::NightKill { .. } => night_actions(game, NightVerb::Kill),
        Phase::NightDon { .. } => night_actions(game, NightVerb::DonCheck),
        Phase::NightSheriff { .. } => night_actions(game, NightVerb::SheriffCheck),
        Phase::GameOver { .. } => Vec::new(),
    }
}

fn day_actions(game: &Game) -> Vec<Vec<Token>> {
    let actor = game.active_seat();
    let performed = game.turn_atoms();

    if performed.len() >= MAX_DAY_ATOMS {
        return vec![vec![Token::EndTurn]];
    }

    let speaking = game.speech_holder() == Some(actor);
    let others: SeatSet = game.alive_seats().tap_mut(|s| {
        s.remove(actor);
    });

    let mut atoms = Vec::new();
    for target in others.iter() {
        for color in [Team::Red, Team::Black] {
            atoms.push(Action::Say { target, color });
            atoms.push(Action::ClaimSheriffCheck { target, color });
        }
    }
    atoms.push(Action::ClaimSheriff);
    atoms.push(Action::DenySheriff);

    let nominated_already = performed
        .iter()
        .any(|atom| matches!(atom, Action::Nominate { .. }));
    if !speaking && !nominated_already {
        for target in others.iter() {
            if !game.nominations().contains(&target) {
                atoms.push(Action::Nominate { target });
            }
        }
    }

    let mut sequences = Vec::new();
    for atom in atoms {
        if performed.contains(&atom) {
            continue;
        }
        let encoded = atom.encode();
        sequences.push(encoded.clone());
        sequences.push(encoded.tap_mut(|seq| seq.push(Token::EndTurn)));
    }
    sequences.push(vec![Token::EndTurn]);
    sequences
}

fn voting_actions(game: &Game, round: u8) -> Vec<Vec<Token>> {
    if round == 2 {
        return vec![
            Action::VoteEliminateAll.encode(),
            Action::VoteKeepAll.encode(),
        ];
    }
    game.vote_targets_for(game.active_seat())
        .into_iter()
        .map(|target| Action::Vote { target }.encode())
        .collect()
}

enum NightVerb {
    Kill,
    DonCheck,
    SheriffCheck,
}

fn night_actions(game: &Game, verb: NightVerb) -> Vec<Vec<Token>> {
    let actor = game.active_seat();
    Seat::all()
        .filter(|&target| target != actor)
        .filter(|&target| match verb {
            // A kill needs a living target; checks may still probe a player
            // shot earlier the same night.
            NightVerb::Kill => game.player(target).life.is_alive(),
            NightVerb::DonCheck | NightVerb::SheriffCheck => {
                game.player(target).life != LifeState::Dead
            }
        })
        .map(|target| {
            let atom = match verb {
                NightVerb::Kill => Action::Kill { target },
                NightVerb::DonCheck => Action::DonCheck { target },
                NightVerb::SheriffCheck => Action::SheriffCheck { target },
            };
            atom.encode().tap_mut(|seq| seq.push(Token::EndTurn))
        })
        .collect()
}
