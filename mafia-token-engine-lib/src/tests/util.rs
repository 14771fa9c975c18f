//! Shared helpers for the engine tests.

use mafia_token_lib::Seat;
use mafia_token_lib::Token;

use crate::TurnServer;

pub(crate) fn submit(server: &mut TurnServer, seat: usize, tokens: &[Token]) {
    server
        .apply_action(Seat(seat), tokens)
        .unwrap_or_else(|err| panic!("P{seat} submission failed: {err}"));
}

pub(crate) fn end_turn(server: &mut TurnServer, seat: usize) {
    submit(server, seat, &[Token::EndTurn]);
}

pub(crate) fn vote(server: &mut TurnServer, voter: usize, target: usize) {
    submit(server, voter, &[Token::Vote, Token::for_seat(Seat(target))]);
}

/// The last `n` tokens of a player's sequence.
pub(crate) fn tail(server: &TurnServer, seat: usize, n: usize) -> Vec<Token> {
    let seq = server.game().sequence(Seat(seat));
    seq[seq.len() - n..].to_vec()
}

/// Every alive player ends their day turn without acting.
pub(crate) fn pass_day(server: &mut TurnServer) {
    while server.game().phase().is_day() {
        let seat = server.game().active_seat().0;
        end_turn(server, seat);
    }
}
