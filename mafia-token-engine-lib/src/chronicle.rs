//! The ten per-player chronological token sequences.
//!
//! Sequences are append-only and are the sole observable game history.
//! Public events are pushed to all ten sequences in the same call, so equal
//! suffixes across players hold by construction; privacy is a matter of
//! which push method the engine picks.

use mafia_token_lib::SEAT_COUNT;
use mafia_token_lib::Seat;
use mafia_token_lib::Token;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Chronicle {
    seqs: Vec<Vec<Token>>,
}

impl Chronicle {
    /// Build the ten sequences from their per-player opening segments.
    pub fn new(openings: Vec<Vec<Token>>) -> Self {
        debug_assert_eq!(openings.len(), SEAT_COUNT);
        Chronicle { seqs: openings }
    }

    /// Append a public event to every sequence.
    pub fn push_all(&mut self, tokens: &[Token]) {
        debug_assert!(tokens.iter().all(|t| !t.is_ephemeral()));
        for seq in &mut self.seqs {
            seq.extend_from_slice(tokens);
        }
    }

    /// Append a private event to one player's sequence only.
    pub fn push_to(&mut self, seat: Seat, tokens: &[Token]) {
        debug_assert!(tokens.iter().all(|t| !t.is_ephemeral()));
        self.seqs[seat.0].extend_from_slice(tokens);
    }

    pub fn seq(&self, seat: Seat) -> &[Token] {
        &self.seqs[seat.0]
    }

    pub fn seqs(&self) -> &[Vec<Token>] {
        &self.seqs
    }
}
