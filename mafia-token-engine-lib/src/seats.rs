//! Small set of seats backed by a bit set.

use bit_set::BitSet;
use mafia_token_lib::Seat;

/// A set of seats (player indices). Iteration is in ascending seat order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SeatSet(BitSet);

impl SeatSet {
    pub fn new() -> Self {
        SeatSet(BitSet::new())
    }

    pub fn insert(&mut self, seat: Seat) -> bool {
        self.0.insert(seat.0)
    }

    pub fn remove(&mut self, seat: Seat) -> bool {
        self.0.remove(seat.0)
    }

    pub fn contains(&self, seat: Seat) -> bool {
        self.0.contains(seat.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Seat> + '_ {
        self.0.iter().map(Seat)
    }

    /// Remove every seat also present in `other`.
    pub fn difference_with(&mut self, other: &SeatSet) {
        self.0.difference_with(&other.0);
    }
}

impl FromIterator<Seat> for SeatSet {
    fn from_iter<T: IntoIterator<Item = Seat>>(iter: T) -> Self {
        SeatSet(iter.into_iter().map(|seat| seat.0).collect())
    }
}
