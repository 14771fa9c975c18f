//! Vote tallying.

use mafia_token_lib::SEAT_COUNT;
use mafia_token_lib::Seat;

/// Seats holding the maximum vote count, in ascending seat order. A single
/// leader means an elimination; several mean a tie.
pub(crate) fn leaders(ballot: &[(Seat, Seat)]) -> Vec<Seat> {
    let mut counts = [0usize; SEAT_COUNT];
    for &(_, target) in ballot {
        counts[target.0] += 1;
    }

    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    (0..SEAT_COUNT)
        .filter(|&seat| counts[seat] == max)
        .map(Seat)
        .collect()
}

/// True when `yes` votes form a strict majority of `alive` players.
pub(crate) fn strict_majority(yes: usize, alive: usize) -> bool {
    yes * 2 > alive
}
