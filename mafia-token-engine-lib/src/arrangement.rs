//! Deterministic enumeration of all role arrangements.
//!
//! Ten seats hold exactly one Don, two Mafia, one Sheriff, and six Citizens,
//! giving 10 · C(9,2) · 7 = 2,520 placements. The table is generated once in
//! a canonical order (Don seat ascending, then the Mafia pair lexicographic
//! over the remaining seats, then the Sheriff ascending over the rest) so a
//! seed maps to the same arrangement on every host.

use std::sync::LazyLock;

use mafia_token_lib::Role;
use mafia_token_lib::SEAT_COUNT;

/// Total number of distinct role arrangements.
pub const ARRANGEMENT_COUNT: usize = 2520;

static ARRANGEMENTS: LazyLock<Vec<[Role; SEAT_COUNT]>> = LazyLock::new(|| {
    let mut arrangements = Vec::with_capacity(ARRANGEMENT_COUNT);

    for don in 0..SEAT_COUNT {
        let rest: Vec<usize> = (0..SEAT_COUNT).filter(|&s| s != don).collect();
        for a in 0..rest.len() {
            for b in a + 1..rest.len() {
                let (mafia_a, mafia_b) = (rest[a], rest[b]);
                for &sheriff in rest
                    .iter()
                    .filter(|&&s| s != mafia_a && s != mafia_b)
                {
                    let mut roles = [Role::Citizen; SEAT_COUNT];
                    roles[don] = Role::Don;
                    roles[mafia_a] = Role::Mafia;
                    roles[mafia_b] = Role::Mafia;
                    roles[sheriff] = Role::Sheriff;
                    arrangements.push(roles);
                }
            }
        }
    }

    arrangements
});

/// The role arrangement selected by a seed. Seeds beyond the table wrap
/// around (`seed % 2520`).
pub fn arrangement_for_seed(seed: u16) -> [Role; SEAT_COUNT] {
    ARRANGEMENTS[seed as usize % ARRANGEMENTS.len()]
}

/// Number of arrangements actually generated; always [`ARRANGEMENT_COUNT`].
pub fn total_arrangements() -> usize {
    ARRANGEMENTS.len()
}
