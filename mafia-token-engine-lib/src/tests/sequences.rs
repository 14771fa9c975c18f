use mafia_token_lib::Seat;
use mafia_token_lib::Token;
use mafia_token_lib::tokens::is_seed_token;

use crate::TurnServer;
use crate::agent::RandomAgent;
use crate::agent::play_to_completion;
use crate::tests::util::pass_day;
use crate::tests::util::submit;
use crate::tests::util::vote;

/// Count contiguous `<PLAYER_v> <VOTE>` occurrences in a sequence.
fn vote_mentions(seq: &[Token], voter: usize) -> usize {
    seq.windows(2)
        .filter(|w| w[0] == Token::for_seat(Seat(voter)) && w[1] == Token::Vote)
        .count()
}

#[test_log::test]
fn test_public_day_events_align_across_players() {
    let mut server = TurnServer::initialize(0);

    submit(
        &mut server,
        0,
        &[
            Token::Say,
            Token::Player1,
            Token::Red,
            Token::Nominate,
            Token::Player3,
            Token::EndTurn,
        ],
    );
    submit(&mut server, 1, &[Token::ClaimSheriff, Token::EndTurn]);

    // The opening block is private (role, team); everything after the
    // day-one marker has been public so far, so any two players' tails
    // coincide.
    let tail_of = |seat: usize| {
        let seq = server.game().sequence(Seat(seat));
        let start = seq
            .iter()
            .position(|&t| t == Token::DayPhaseStart)
            .expect("day marker present");
        &seq[start + 1..]
    };
    for seat in 1..10 {
        assert_eq!(tail_of(0), tail_of(seat), "seat {seat}");
    }
}

#[test_log::test]
fn test_own_vote_counts_once_then_revealed_to_all() {
    let mut server = TurnServer::initialize(0);
    pass_day(&mut server);

    let round: Vec<(usize, usize)> = vec![
        (0, 8),
        (1, 8),
        (2, 8),
        (3, 8),
        (4, 9),
        (5, 9),
        (6, 9),
        (7, 9),
        (8, 9),
        (9, 8),
    ];

    // Cast all but the last vote: each voter's ballot exists in their own
    // sequence only.
    for &(voter, target) in &round[..9] {
        vote(&mut server, voter, target);
    }
    for seat in 0..10 {
        let seq = server.game().sequence(Seat(seat));
        for voter in 0..10 {
            let expected = usize::from(voter == seat && voter != 9);
            assert_eq!(vote_mentions(seq, voter), expected, "seat {seat} voter {voter}");
        }
    }

    // The last vote completes the round (a 5-5 tie): the ledger is revealed
    // to everyone, so each voter is now mentioned once everywhere and twice
    // in their own sequence.
    let (voter, target) = round[9];
    vote(&mut server, voter, target);
    for seat in 0..10 {
        let seq = server.game().sequence(Seat(seat));
        for voter in 0..10 {
            let expected = if voter == seat { 2 } else { 1 };
            assert_eq!(vote_mentions(seq, voter), expected, "seat {seat} voter {voter}");
        }
    }
}

#[test_log::test]
fn test_random_playout_invariants() {
    for seed in [0u16, 1, 42, 777, 2519] {
        let mut server = TurnServer::initialize(seed);
        let mut agent = RandomAgent::new(u64::from(seed) + 1);
        let winner = play_to_completion(&mut server, &mut agent)
            .unwrap_or_else(|err| panic!("seed {seed}: {err}"));
        assert!(matches!(winner, Token::RedTeamWon | Token::BlackTeamWon));

        for seat in 0..10 {
            let seq = server.game().sequence(Seat(seat));

            // The winner token closes every sequence, exactly once.
            assert_eq!(seq.last(), Some(&winner), "seed {seed} seat {seat}");
            assert_eq!(
                seq.iter().filter(|&&t| t == winner).count(),
                1,
                "seed {seed} seat {seat}"
            );

            // Ephemeral turn signals and seed tokens are never stored.
            assert!(seq.iter().all(|t| !t.is_ephemeral()), "seed {seed} seat {seat}");
            assert!(
                seq.iter().all(|t| !is_seed_token(t.id())),
                "seed {seed} seat {seat}"
            );

            // Every sequence opens with the player's own identity block.
            assert_eq!(seq[0], Token::GameStart);
            assert_eq!(seq[1], Token::for_seat(Seat(seat)));
            assert_eq!(seq[2], Token::YourRole);
        }
    }
}

#[test]
fn test_replays_are_reproducible() {
    let run = |seed: u16, random_seed: u64| {
        let mut server = TurnServer::initialize(seed);
        let mut agent = RandomAgent::new(random_seed);
        play_to_completion(&mut server, &mut agent).unwrap();
        server.game().sequences().to_vec()
    };

    for (seed, random_seed) in [(0, 7), (42, 557), (1234, 1)] {
        assert_eq!(run(seed, random_seed), run(seed, random_seed), "seed {seed}");
    }
}
