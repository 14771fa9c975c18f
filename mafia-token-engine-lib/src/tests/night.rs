use mafia_token_lib::DonCheckNote;
use mafia_token_lib::Seat;
use mafia_token_lib::SheriffCheckNote;
use mafia_token_lib::Team;
use mafia_token_lib::Token;

use crate::EngineError;
use crate::LifeState;
use crate::TurnServer;
use crate::phase::Phase;
use crate::tests::util::end_turn;
use crate::tests::util::submit;
use crate::tests::util::tail;
use crate::tests::util::vote;

/// Play a day where `nominator` puts up `scapegoat` and everyone votes them
/// out, landing the game in NightKill.
fn reach_night(server: &mut TurnServer, nominator: usize, scapegoat: usize) {
    let mut seat = server.game().active_seat().0;
    for _ in 0..10 {
        if seat == nominator {
            submit(
                server,
                seat,
                &[Token::Nominate, Token::for_seat(Seat(scapegoat)), Token::EndTurn],
            );
        } else {
            end_turn(server, seat);
        }
        if !server.game().phase().is_day() {
            break;
        }
        seat = server.game().active_seat().0;
    }
    while server.game().phase().is_voting() {
        let voter = server.game().active_seat().0;
        vote(server, voter, scapegoat);
    }
}

#[test_log::test]
fn test_night_kill_check_results_and_death_speech() {
    let mut server = TurnServer::initialize(0);
    reach_night(&mut server, 0, 4);
    assert_eq!(server.game().phase(), Phase::NightKill { day: 1 });
    assert_eq!(server.game().active_seat(), Seat(0));

    // The don shoots P7. The shot itself is private; the victim's identity
    // is public within the night.
    submit(&mut server, 0, &[Token::Kill, Token::Player7, Token::EndTurn]);
    assert_eq!(
        tail(&server, 0, 5),
        vec![Token::Kill, Token::Player7, Token::EndTurn, Token::Player7, Token::Killed]
    );
    assert_eq!(tail(&server, 5, 2), vec![Token::Player7, Token::Killed]);
    assert_eq!(
        server.game().player(Seat(7)).life,
        LifeState::MarkedForNightKill
    );

    // The don's check, with its result, stays in his sequence only.
    assert_eq!(server.game().phase(), Phase::NightDon { day: 1 });
    assert_eq!(server.game().active_seat(), Seat(0));
    submit(&mut server, 0, &[Token::DonCheck, Token::Player3, Token::EndTurn]);
    assert_eq!(
        tail(&server, 0, 4),
        vec![Token::DonCheck, Token::Player3, Token::Sheriff, Token::EndTurn]
    );
    assert_eq!(
        server.game().player(Seat(0)).don_checks,
        vec![DonCheckNote { day: 1, target: Seat(3), is_sheriff: true }]
    );

    // The sheriff's check result derives from the target's role.
    assert_eq!(server.game().phase(), Phase::NightSheriff { day: 1 });
    assert_eq!(server.game().active_seat(), Seat(3));
    submit(&mut server, 3, &[Token::SheriffCheck, Token::Player0, Token::EndTurn]);
    assert_eq!(
        tail(&server, 3, 4),
        vec![Token::SheriffCheck, Token::Player0, Token::Black, Token::EndTurn]
    );
    assert_eq!(
        server.game().player(Seat(3)).sheriff_checks,
        vec![SheriffCheckNote { day: 1, target: Seat(0), color: Team::Black }]
    );

    // Dawn: the victim dies for good and opens the day with a death speech.
    assert_eq!(server.game().phase(), Phase::Day { day: 2 });
    assert_eq!(server.game().player(Seat(7)).life, LifeState::Dead);
    assert_eq!(server.game().speech_holder(), Some(Seat(7)));
    assert_eq!(server.game().active_seat(), Seat(7));
    assert_eq!(
        tail(&server, 5, 4),
        vec![Token::Player7, Token::Killed, Token::Day2, Token::DayPhaseStart]
    );

    // A death speech may talk but not nominate, and must end the turn.
    let legal = server.legal_actions();
    assert!(legal.contains(&vec![Token::EndTurn]));
    assert!(legal.iter().all(|seq| seq[0] != Token::Nominate));
    let err = server
        .apply_action(Seat(7), &[Token::Nominate, Token::Player1, Token::EndTurn])
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(_)));

    submit(&mut server, 7, &[Token::EndTurn]);

    // The day then proceeds from the rotated opener.
    assert_eq!(server.game().speech_holder(), None);
    assert_eq!(server.game().active_seat(), Seat(1));
    assert_eq!(
        tail(&server, 2, 3),
        vec![Token::Player7, Token::EndTurn, Token::Player1]
    );
}

#[test_log::test]
fn test_mafia_takes_over_kill_when_don_dead() {
    let mut server = TurnServer::initialize(0);
    // The table votes the don out on day one.
    reach_night(&mut server, 1, 0);
    assert_eq!(server.game().player(Seat(0)).life, LifeState::Dead);

    // The kill falls to the lowest-seated living mafioso.
    assert_eq!(server.game().phase(), Phase::NightKill { day: 1 });
    assert_eq!(server.game().active_seat(), Seat(1));

    // The mafia shoots the sheriff; the don phase is skipped.
    submit(&mut server, 1, &[Token::Kill, Token::Player3, Token::EndTurn]);
    assert_eq!(server.game().phase(), Phase::NightSheriff { day: 1 });

    // A sheriff shot tonight still gets their check: the kill only resolves
    // at dawn.
    assert_eq!(server.game().active_seat(), Seat(3));
    submit(&mut server, 3, &[Token::SheriffCheck, Token::Player1, Token::EndTurn]);
    assert_eq!(
        tail(&server, 3, 4),
        vec![Token::SheriffCheck, Token::Player1, Token::Black, Token::EndTurn]
    );

    assert_eq!(server.game().phase(), Phase::Day { day: 2 });
    assert_eq!(server.game().speech_holder(), Some(Seat(3)));
}

#[test]
fn test_night_action_shapes_enforced() {
    let mut server = TurnServer::initialize(0);
    reach_night(&mut server, 0, 4);

    // A kill must end the turn.
    let err = server
        .apply_action(Seat(0), &[Token::Kill, Token::Player7])
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(_)));

    // Wrong verb for the phase.
    let err = server
        .apply_action(Seat(0), &[Token::SheriffCheck, Token::Player7, Token::EndTurn])
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(_)));

    // No self-kill, no shooting the dead.
    let err = server
        .apply_action(Seat(0), &[Token::Kill, Token::Player0, Token::EndTurn])
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(_)));
    let err = server
        .apply_action(Seat(0), &[Token::Kill, Token::Player4, Token::EndTurn])
        .unwrap_err();
    assert!(matches!(err, EngineError::IllegalAction(_)));

    // Kill targets are every living non-self seat, turn-terminated.
    let legal = server.legal_actions();
    assert_eq!(legal.len(), 8);
    assert!(legal.contains(&vec![Token::Kill, Token::Player7, Token::EndTurn]));
    assert!(!legal.contains(&vec![Token::Kill, Token::Player4, Token::EndTurn]));
}

#[test_log::test]
fn test_black_win_by_numbers_at_dawn() {
    let mut server = TurnServer::initialize(0);

    // Day 1: vote out a citizen; night: kill another.
    reach_night(&mut server, 0, 4);
    submit(&mut server, 0, &[Token::Kill, Token::Player5, Token::EndTurn]);
    submit(&mut server, 0, &[Token::DonCheck, Token::Player6, Token::EndTurn]);
    submit(&mut server, 3, &[Token::SheriffCheck, Token::Player1, Token::EndTurn]);
    assert_eq!(server.game().phase(), Phase::Day { day: 2 });

    // Day 2: the speech, then vote out a third citizen; night: kill a fourth.
    submit(&mut server, 5, &[Token::EndTurn]);
    reach_night(&mut server, 1, 6);
    submit(&mut server, 0, &[Token::Kill, Token::Player8, Token::EndTurn]);
    submit(&mut server, 0, &[Token::DonCheck, Token::Player9, Token::EndTurn]);
    submit(&mut server, 3, &[Token::SheriffCheck, Token::Player2, Token::EndTurn]);

    // Three black versus three red at dawn: black wins on the spot.
    assert_eq!(server.game().winner(), Some(Team::Black));
    assert_eq!(server.result(), Some(Token::BlackTeamWon));
    for seat in 0..10 {
        let seq = server.game().sequence(Seat(seat));
        assert_eq!(seq.last(), Some(&Token::BlackTeamWon), "seat {seat}");
        assert_eq!(
            seq.iter().filter(|&&t| t == Token::BlackTeamWon).count(),
            1,
            "seat {seat}"
        );
    }

    // Nothing moves after the end.
    let err = server.apply_action(Seat(0), &[Token::EndTurn]).unwrap_err();
    assert!(matches!(err, EngineError::GameAlreadyOver));
    assert!(server.legal_actions().is_empty());
}

#[test_log::test]
fn test_red_win_when_black_eliminated() {
    let mut server = TurnServer::initialize(0);

    // The town finds all three black players across three days.
    reach_night(&mut server, 4, 1);
    submit(&mut server, 0, &[Token::Kill, Token::Player4, Token::EndTurn]);
    submit(&mut server, 0, &[Token::DonCheck, Token::Player3, Token::EndTurn]);
    submit(&mut server, 3, &[Token::SheriffCheck, Token::Player0, Token::EndTurn]);
    assert_eq!(server.game().phase(), Phase::Day { day: 2 });
    submit(&mut server, 4, &[Token::EndTurn]);

    reach_night(&mut server, 5, 2);
    submit(&mut server, 0, &[Token::Kill, Token::Player5, Token::EndTurn]);
    submit(&mut server, 0, &[Token::DonCheck, Token::Player6, Token::EndTurn]);
    submit(&mut server, 3, &[Token::SheriffCheck, Token::Player6, Token::EndTurn]);
    assert_eq!(server.game().phase(), Phase::Day { day: 3 });
    submit(&mut server, 5, &[Token::EndTurn]);

    // Day 3: the don goes down and the red team takes it.
    reach_night(&mut server, 6, 0);

    assert_eq!(server.game().winner(), Some(Team::Red));
    for seat in 0..10 {
        assert_eq!(
            server.game().sequence(Seat(seat)).last(),
            Some(&Token::RedTeamWon),
            "seat {seat}"
        );
    }
}
