use mafia_token_lib::Seat;
use mafia_token_lib::Token;

use crate::EngineError;
use crate::TurnServer;
use crate::game::Game;
use crate::tests::util::submit;

#[test]
fn test_snapshot_round_trip() {
    let mut server = TurnServer::initialize(42);
    submit(
        &mut server,
        0,
        &[Token::Say, Token::Player1, Token::Red, Token::EndTurn],
    );

    let json = serde_json::to_string(server.game()).unwrap();
    let restored: Game = serde_json::from_str(&json).unwrap();
    let mut restored = TurnServer::restore(restored).unwrap();

    assert_eq!(restored.game(), server.game());

    // Both copies keep evolving identically.
    submit(&mut server, 1, &[Token::EndTurn]);
    submit(&mut restored, 1, &[Token::EndTurn]);
    assert_eq!(restored.game(), server.game());
}

#[test]
fn test_restore_rejects_broken_role_distribution() {
    let server = TurnServer::initialize(0);
    let mut value = serde_json::to_value(server.game()).unwrap();

    // Demote the don: now zero dons and seven citizens.
    value["players"][0]["role"] = serde_json::json!("Citizen");

    let game: Game = serde_json::from_value(value).unwrap();
    let err = TurnServer::restore(game).unwrap_err();
    assert!(matches!(err, EngineError::DeserializationError(_)));
}

#[test]
fn test_restore_rejects_asymmetric_mafia_memory() {
    let server = TurnServer::initialize(0);
    let mut value = serde_json::to_value(server.game()).unwrap();

    value["players"][1]["mafia_team"] = serde_json::json!([]);

    let game: Game = serde_json::from_value(value).unwrap();
    let err = TurnServer::restore(game).unwrap_err();
    assert!(matches!(err, EngineError::DeserializationError(_)));
}

#[test]
fn test_restore_rejects_stored_ephemeral_tokens() {
    let server = TurnServer::initialize(0);
    let mut value = serde_json::to_value(server.game()).unwrap();

    value["chronicle"]["seqs"][0]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!("YourTurn"));

    let game: Game = serde_json::from_value(value).unwrap();
    let err = TurnServer::restore(game).unwrap_err();
    assert!(matches!(err, EngineError::DeserializationError(_)));
}
