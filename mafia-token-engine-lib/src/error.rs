use mafia_token_lib::CodecError;
use mafia_token_lib::Seat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid token sequence: {0}")]
    InvalidTokenSequence(#[from] CodecError),
    #[error("illegal action: {0}")]
    IllegalAction(String),
    #[error("wrong player: expected {expected}, got {got}")]
    WrongPlayer { expected: Seat, got: Seat },
    #[error("game is not initialized")]
    GameNotInitialized,
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("restored state failed validation: {0}")]
    DeserializationError(String),
}
