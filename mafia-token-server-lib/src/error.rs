use mafia_token_engine_lib::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("transport i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("message encoding: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame of {0} bytes exceeds the transport limit")]
    FrameTooLarge(u64),
    #[error("all clients disconnected")]
    ClientsGone,
    #[error("no legal action available for the active player")]
    NoLegalAction,
}
