use thiserror::Error;

/// Ways a remote call can fail, as seen from the solving side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with something other than 200.
    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Network(String),
    #[error("payload did not parse: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Deduction and guessing both found nothing to act on while the game
    /// was still reported live.
    #[error("board exhausted before the server reported the game over")]
    ExhaustedBoard,
}

pub type Result<T, E = AgentError> = std::result::Result<T, E>;
