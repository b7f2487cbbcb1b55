use thiserror::Error;

/// Errors raised by the search core and by [`GameState`](crate::board::GameState) implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MctsError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("No legal moves explored")]
    NoExploredMoves,

    #[error("Terminal position cannot be searched")]
    TerminalPosition,

    #[error("Inconsistent game state: {0}")]
    InconsistentState(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid node ID")]
    InvalidNode,
}

pub type Result<T> = std::result::Result<T, MctsError>;
