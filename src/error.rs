use thiserror::Error;

/// Every recoverable failure the core reports to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no match with that id")]
    UnknownMatch,
    #[error("match already has two seats")]
    Full,
    #[error("identity is not seated in this match")]
    NotSeated,
    #[error("it is not this seat's turn")]
    OutOfTurn,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("placement captures nothing")]
    NoCapture,
    #[error("no legal move available")]
    NoLegalMove,
    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("match is already over")]
    MatchOver,
}
