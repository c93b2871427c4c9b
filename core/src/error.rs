use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Tile index is outside the grid")]
    InvalidTile,
    #[error("Odd tile has the same lightness as the rest")]
    DegenerateRound,
    #[error("Session is not running, picks are not accepted")]
    NotRunning,
    #[error("Session already started")]
    AlreadyStarted,
    #[error("Session has not ended yet")]
    NotEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
