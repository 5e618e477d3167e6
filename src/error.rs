use thiserror::Error;

use crate::types::Player;

/// Why a placement was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: u8, col: u8 },

    #[error("({row}, {col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },

    #[error("({row}, {col}) does not flank any opposing line")]
    NoCapturingLine { row: u8, col: u8 },

    #[error("{player} has no kings left to place")]
    KingBudgetExhausted { player: Player },

    #[error("king pieces are not part of classic rules")]
    KingsDisabled,
}

/// Errors raised by a game session.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] InvalidMove),

    #[error("game is already over")]
    GameOver,

    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),

    #[error("{0} has no legal moves and must pass")]
    MustPass(Player),

    #[error("{0} has legal moves and cannot pass")]
    CannotPass(Player),

    #[error("{0} could not select a move")]
    NoMoveSelected(Player),
}

/// Errors raised while parsing or validating AI configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown evaluation function: {0}")]
    UnknownEvaluator(String),

    #[error("malformed strategy {0:?}: expected `random` or `minimax|<depth>|<eval>`")]
    MalformedStrategy(String),

    #[error("search depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u8, max: u8 },
}

pub type GameResult<T> = Result<T, GameError>;
