use serde::{Deserialize, Serialize};

pub const INITIAL_KINGS: u8 = 5;
pub const INITIAL_KING_THRESHOLD: i32 = 20;
pub const KING_THRESHOLD_INCREMENT: i32 = 5;

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
    BlackKing,
    WhiteKing,
}

impl Cell {
    /// Owner of the piece, `None` for an empty square.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black | Cell::BlackKing => Some(Player::Black),
            Cell::White | Cell::WhiteKing => Some(Player::White),
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, Cell::BlackKing | Cell::WhiteKing)
    }

    /// Converts to `0..=4` where 0=empty, 1=black, 2=white, 3=black king, 4=white king.
    pub fn to_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
            Cell::BlackKing => 3,
            Cell::WhiteKing => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opposite(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The plain piece of this side.
    pub fn piece(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// The king piece of this side.
    pub fn king(self) -> Cell {
        match self {
            Player::Black => Cell::BlackKing,
            Player::White => Cell::WhiteKing,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => f.write_str("black"),
            Player::White => f.write_str("white"),
        }
    }
}

/// A placement. `is_king` is always false under classic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
    pub is_king: bool,
}

impl Move {
    pub fn plain(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            is_king: false,
        }
    }

    pub fn king(row: u8, col: u8) -> Self {
        Self {
            row,
            col,
            is_king: true,
        }
    }
}

/// Remaining king placements and the score margin a king move must beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KingBudget {
    pub remaining: u8,
    pub threshold: i32,
}

impl KingBudget {
    pub fn new() -> Self {
        Self {
            remaining: INITIAL_KINGS,
            threshold: INITIAL_KING_THRESHOLD,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Records one king placement. Caller must have checked `is_exhausted`.
    pub(crate) fn spend(&mut self) {
        debug_assert!(self.remaining > 0, "spend() on an exhausted budget");
        self.remaining = self.remaining.saturating_sub(1);
        self.threshold += KING_THRESHOLD_INCREMENT;
    }
}

impl Default for KingBudget {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Draw,
}

/// Final piece counts. Kings count for their colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinishSummary {
    pub black_count: u8,
    pub white_count: u8,
    pub winner: Winner,
}

/// Public game state handed to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// 64 cells, row-major, encoded as in [`Cell::to_u8`].
    pub board: Vec<u8>,
    pub current_player: Player,
    pub black_count: u8,
    pub white_count: u8,
    pub black_kings: KingBudget,
    pub white_kings: KingBudget,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}
