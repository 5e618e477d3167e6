//! Move legality and application, one implementation per rule variant.

mod classic;
mod king;

pub use classic::ClassicRules;
pub use king::KingRules;

use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, NUM_SQUARES};
use crate::error::InvalidMove;
use crate::state::GameState;
use crate::types::{Cell, Move};

pub static CLASSIC_RULES: ClassicRules = ClassicRules;
pub static KING_RULES: KingRules = KingRules {
    classic: ClassicRules,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Classic,
    King,
}

impl Variant {
    pub fn rules(self) -> &'static dyn Rules {
        match self {
            Variant::Classic => &CLASSIC_RULES,
            Variant::King => &KING_RULES,
        }
    }
}

pub trait Rules: Send + Sync {
    fn variant(&self) -> Variant;

    /// Returns the mask of cells `mv` would recolour for the side to move,
    /// or the reason the move is illegal. Never mutates.
    fn captures(&self, state: &GameState, mv: Move) -> Result<u64, InvalidMove>;

    /// Piece kinds tried per square when enumerating moves.
    fn placement_kinds(&self) -> &'static [bool];

    fn legal(&self, state: &GameState, mv: Move) -> bool {
        self.captures(state, mv).is_ok()
    }

    /// Applies a move and returns the new state plus the recoloured cells.
    /// Legality is fully checked before the copy is touched.
    fn play(&self, state: &GameState, mv: Move) -> Result<(GameState, u64), InvalidMove> {
        let flips = self.captures(state, mv)?;
        let player = state.current_player();

        let mut next = state.clone();
        let placed = if mv.is_king {
            next.budget_mut(player).spend();
            player.king()
        } else {
            player.piece()
        };
        let board = next.board_mut();
        board.set(mv.row as usize, mv.col as usize, placed);
        // Captured kings lose their crown.
        board.paint(flips, player.piece());

        Ok((next, flips))
    }

    fn apply(&self, state: &GameState, mv: Move) -> Result<GameState, InvalidMove> {
        self.play(state, mv).map(|(next, _)| next)
    }

    /// Every legal move for the side to move, row-major, plain before king per square.
    fn all_legal_moves(&self, state: &GameState) -> Vec<Move> {
        let mut moves = Vec::new();
        for pos in 0..NUM_SQUARES {
            let (row, col) = ((pos / BOARD_SIZE) as u8, (pos % BOARD_SIZE) as u8);
            for &is_king in self.placement_kinds() {
                let mv = Move { row, col, is_king };
                if self.legal(state, mv) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    fn has_legal_move(&self, state: &GameState) -> bool {
        (0..NUM_SQUARES).any(|pos| {
            let (row, col) = ((pos / BOARD_SIZE) as u8, (pos % BOARD_SIZE) as u8);
            self.placement_kinds()
                .iter()
                .any(|&is_king| self.legal(state, Move { row, col, is_king }))
        })
    }

    /// True only when neither side can move.
    fn is_terminal(&self, state: &GameState) -> bool {
        !self.has_legal_move(state) && !self.has_legal_move(&state.switch_turn())
    }
}

fn check_bounds(mv: Move) -> Result<(), InvalidMove> {
    let Move { row, col, .. } = mv;
    if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
        return Err(InvalidMove::OutOfBounds { row, col });
    }
    Ok(())
}

fn check_empty(state: &GameState, mv: Move) -> Result<(), InvalidMove> {
    let Move { row, col, .. } = mv;
    if state.board().get(row as usize, col as usize) != Cell::Empty {
        return Err(InvalidMove::CellOccupied { row, col });
    }
    Ok(())
}
