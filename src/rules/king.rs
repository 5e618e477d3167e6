use super::{ClassicRules, Rules, Variant, check_bounds, check_empty};
use crate::board::{Board, DIRECTIONS, bit};
use crate::error::InvalidMove;
use crate::state::GameState;
use crate::types::{Move, Player};

/// Reversi with a budget of king pieces per side.
///
/// Plain placements follow [`ClassicRules`] exactly. A king placement may run
/// through opposing kings, but a line holding an opposing king is only captured
/// when the mover's own king closes it.
#[derive(Debug, Default, Clone, Copy)]
pub struct KingRules {
    pub(crate) classic: ClassicRules,
}

impl KingRules {
    pub(crate) fn king_flips(board: &Board, row: u8, col: u8, player: Player) -> u64 {
        let opp = player.opposite();
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row as i32 + dr;
            let mut c = col as i32 + dc;
            let mut line = 0u64;
            let mut met_opponent_king = false;

            while let Some(cell) = board.at(r, c) {
                if cell == opp.piece() {
                    line |= bit(r as usize, c as usize);
                } else if cell == opp.king() {
                    met_opponent_king = true;
                    line |= bit(r as usize, c as usize);
                } else {
                    break;
                }
                r += dr;
                c += dc;
            }

            if line == 0 {
                continue;
            }
            let closed = match board.at(r, c) {
                Some(end) if end == player.king() => true,
                Some(end) if end == player.piece() => !met_opponent_king,
                _ => false,
            };
            if closed {
                flips |= line;
            }
        }

        flips
    }
}

impl Rules for KingRules {
    fn variant(&self) -> Variant {
        Variant::King
    }

    fn captures(&self, state: &GameState, mv: Move) -> Result<u64, InvalidMove> {
        if !mv.is_king {
            return self.classic.captures(state, mv);
        }

        check_bounds(mv)?;
        let player = state.current_player();
        if state.budget(player).is_exhausted() {
            return Err(InvalidMove::KingBudgetExhausted { player });
        }
        check_empty(state, mv)?;

        let flips = Self::king_flips(state.board(), mv.row, mv.col, player);
        if flips == 0 {
            return Err(InvalidMove::NoCapturingLine {
                row: mv.row,
                col: mv.col,
            });
        }
        Ok(flips)
    }

    fn placement_kinds(&self) -> &'static [bool] {
        &[false, true]
    }
}
