use super::{Rules, Variant, check_bounds, check_empty};
use crate::board::{Board, DIRECTIONS, bit};
use crate::error::InvalidMove;
use crate::state::GameState;
use crate::types::{Move, Player};

/// Standard Reversi: a run of opposing plain discs closed by one of the mover's plain discs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicRules;

impl ClassicRules {
    /// Collects the plain-disc runs a plain placement at `(row, col)` would flip.
    /// Kings stop a run without closing it.
    pub(crate) fn plain_flips(board: &Board, row: u8, col: u8, player: Player) -> u64 {
        let me = player.piece();
        let opp = player.opposite().piece();
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row as i32 + dr;
            let mut c = col as i32 + dc;
            let mut line = 0u64;

            while board.at(r, c) == Some(opp) {
                line |= bit(r as usize, c as usize);
                r += dr;
                c += dc;
            }

            if line != 0 && board.at(r, c) == Some(me) {
                flips |= line;
            }
        }

        flips
    }
}

impl Rules for ClassicRules {
    fn variant(&self) -> Variant {
        Variant::Classic
    }

    fn captures(&self, state: &GameState, mv: Move) -> Result<u64, InvalidMove> {
        check_bounds(mv)?;
        if mv.is_king {
            return Err(InvalidMove::KingsDisabled);
        }
        check_empty(state, mv)?;

        let flips = Self::plain_flips(state.board(), mv.row, mv.col, state.current_player());
        if flips == 0 {
            return Err(InvalidMove::NoCapturingLine {
                row: mv.row,
                col: mv.col,
            });
        }
        Ok(flips)
    }

    fn placement_kinds(&self) -> &'static [bool] {
        &[false]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn classic(board: Board, player: Player) -> GameState {
        GameState::from_board(Variant::Classic, board, player)
    }

    #[test]
    fn t01_initial_black_legal_moves_are_four_expected_squares() {
        let state = GameState::new(Variant::Classic);

        let moves = ClassicRules.all_legal_moves(&state);

        assert_eq!(
            moves,
            vec![
                Move::plain(2, 4),
                Move::plain(3, 5),
                Move::plain(4, 2),
                Move::plain(5, 3),
            ]
        );
    }

    #[test]
    fn opening_move_flips_one_disc() {
        let state = GameState::new(Variant::Classic);

        let (next, flips) = ClassicRules.play(&state, Move::plain(2, 4)).unwrap();

        assert_eq!(flips, bit(3, 4));
        assert_eq!(next.board().get(2, 4), Cell::Black);
        assert_eq!(next.board().get(3, 4), Cell::Black);
        assert_eq!(next.board().count(), (4, 1));
        assert_eq!(next.board().non_empty_count(), 5);
        // The turn is handed over separately.
        assert_eq!(next.current_player(), Player::Black);
    }

    #[test]
    fn illegal_moves_report_their_cause() {
        let state = GameState::new(Variant::Classic);

        assert_eq!(
            ClassicRules.captures(&state, Move::plain(8, 0)),
            Err(InvalidMove::OutOfBounds { row: 8, col: 0 })
        );
        assert_eq!(
            ClassicRules.captures(&state, Move::plain(3, 3)),
            Err(InvalidMove::CellOccupied { row: 3, col: 3 })
        );
        assert_eq!(
            ClassicRules.captures(&state, Move::plain(0, 0)),
            Err(InvalidMove::NoCapturingLine { row: 0, col: 0 })
        );
        assert_eq!(
            ClassicRules.captures(&state, Move::king(2, 4)),
            Err(InvalidMove::KingsDisabled)
        );
    }

    #[test]
    fn illegal_apply_leaves_state_unchanged() {
        let state = GameState::new(Variant::Classic);
        let before = state.clone();

        assert!(ClassicRules.apply(&state, Move::plain(0, 0)).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn runs_from_several_directions_are_flipped_together() {
        let board = Board::from_rows([
            "b.b.b...",
            ".www....",
            "bw.wb...",
            ".www....",
            "b.b.b...",
            "........",
            "........",
            "........",
        ]);
        let state = classic(board, Player::Black);

        let (next, flips) = ClassicRules.play(&state, Move::plain(2, 2)).unwrap();

        assert_eq!(flips.count_ones(), 8);
        assert_eq!(next.board().count(), (17, 0));
    }

    #[test]
    fn run_ending_at_the_edge_does_not_flip() {
        let board = Board::from_rows([
            ".ww.....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let state = classic(board, Player::Black);

        assert!(!ClassicRules.legal(&state, Move::plain(0, 0)));
        assert!(!ClassicRules.legal(&state, Move::plain(0, 3)));
    }

    #[test]
    fn kings_neither_extend_nor_close_a_plain_run() {
        let board = Board::from_rows([
            ".wB.....",
            ".W.b....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let state = classic(board, Player::Black);

        // (0,1) is closed by a black king and (1,1) is a white king: neither direction flips.
        assert!(!ClassicRules.legal(&state, Move::plain(0, 0)));
        assert!(!ClassicRules.legal(&state, Move::plain(1, 0)));
    }

    #[test]
    fn forced_pass_is_not_terminal() {
        let board = Board::from_rows([
            "wb......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        let state = classic(board, Player::Black);

        assert!(ClassicRules.all_legal_moves(&state).is_empty());
        assert!(!ClassicRules.is_terminal(&state));
        let white = state.switch_turn();
        assert_eq!(ClassicRules.all_legal_moves(&white), vec![Move::plain(0, 2)]);
    }

    #[test]
    fn terminal_when_neither_side_can_move() {
        let board = Board::from_rows([
            "bbbbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
            "bbbbbbbb",
            "bbbbbbb.",
        ]);
        let state = classic(board, Player::White);

        assert!(ClassicRules.all_legal_moves(&state).is_empty());
        assert!(ClassicRules.all_legal_moves(&state.switch_turn()).is_empty());
        assert!(ClassicRules.is_terminal(&state));
    }
}
