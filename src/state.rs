use crate::board::Board;
use crate::error::InvalidMove;
use crate::rules::{Rules, Variant};
use crate::types::{FinishSummary, KingBudget, Move, Player, Winner};

/// Everything the rules need to judge a move: board, side to move, king budgets.
///
/// The state owns its board outright; applying a move returns a new state and
/// leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    variant: Variant,
    board: Board,
    current_player: Player,
    black_kings: KingBudget,
    white_kings: KingBudget,
}

impl GameState {
    /// Opening position, black to move, full king budgets.
    pub fn new(variant: Variant) -> Self {
        Self::from_board(variant, Board::new(), Player::Black)
    }

    pub fn from_board(variant: Variant, board: Board, current_player: Player) -> Self {
        Self {
            variant,
            board,
            current_player,
            black_kings: KingBudget::new(),
            white_kings: KingBudget::new(),
        }
    }

    pub fn with_king_budgets(mut self, black: KingBudget, white: KingBudget) -> Self {
        self.black_kings = black;
        self.white_kings = white;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn rules(&self) -> &'static dyn Rules {
        self.variant.rules()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn budget(&self, player: Player) -> KingBudget {
        match player {
            Player::Black => self.black_kings,
            Player::White => self.white_kings,
        }
    }

    pub(crate) fn budget_mut(&mut self, player: Player) -> &mut KingBudget {
        match player {
            Player::Black => &mut self.black_kings,
            Player::White => &mut self.white_kings,
        }
    }

    /// Same position with `player` to move.
    pub fn with_player(&self, player: Player) -> Self {
        let mut next = self.clone();
        next.current_player = player;
        next
    }

    pub fn switch_turn(&self) -> Self {
        self.with_player(self.current_player.opposite())
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.rules().all_legal_moves(self)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.rules().legal(self, mv)
    }

    /// Applies `mv` for the side to move. The turn is not switched.
    pub fn apply_move(&self, mv: Move) -> Result<Self, InvalidMove> {
        self.rules().apply(self, mv)
    }

    pub fn is_terminal(&self) -> bool {
        self.rules().is_terminal(self)
    }

    pub fn finish_summary(&self) -> FinishSummary {
        let (black_count, white_count) = self.board.count();
        FinishSummary {
            black_count,
            white_count,
            winner: if black_count > white_count {
                Winner::Black
            } else if white_count > black_count {
                Winner::White
            } else {
                Winner::Draw
            },
        }
    }
}
