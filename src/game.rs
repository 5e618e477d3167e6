use serde::Serialize;
use tracing::{info, warn};

use crate::ai::MoveSelector;
use crate::board::bitmask_to_indices;
use crate::error::{GameError, GameResult};
use crate::rules::Variant;
use crate::state::GameState;
use crate::types::{FinishSummary, GameSnapshot, Move, Player};

/// Where a game stands. `TurnPassed` is never stored: [`GameInstance::advance`]
/// reports it when it hands the turn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    InProgress,
    TurnPassed,
    Ended,
}

enum Seat {
    Human,
    Ai(Box<dyn MoveSelector>),
}

/// One live game: the user-facing state plus who controls each side.
pub struct GameInstance {
    state: GameState,
    phase: Phase,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    black: Seat,
    white: Seat,
}

impl GameInstance {
    /// A game with both sides controlled by the caller.
    pub fn new(variant: Variant) -> Self {
        Self {
            state: GameState::new(variant),
            phase: Phase::InProgress,
            is_pass: false,
            flipped: Vec::new(),
            black: Seat::Human,
            white: Seat::Human,
        }
    }

    /// Hands `player`'s side to `selector`.
    pub fn with_ai(mut self, player: Player, selector: Box<dyn MoveSelector>) -> Self {
        *self.seat_mut(player) = Seat::Ai(selector);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn is_ai_turn(&self) -> bool {
        matches!(self.seat(self.current_player()), Seat::Ai(_))
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.state.rules().has_legal_move(&self.state)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.state.legal_moves()
    }

    /// Places a piece for a caller-controlled side. Nothing changes on error.
    pub fn place(&mut self, row: u8, col: u8, is_king: bool) -> GameResult<()> {
        self.ensure_running()?;
        let player = self.current_player();
        if self.is_ai_turn() {
            return Err(GameError::NotYourTurn(player));
        }
        if !self.has_legal_moves_for_current() {
            return Err(GameError::MustPass(player));
        }

        self.apply_move(Move { row, col, is_king })
    }

    /// Lets the AI seat of the side to move play. Returns the move it made.
    pub fn do_ai_move(&mut self) -> GameResult<Move> {
        self.ensure_running()?;
        let player = self.current_player();
        if !self.has_legal_moves_for_current() {
            return Err(GameError::MustPass(player));
        }

        let seat = match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        };
        let Seat::Ai(selector) = seat else {
            return Err(GameError::NotYourTurn(player));
        };
        let selected = selector
            .select_move(&self.state)
            .ok_or(GameError::NoMoveSelected(player))?;

        self.apply_move(selected)?;
        Ok(selected)
    }

    /// Passes for a side that has no legal move.
    pub fn pass(&mut self) -> GameResult<()> {
        self.ensure_running()?;
        let player = self.current_player();
        if self.has_legal_moves_for_current() {
            return Err(GameError::CannotPass(player));
        }

        self.hand_over_turn();
        Ok(())
    }

    /// Settles the turn after a move: passes when the side to move is stuck and
    /// ends the game when both sides are.
    pub fn advance(&mut self) -> Phase {
        if self.is_game_over() {
            return Phase::Ended;
        }
        if self.has_legal_moves_for_current() {
            return Phase::InProgress;
        }
        self.hand_over_turn();
        if self.is_game_over() {
            Phase::Ended
        } else {
            Phase::TurnPassed
        }
    }

    pub fn end_game(&mut self) {
        if self.phase != Phase::Ended {
            self.phase = Phase::Ended;
            let summary = self.to_finish_summary();
            info!(
                black = summary.black_count,
                white = summary.white_count,
                winner = ?summary.winner,
                "game over"
            );
        }
    }

    /// Starts a fresh game of the same variant with the same seats.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.state.variant());
        self.phase = Phase::InProgress;
        self.is_pass = false;
        self.flipped.clear();
    }

    pub fn to_snapshot(&self) -> GameSnapshot {
        let board = self.state.board();
        let (black_count, white_count) = board.count();
        GameSnapshot {
            board: board.to_array().to_vec(),
            current_player: self.current_player(),
            black_count,
            white_count,
            black_kings: self.state.budget(Player::Black),
            white_kings: self.state.budget(Player::White),
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_finish_summary(&self) -> FinishSummary {
        self.state.finish_summary()
    }

    fn ensure_running(&self) -> GameResult<()> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn apply_move(&mut self, mv: Move) -> GameResult<()> {
        let player = self.current_player();
        let (next, flips) = match self.state.rules().play(&self.state, mv) {
            Ok(played) => played,
            Err(err) => {
                warn!(%player, row = mv.row, col = mv.col, is_king = mv.is_king, %err, "move rejected");
                return Err(err.into());
            }
        };

        self.state = next.switch_turn();
        self.is_pass = false;
        self.flipped = bitmask_to_indices(flips);

        if self.state.is_terminal() {
            self.end_game();
        }

        Ok(())
    }

    /// Pass mechanics. The side to move must have no legal move.
    fn hand_over_turn(&mut self) {
        let player = self.current_player();
        self.is_pass = true;
        self.flipped.clear();
        self.state = self.state.switch_turn();
        info!(%player, "turn passed");

        if !self.has_legal_moves_for_current() {
            self.end_game();
        }
    }

    fn seat(&self, player: Player) -> &Seat {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    fn seat_mut(&mut self, player: Player) -> &mut Seat {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    #[cfg(test)]
    fn set_state_for_test(&mut self, state: GameState) {
        self.state = state;
        self.phase = Phase::InProgress;
        self.is_pass = false;
        self.flipped.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::error::InvalidMove;
    use crate::types::INITIAL_KINGS;

    struct FixedMoveSelector {
        mv: Move,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(&mut self, _state: &GameState) -> Option<Move> {
            Some(self.mv)
        }
    }

    fn stuck_black() -> GameState {
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
        GameState::from_board(Variant::Classic, board, Player::Black)
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new(Variant::Classic);
        let state = game.to_snapshot();

        assert_eq!(state.current_player, Player::Black);
        assert_eq!(state.black_count, 2);
        assert_eq!(state.white_count, 2);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.legal_moves().len(), 4);
    }

    #[test]
    fn t02_illegal_player_move_returns_error() {
        let mut game = GameInstance::new(Variant::Classic);
        let before = game.to_snapshot();

        let err = game.place(0, 0, false).unwrap_err();

        assert_eq!(
            err,
            GameError::IllegalMove(InvalidMove::NoCapturingLine { row: 0, col: 0 })
        );
        assert_eq!(game.to_snapshot(), before);
    }

    #[test]
    fn legal_move_flips_and_hands_over_the_turn() {
        let mut game = GameInstance::new(Variant::King);

        game.place(2, 4, true).unwrap();
        let state = game.to_snapshot();

        assert_eq!(state.current_player, Player::White);
        assert_eq!(state.flipped, vec![28]);
        assert_eq!(state.board[20], 3);
        assert_eq!(state.black_kings.remaining, INITIAL_KINGS - 1);
        assert_eq!((state.black_count, state.white_count), (4, 1));
    }

    #[test]
    fn t03_pass_occurrence_switches_turn() {
        let mut game = GameInstance::new(Variant::Classic);
        game.set_state_for_test(stuck_black());

        assert!(!game.has_legal_moves_for_current());
        assert_eq!(game.place(0, 2, false), Err(GameError::MustPass(Player::Black)));
        assert_eq!(game.advance(), Phase::TurnPassed);

        assert_eq!(game.current_player(), Player::White);
        assert!(game.is_pass);
        assert!(game.flipped.is_empty());
        assert!(!game.is_game_over());
        assert!(game.has_legal_moves_for_current());
        assert_eq!(game.pass(), Err(GameError::CannotPass(Player::White)));
    }

    #[test]
    fn t04_both_passes_end_game() {
        let mut game = GameInstance::new(Variant::Classic);
        let board = Board::from_rows([
            "b......w",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "w......b",
        ]);
        game.set_state_for_test(GameState::from_board(Variant::Classic, board, Player::Black));

        assert_eq!(game.advance(), Phase::Ended);
        assert!(game.is_game_over());
        assert_eq!(game.place(1, 1, false), Err(GameError::GameOver));
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn t05_last_move_ends_game() {
        let mut game = GameInstance::new(Variant::Classic).with_ai(
            Player::White,
            Box::new(FixedMoveSelector {
                mv: Move::plain(0, 2),
            }),
        );
        game.set_state_for_test(stuck_black().switch_turn());

        let mv = game.do_ai_move().unwrap();
        let state = game.to_snapshot();

        assert_eq!(mv, Move::plain(0, 2));
        assert!(state.is_game_over);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 3);
        assert_eq!(state.flipped, vec![1]);
        assert_eq!(game.to_finish_summary().winner, crate::types::Winner::White);
    }

    #[test]
    fn ai_seat_rejects_caller_moves_and_illegal_picks() {
        let mut game = GameInstance::new(Variant::Classic).with_ai(
            Player::Black,
            Box::new(FixedMoveSelector {
                mv: Move::plain(0, 0),
            }),
        );

        assert_eq!(
            game.place(2, 4, false),
            Err(GameError::NotYourTurn(Player::Black))
        );
        assert!(matches!(
            game.do_ai_move(),
            Err(GameError::IllegalMove(InvalidMove::NoCapturingLine { .. }))
        ));
        assert_eq!(game.current_player(), Player::Black);
    }

    #[test]
    fn advance_leaves_a_playable_turn_alone() {
        let mut game = GameInstance::new(Variant::King);
        let before = game.to_snapshot();

        assert_eq!(game.advance(), Phase::InProgress);
        assert_eq!(game.to_snapshot(), before);
        assert_eq!(game.pass(), Err(GameError::CannotPass(Player::Black)));
    }

    #[test]
    fn explicit_pass_matches_advance() {
        let mut passed = GameInstance::new(Variant::Classic);
        passed.set_state_for_test(stuck_black());
        let mut advanced = GameInstance::new(Variant::Classic);
        advanced.set_state_for_test(stuck_black());

        passed.pass().unwrap();

        assert_eq!(advanced.advance(), Phase::TurnPassed);
        assert_eq!(passed.to_snapshot(), advanced.to_snapshot());
    }

    #[test]
    fn human_seat_cannot_request_ai_move() {
        let mut game = GameInstance::new(Variant::Classic);

        assert_eq!(game.do_ai_move(), Err(GameError::NotYourTurn(Player::Black)));
    }

    #[test]
    fn reset_restores_opening() {
        let mut game = GameInstance::new(Variant::King);
        game.place(2, 4, false).unwrap();

        game.reset();

        assert_eq!(game.state(), &GameState::new(Variant::King));
        assert_eq!(game.phase(), Phase::InProgress);
    }
}
