//! Static evaluators. Scores are black minus white: black maximises, white minimises.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{BOARD_SIZE, Board, DIRECTIONS, is_border};
use crate::error::ConfigError;
use crate::rules::{CLASSIC_RULES, Rules, Variant};
use crate::state::GameState;
use crate::types::{Cell, Player};

pub const KING_BONUS: i32 = 10;
pub const KING_BORDER_BONUS: i32 = 75;
pub const KING_IN_LINE_PENALTY: i32 = 100;

#[rustfmt::skip]
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [120, -20,  20,   5,   5,  20, -20, 120],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [120, -20,  20,   5,   5,  20, -20, 120],
];

pub type EvalFn = fn(&Board) -> i32;

/// Named evaluator, chosen once when an AI is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalStrategy {
    PosScore,
    #[serde(alias = "mobi")]
    Mobility,
    #[serde(rename = "pos_mobility", alias = "pos_mobi")]
    PosPlusMobility,
    KingPosScore,
}

const STRATEGIES: [(EvalStrategy, &str, EvalFn); 4] = [
    (EvalStrategy::PosScore, "pos_score", pos_score),
    (EvalStrategy::Mobility, "mobility", mobility),
    (EvalStrategy::PosPlusMobility, "pos_mobility", pos_plus_unit_mobility),
    (EvalStrategy::KingPosScore, "king_pos_score", king_pos_score),
];

impl EvalStrategy {
    pub const ALL: [EvalStrategy; 4] = [
        EvalStrategy::PosScore,
        EvalStrategy::Mobility,
        EvalStrategy::PosPlusMobility,
        EvalStrategy::KingPosScore,
    ];

    /// Default evaluator for AIs playing `variant`.
    pub fn default_for(variant: Variant) -> Self {
        match variant {
            Variant::Classic => EvalStrategy::PosScore,
            Variant::King => EvalStrategy::KingPosScore,
        }
    }

    pub fn eval_fn(self) -> EvalFn {
        STRATEGIES[self as usize].2
    }

    pub fn name(self) -> &'static str {
        STRATEGIES[self as usize].1
    }

    pub fn evaluate(self, board: &Board) -> i32 {
        (self.eval_fn())(board)
    }
}

impl fmt::Display for EvalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvalStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.trim() {
            "mobi" => "mobility",
            "pos_mobi" => "pos_mobility",
            other => other,
        };
        STRATEGIES
            .iter()
            .find(|(_, known, _)| *known == name)
            .map(|(strategy, _, _)| *strategy)
            .ok_or_else(|| ConfigError::UnknownEvaluator(s.to_string()))
    }
}

/// Sum of position weights, black minus white. Kings add [`KING_BONUS`] on top.
pub fn pos_score(board: &Board) -> i32 {
    board
        .iter()
        .map(|(row, col, cell)| {
            let weight = POSITION_WEIGHTS[row][col];
            match cell {
                Cell::Empty => 0,
                Cell::Black => weight,
                Cell::White => -weight,
                Cell::BlackKing => weight + KING_BONUS,
                Cell::WhiteKing => -(weight + KING_BONUS),
            }
        })
        .sum()
}

/// Classic-rule move count for black minus the count for white.
pub fn mobility(board: &Board) -> i32 {
    let count = |player: Player| {
        let state = GameState::from_board(Variant::Classic, *board, player);
        CLASSIC_RULES.all_legal_moves(&state).len() as i32
    };
    count(Player::Black) - count(Player::White)
}

pub fn pos_plus_mobility(board: &Board, multiplier: i32) -> i32 {
    pos_score(board) + multiplier * mobility(board)
}

fn pos_plus_unit_mobility(board: &Board) -> i32 {
    pos_plus_mobility(board, 1)
}

/// [`pos_score`] plus a bonus or penalty for each king. A king counts the weights
/// of its own pieces lined up behind it again, gains a border bonus, and pays a
/// penalty for every line of own pieces that ends on an enemy king.
pub fn king_pos_score(board: &Board) -> i32 {
    let mut score = pos_score(board);
    for (row, col, cell) in board.iter() {
        match cell {
            Cell::BlackKing => score += king_adjustment(board, row, col, Player::Black),
            Cell::WhiteKing => score -= king_adjustment(board, row, col, Player::White),
            _ => {}
        }
    }
    score
}

fn king_adjustment(board: &Board, row: usize, col: usize, player: Player) -> i32 {
    let mut score = 0;
    if is_border(row, col) {
        score += KING_BORDER_BONUS;
    }

    let enemy_king = player.opposite().king();
    for (dr, dc) in DIRECTIONS {
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while let Some(cell) = board.at(r, c) {
            if cell.owner() != Some(player) {
                break;
            }
            score += POSITION_WEIGHTS[r as usize][c as usize];
            r += dr;
            c += dc;
        }
        if board.at(r, c) == Some(enemy_king) {
            score -= KING_IN_LINE_PENALTY;
        }
    }
    score
}
