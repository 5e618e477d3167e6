use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, trace};
use web_time::{Duration, Instant};

use crate::ai::eval::{EvalFn, EvalStrategy};
use crate::ai::policy;
use crate::state::GameState;
use crate::types::{Move, Player};

pub const MIN_SCORE: i32 = i32::MIN;
pub const MAX_SCORE: i32 = i32::MAX;

/// A root candidate and the minimax value of the position it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Depth-limited minimax with alpha-beta pruning. Black maximises, white minimises.
///
/// Every node works on its own copy of the state; the caller's state is only read.
pub struct Searcher {
    strategy: EvalStrategy,
    eval: EvalFn,
    nodes: u64,
}

impl Searcher {
    pub fn new(strategy: EvalStrategy) -> Self {
        Self {
            strategy,
            eval: strategy.eval_fn(),
            nodes: 0,
        }
    }

    pub fn strategy(&self) -> EvalStrategy {
        self.strategy
    }

    /// Nodes visited since construction.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Chooses a move for the side to move, or `None` when it has to pass.
    ///
    /// Candidates are shuffled with `rng` before the extreme is taken so that equal
    /// scores do not always resolve to the same square.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        state: &GameState,
        depth: u8,
        rng: &mut R,
    ) -> Option<Move> {
        let player = state.current_player();
        let mut scored = self.score_root(state, depth);
        if scored.is_empty() {
            return None;
        }

        scored.shuffle(rng);
        let choice = policy::choose(&scored, player, state.budget(player).threshold)?;
        debug!(
            %player,
            depth,
            strategy = %self.strategy,
            candidates = scored.len(),
            row = choice.mv.row,
            col = choice.mv.col,
            is_king = choice.mv.is_king,
            score = choice.score,
            "selected move"
        );
        Some(choice.mv)
    }

    /// Runs [`Searcher::select`] at depth 0, 1, ... up to `max_depth`, and stops
    /// deepening once `budget` has elapsed. A started iteration always completes.
    pub fn select_within<R: Rng + ?Sized>(
        &mut self,
        state: &GameState,
        max_depth: u8,
        budget: Duration,
        rng: &mut R,
    ) -> Option<Move> {
        let start = Instant::now();
        let mut best = None;

        for depth in 0..=max_depth {
            if depth > 0 && start.elapsed() >= budget {
                debug!(depth, "search budget spent, keeping previous iteration");
                break;
            }
            best = self.select(state, depth, rng);
            if best.is_none() {
                break;
            }
        }

        best
    }

    /// Scores every legal root move by searching the reply tree to `depth`.
    /// Pruning happens inside each candidate's subtree, never across candidates.
    pub fn score_root(&mut self, state: &GameState, depth: u8) -> Vec<ScoredMove> {
        let rules = state.rules();
        let player = state.current_player();

        rules
            .all_legal_moves(state)
            .into_iter()
            .filter_map(|mv| {
                let child = rules.apply(state, mv).ok()?;
                let score = self.minimax(&child, depth, player.opposite(), MIN_SCORE, MAX_SCORE);
                trace!(row = mv.row, col = mv.col, is_king = mv.is_king, score, "scored root move");
                Some(ScoredMove { mv, score })
            })
            .collect()
    }

    /// Minimax value of `state` with `player` to move.
    ///
    /// A side without moves passes and the pass consumes a ply. When neither side
    /// can move the position is scored immediately.
    pub fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        player: Player,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return (self.eval)(state.board());
        }

        let node = state.with_player(player);
        let rules = node.rules();
        let moves = rules.all_legal_moves(&node);

        if moves.is_empty() {
            let passed = node.switch_turn();
            if !rules.has_legal_move(&passed) {
                return (self.eval)(state.board());
            }
            return self.minimax(&passed, depth - 1, player.opposite(), alpha, beta);
        }

        let mut alpha = alpha;
        let mut beta = beta;

        match player {
            Player::Black => {
                let mut max_eval = MIN_SCORE;
                for mv in moves {
                    let Ok(child) = rules.apply(&node, mv) else {
                        continue;
                    };
                    let eval = self.minimax(&child, depth - 1, Player::White, alpha, beta);
                    max_eval = max_eval.max(eval);
                    alpha = alpha.max(eval);
                    if beta <= alpha {
                        break;
                    }
                }
                max_eval
            }
            Player::White => {
                let mut min_eval = MAX_SCORE;
                for mv in moves {
                    let Ok(child) = rules.apply(&node, mv) else {
                        continue;
                    };
                    let eval = self.minimax(&child, depth - 1, Player::Black, alpha, beta);
                    min_eval = min_eval.min(eval);
                    beta = beta.min(eval);
                    if beta <= alpha {
                        break;
                    }
                }
                min_eval
            }
        }
    }
}
