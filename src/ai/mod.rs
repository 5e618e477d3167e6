pub mod eval;
pub mod policy;
pub mod search;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use web_time::Duration;

use crate::config::AiConfig;
use crate::state::GameState;
use crate::types::Move;

use self::eval::EvalStrategy;
use self::search::Searcher;

/// Chooses a move for the side to move in `state`; `None` means it must pass.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, state: &GameState) -> Option<Move>;
}

/// One-shot AI move: minimax to `depth` with `strategy`, ties broken by a generator
/// seeded with `seed`. Identical arguments always give the same move.
pub fn ai_select_move(
    state: &GameState,
    depth: u8,
    strategy: EvalStrategy,
    seed: u64,
) -> Option<Move> {
    let mut rng = StdRng::seed_from_u64(seed);
    Searcher::new(strategy).select(state, depth, &mut rng)
}

/// Minimax player. The generator is seeded once and advances with every move.
pub struct MinimaxSelector {
    config: AiConfig,
    rng: StdRng,
}

impl MinimaxSelector {
    pub fn new(config: AiConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        let mut searcher = Searcher::new(self.config.strategy);
        match self.config.time_budget_ms {
            Some(ms) => searcher.select_within(
                state,
                self.config.depth,
                Duration::from_millis(ms),
                &mut self.rng,
            ),
            None => searcher.select(state, self.config.depth, &mut self.rng),
        }
    }
}

/// Uniformly random legal move.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveSelector for RandomSelector {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        state.legal_moves().choose(&mut self.rng).copied()
    }
}
