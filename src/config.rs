use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ai::eval::EvalStrategy;
use crate::ai::{MinimaxSelector, MoveSelector, RandomSelector};
use crate::error::ConfigError;
use crate::rules::Variant;

pub const DEFAULT_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 8;

/// Search settings for one minimax player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub depth: u8,
    pub strategy: EvalStrategy,
    pub seed: u64,
    /// When set, deepen iteratively from depth 0 up to `depth` until the budget runs out.
    pub time_budget_ms: Option<u64>,
}

impl AiConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            strategy: EvalStrategy::default_for(variant),
            seed: 0,
            time_budget_ms: None,
        }
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.depth > MAX_DEPTH {
            return Err(ConfigError::DepthTooLarge {
                depth: self.depth,
                max: MAX_DEPTH,
            });
        }
        Ok(self)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Classic)
    }
}

/// How a seat chooses its moves, parsed from `random`, `minimax` or
/// `minimax|<depth>|<eval>`, e.g. `minimax|3|pos_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStrategy {
    Random,
    Minimax {
        depth: u8,
        /// `None` picks the variant's default evaluator.
        strategy: Option<EvalStrategy>,
    },
}

impl PlayerStrategy {
    /// Builds a selector for a game of `variant`, seeding its random source with `seed`.
    pub fn selector(self, variant: Variant, seed: u64) -> Box<dyn MoveSelector> {
        match self {
            PlayerStrategy::Random => Box::new(RandomSelector::new(seed)),
            PlayerStrategy::Minimax { depth, strategy } => {
                let config = AiConfig {
                    depth,
                    strategy: strategy.unwrap_or(EvalStrategy::default_for(variant)),
                    seed,
                    time_budget_ms: None,
                };
                Box::new(MinimaxSelector::new(config))
            }
        }
    }
}

impl FromStr for PlayerStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedStrategy(s.to_string());
        let parts: Vec<&str> = s.trim().split('|').map(str::trim).collect();

        match parts.as_slice() {
            ["random"] => Ok(PlayerStrategy::Random),
            ["minimax"] => Ok(PlayerStrategy::Minimax {
                depth: DEFAULT_DEPTH,
                strategy: None,
            }),
            ["minimax", depth, eval] => {
                let depth: u8 = depth.parse().map_err(|_| malformed())?;
                if depth > MAX_DEPTH {
                    return Err(ConfigError::DepthTooLarge {
                        depth,
                        max: MAX_DEPTH,
                    });
                }
                Ok(PlayerStrategy::Minimax {
                    depth,
                    strategy: Some(eval.parse()?),
                })
            }
            _ => Err(malformed()),
        }
    }
}
