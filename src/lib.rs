use wasm_bindgen::prelude::*;

pub mod ai;
pub mod arena;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod state;
pub mod types;
pub mod wasm;

pub use ai::ai_select_move;
pub use ai::eval::EvalStrategy;
pub use error::{GameError, InvalidMove};
pub use rules::{Rules, Variant};
pub use state::GameState;
pub use types::{Cell, FinishSummary, Move, Player, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
