//! Browser bindings. All values cross the boundary as plain JS objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ai::{MinimaxSelector, MoveSelector};
use crate::config::AiConfig;
use crate::error::{GameError, GameResult};
use crate::game::GameInstance;
use crate::rules::Variant;
use crate::types::Move;

#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
    /// Kept across calls so its generator keeps advancing; rebuilt when the config changes.
    ai: Option<MinimaxSelector>,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(king_variant: bool) -> WasmGame {
        let variant = if king_variant {
            Variant::King
        } else {
            Variant::Classic
        };
        WasmGame {
            inner: GameInstance::new(variant),
            ai: None,
        }
    }

    /// Current snapshot, see `GameSnapshot`.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_snapshot())
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves())
    }

    pub fn place(&mut self, row: u8, col: u8, is_king: bool) -> Result<JsValue, JsValue> {
        self.inner.place(row, col, is_king).map_err(to_js_error)?;
        self.state()
    }

    /// Passes or ends the game when the side to move is stuck. Returns the phase.
    pub fn advance(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.advance())
    }

    /// Plays a computer move for the side to move. `config` is an `AiConfig`
    /// object; `undefined` uses the variant's defaults.
    pub fn ai_move(&mut self, config: JsValue) -> Result<JsValue, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            AiConfig::for_variant(self.inner.state().variant())
        } else {
            serde_wasm_bindgen::from_value::<AiConfig>(config)?
        }
        .validate()
        .map_err(to_js_error)?;

        let mv = self.play_ai(config).map_err(to_js_error)?;
        to_js(&mv)
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_finish_summary())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl WasmGame {
    fn selector_for(&mut self, config: AiConfig) -> &mut MinimaxSelector {
        if self.ai.as_ref().is_none_or(|ai| *ai.config() != config) {
            self.ai = Some(MinimaxSelector::new(config));
        }
        self.ai.get_or_insert_with(|| MinimaxSelector::new(config))
    }

    fn play_ai(&mut self, config: AiConfig) -> GameResult<Move> {
        if self.inner.is_game_over() {
            return Err(GameError::GameOver);
        }
        let player = self.inner.current_player();
        if !self.inner.has_legal_moves_for_current() {
            return Err(GameError::MustPass(player));
        }
        let state = self.inner.state().clone();
        let mv = self
            .selector_for(config)
            .select_move(&state)
            .ok_or(GameError::NoMoveSelected(player))?;
        self.inner.place(mv.row, mv.col, mv.is_king)?;
        Ok(mv)
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(Into::into)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
