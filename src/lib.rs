//! WebAssembly Lights Out engine.
//!
//! The puzzle core (toggle rule, move counting, level sessions) is plain Rust
//! and runs anywhere. On `wasm32` a `LightsOut` class is exported for the host
//! page: it forwards cell clicks and button presses to the session and calls
//! back into JS to draw the board and tick the timer.
//!
//! Grid data crosses the boundary as nested row arrays, `cells[row][col]`,
//! matching the level file format.

pub mod config;
pub mod engine;
pub mod error;
pub mod levels;
pub mod rng;
pub mod session;
pub mod timer;
pub mod types;

pub use config::GameConfig;
pub use engine::{apply_click, toggle, LastClick, MoveCounter};
pub use error::LevelError;
pub use levels::{EmbeddedLevels, LevelSource, MemoryLevels};
pub use session::{select_next_level, LoadOutcome, LoadTicket, Renderer, Session, SessionView};
pub use timer::{Stopwatch, Timer};
pub use types::{CellPos, Grid, Level};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::config::GameConfig;
    use crate::error::LevelError;
    use crate::levels::EmbeddedLevels;
    use crate::rng::WasmRng;
    use crate::session::{select_next_level, LoadOutcome, LoadTicket, Renderer, Session, SessionView};
    use crate::timer::IntervalTimer;
    use crate::types::Level;

    fn to_js_error(err: LevelError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    /// Forwards view models and load failures to JS callbacks.
    struct JsRenderer {
        on_render: js_sys::Function,
        on_error: Option<js_sys::Function>,
    }

    impl Renderer for JsRenderer {
        fn render(&mut self, view: &SessionView) {
            let value = match serde_wasm_bindgen::to_value(view) {
                Ok(value) => value,
                Err(err) => {
                    log::error!("could not serialize view: {}", err);
                    return;
                }
            };
            if let Err(err) = self.on_render.call1(&JsValue::NULL, &value) {
                log::warn!("render callback failed: {:?}", err);
            }
        }

        fn load_failed(&mut self, level_id: &str, err: &LevelError) {
            if let Some(cb) = &self.on_error {
                if let Err(cb_err) = cb.call2(
                    &JsValue::NULL,
                    &JsValue::from_str(level_id),
                    &JsValue::from_str(&err.to_string()),
                ) {
                    log::warn!("error callback failed: {:?}", cb_err);
                }
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
    }

    /// One game on the page.
    ///
    /// `onRender(view)` receives `{ levelId, size, cells, moves, target, elapsedSecs, solved }`
    /// after every state change. `onTick(seconds)` fires on the configured interval.
    /// `onError(levelId, message)` is optional and fires when a load fails.
    #[wasm_bindgen]
    pub struct LightsOut {
        session: Session<JsRenderer, IntervalTimer>,
        config: GameConfig,
        rng: WasmRng,
    }

    #[wasm_bindgen]
    impl LightsOut {
        #[wasm_bindgen(constructor)]
        pub fn new(
            config: JsValue,
            on_render: js_sys::Function,
            on_tick: js_sys::Function,
            on_error: Option<js_sys::Function>,
        ) -> Result<LightsOut, JsValue> {
            let config: GameConfig = if config.is_undefined() || config.is_null() {
                GameConfig::default()
            } else {
                serde_wasm_bindgen::from_value(config)?
            };

            // Fails only if a logger is already installed by an earlier instance.
            let _ = console_log::init_with_level(config.log_level());
            log::info!("Lights Out ready with {} levels", config.levels.len());

            let renderer = JsRenderer { on_render, on_error };
            let timer = IntervalTimer::new(on_tick, config.tick_interval_ms);
            Ok(LightsOut {
                session: Session::new(renderer, timer),
                rng: WasmRng::from_optional_seed(config.seed),
                config,
            })
        }

        /// Cell click. Returns the move count, or `undefined` if ignored.
        pub fn click(&mut self, row: usize, col: usize) -> Option<u32> {
            self.session.click(row, col)
        }

        /// Restart button. Returns false if no level is loaded yet.
        pub fn restart(&mut self) -> bool {
            self.session.restart()
        }

        /// Configured level ids, in order.
        pub fn levels(&self) -> js_sys::Array {
            self.config.levels.iter().map(|id| JsValue::from_str(id)).collect()
        }

        #[wasm_bindgen(js_name = "initialLevel")]
        pub fn initial_level(&self) -> Option<String> {
            self.config.initial_level().map(str::to_string)
        }

        /// New Game button: picks a level other than the current one.
        /// The host fetches it and reports back through `beginLoad`/`finishLoad`.
        #[wasm_bindgen(js_name = "nextLevel")]
        pub fn next_level(&mut self) -> Option<String> {
            let current = self.session.current_level_id();
            select_next_level(&self.config.levels, current, &mut self.rng).map(str::to_string)
        }

        /// Announce a fetch for `level_id`. Returns the ticket to pass back on completion.
        #[wasm_bindgen(js_name = "beginLoad")]
        pub fn begin_load(&mut self, level_id: String) -> u32 {
            self.session.request_load(level_id).raw()
        }

        /// Deliver fetched level text. Returns true if the level is now on screen.
        ///
        /// False when a newer load superseded this one or the text was not a
        /// valid level; the latter has already been reported through `onError`.
        #[wasm_bindgen(js_name = "finishLoad")]
        pub fn finish_load(&mut self, ticket: u32, json: &str) -> bool {
            matches!(
                self.session
                    .complete_load(LoadTicket::from_raw(ticket), Level::from_json(json)),
                Ok(LoadOutcome::Loaded)
            )
        }

        /// Report a failed fetch (network error, HTTP status). The board stays as it was.
        #[wasm_bindgen(js_name = "failLoad")]
        pub fn fail_load(&mut self, ticket: u32, message: String) {
            let _ = self
                .session
                .complete_load(LoadTicket::from_raw(ticket), Err(LevelError::Fetch(message)));
        }

        /// Load one of the levels compiled into the module, skipping the network.
        #[wasm_bindgen(js_name = "loadEmbedded")]
        pub fn load_embedded(&mut self, level_id: &str) -> Result<(), JsValue> {
            self.session
                .load_level(level_id, &EmbeddedLevels)
                .map(|_| ())
                .map_err(to_js_error)
        }

        /// Current view model, or `null` before the first level loads.
        pub fn view(&self) -> Result<JsValue, JsValue> {
            match self.session.view() {
                Some(view) => Ok(serde_wasm_bindgen::to_value(&view)?),
                None => Ok(JsValue::NULL),
            }
        }
    }
}
