//! Browser host binding
//!
//! The page owns the `requestAnimationFrame` loop, the canvas and the input
//! listeners; it calls `tick` once per frame and `flap` on each key-down or
//! touch-start edge, then draws from the accessors.

use wasm_bindgen::prelude::*;

use crate::config::{SimConfig, Variant};
use crate::sim::{GamePhase, Simulation};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Swifty Duck core loaded");
}

#[wasm_bindgen]
pub struct WebSession {
    sim: Simulation,
    /// Final score of the most recently ended run
    last_score: u32,
}

impl WebSession {
    fn from_config(config: SimConfig, seed: Option<u64>) -> Result<WebSession, JsValue> {
        let seed = seed.unwrap_or_else(rand::random);
        let sim = Simulation::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Session created with seed: {}", seed);
        Ok(WebSession { sim, last_score: 0 })
    }
}

#[wasm_bindgen]
impl WebSession {
    /// New start-screen session sized to the canvas; a missing seed is drawn
    /// from the browser's entropy source
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<u64>) -> Result<WebSession, JsValue> {
        let config = SimConfig {
            width,
            height,
            ..SimConfig::for_variant(Variant::StartScreen)
        };
        Self::from_config(config, seed)
    }

    /// New session from a JSON config
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, seed: Option<u64>) -> Result<WebSession, JsValue> {
        let config = SimConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::from_config(config, seed)
    }

    /// Advance one frame; true means the run just ended (see `lastScore`)
    pub fn tick(&mut self) -> bool {
        let result = self.sim.tick();
        if result.collided {
            self.last_score = result.score;
        }
        result.collided
    }

    pub fn flap(&mut self) {
        self.sim.flap();
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    pub fn score(&self) -> u32 {
        self.sim.score()
    }

    #[wasm_bindgen(getter, js_name = lastScore)]
    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    #[wasm_bindgen(getter, js_name = playerY)]
    pub fn player_y(&self) -> f32 {
        self.sim.player().y
    }

    pub fn running(&self) -> bool {
        self.sim.phase() == GamePhase::Running
    }

    /// Full frame state (player, obstacles, score, phase) as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        serde_json::to_string(self.sim.state()).unwrap_or_default()
    }
}
