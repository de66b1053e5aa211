//! Browser entry point
//!
//! The page owns the canvas and the animation loop; it forwards
//! `requestAnimationFrame` timestamps, key names and clicks here and reads
//! the world back through [`WebGame::snapshot_json`] to draw it.

use wasm_bindgen::prelude::*;

use crate::Game;
use crate::audio::WebAudio;
use crate::highscores::LocalStorageStore;
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }
    log::info!("Asteroid Smash (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = rand::random::<u64>();
        let audio = WebAudio::new(settings.sfx_gain());
        let game = Game::new(
            seed,
            &settings,
            Box::new(audio),
            Box::new(LocalStorageStore),
        );
        WebGame { game }
    }

    /// Advance to the `requestAnimationFrame` timestamp
    pub fn frame(&mut self, now_ms: f64) {
        self.game.frame(now_ms);
    }

    pub fn key_down(&mut self, key: &str) {
        self.game.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.game.key_up(key);
    }

    pub fn blur(&mut self) {
        self.game.release_keys();
    }

    pub fn click(&mut self) -> bool {
        self.game.click()
    }

    pub fn start(&mut self) -> bool {
        self.game.start()
    }

    pub fn restart(&mut self) -> bool {
        self.game.restart()
    }

    pub fn menu(&mut self) -> bool {
        self.game.return_to_menu()
    }

    /// Accept the extra-life offer; returns the question as JSON
    pub fn accept_offer(&mut self) -> Option<String> {
        let question = self.game.accept_offer()?;
        serde_json::to_string(question).ok()
    }

    /// Answer the quiz; returns the feedback line
    pub fn answer(&mut self, choice: usize) -> Option<String> {
        self.game.answer(choice).map(|result| result.feedback)
    }

    /// Whole world state as JSON for the renderer
    pub fn snapshot_json(&self) -> String {
        match serde_json::to_string(self.game.state()) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("snapshot failed: {e}");
                String::from("{}")
            }
        }
    }

    pub fn current_fact(&self) -> Option<String> {
        self.game.facts().current().map(str::to_string)
    }

    pub fn fact_opacity(&self) -> f32 {
        self.game.facts().opacity()
    }

    /// Current score is a new high score
    pub fn is_new_best(&self) -> bool {
        self.game.is_new_best()
    }

    /// Whole seconds left to accept the extra-life offer
    pub fn offer_seconds_left(&self) -> Option<u32> {
        self.game.offer_seconds_left()
    }

    pub fn invincibility_seconds_left(&self) -> Option<u32> {
        self.game.invincibility_seconds_left()
    }

    pub fn toggle_mute(&mut self) {
        self.game.toggle_mute();
    }

    pub fn is_muted(&self) -> bool {
        self.game.is_muted()
    }

    /// Terrain classification for the renderer's dot grid
    pub fn is_land(&self, x: i32, y: i32) -> bool {
        self.game.state().terrain.is_land(x, y)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
