//! Frame driver
//!
//! [`Game`] owns the simulation and its collaborators. Each frame it turns the
//! wall-clock delta into a [`tick`], then routes the step's [`GameEvent`]s to
//! the audio sink and the score store. Collaborator failures are logged and
//! never reach the simulation.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioSink, SoundEffect};
use crate::facts::FactRotation;
use crate::highscores::ScoreStore;
use crate::platform::{Command, InputState};
use crate::quiz::{self, QuizQuestion};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RunPhase, TickInput, click_fire, tick};
use crate::{secs_to_ms, whole_seconds_left};

/// Outcome of a quiz answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: bool,
    /// Line to show the player
    pub feedback: String,
}

pub struct Game {
    state: GameState,
    audio: Box<dyn AudioSink>,
    store: Box<dyn ScoreStore>,
    settings: Settings,
    input: InputState,
    facts: FactRotation,
    /// Keeps fact rotation off the simulation's RNG stream
    facts_rng: Pcg32,
    last_frame_ms: Option<f64>,
}

impl Game {
    pub fn new(
        seed: u64,
        settings: &Settings,
        audio: Box<dyn AudioSink>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let mut game = Self {
            state: GameState::new(seed),
            audio,
            store,
            settings: settings.clone(),
            input: InputState::default(),
            facts: FactRotation::default(),
            facts_rng: Pcg32::seed_from_u64(seed.rotate_left(32)),
            last_frame_ms: None,
        };

        game.state.best_score = match game.store.load_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not load best score, starting from 0: {e:#}");
                0
            }
        };
        game.apply_settings(settings);
        game.update_facts(0.0);
        log::info!("Game ready (seed {seed}, best {})", game.state.best_score);
        game
    }

    /// Apply particle, starfield and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.max_particles = settings.particle_cap();
        let starfield = settings.starfield_on();
        if starfield != self.state.starfield {
            self.state.starfield = starfield;
            self.state.init_stars();
        }
        self.audio.set_muted(settings.muted);
        self.settings = settings.clone();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance by the wall-clock time since the previous frame
    pub fn frame(&mut self, now_ms: f64) {
        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        let input = self.input.to_tick_input();
        self.step(&input, dt);
    }

    /// Advance by `dt` seconds with explicit intents (headless driving)
    pub fn step(&mut self, input: &TickInput, dt: f32) {
        tick(&mut self.state, input, dt);
        self.dispatch_events();
        self.update_facts(dt);
    }

    pub fn key_down(&mut self, key: &str) {
        self.audio.resume();
        let Some(command) = self.input.key_down(key) else {
            return;
        };
        match command {
            Command::Restart => {
                self.restart();
            }
            Command::Menu => {
                self.return_to_menu();
            }
            Command::ToggleMute => self.toggle_mute(),
        }
    }

    /// Flip mute and remember the choice
    pub fn toggle_mute(&mut self) {
        let muted = self.audio.toggle_mute();
        self.settings.muted = muted;
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        self.save_settings();
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Drop held keys (focus lost)
    pub fn release_keys(&mut self) {
        self.input.clear();
    }

    /// Pointer click: one shot if the cooldown allows
    pub fn click(&mut self) -> bool {
        self.audio.resume();
        let fired = click_fire(&mut self.state);
        self.dispatch_events();
        fired
    }

    pub fn start(&mut self) -> bool {
        let started = self.state.start_run();
        self.after_transition();
        started
    }

    pub fn restart(&mut self) -> bool {
        let restarted = self.state.restart();
        self.after_transition();
        restarted
    }

    pub fn return_to_menu(&mut self) -> bool {
        let left = self.state.return_to_menu();
        if left {
            // Menu rotation starts over
            self.facts.stop();
        }
        self.after_transition();
        left
    }

    /// Take the extra-life offer, drawing a random question
    pub fn accept_offer(&mut self) -> Option<&'static QuizQuestion> {
        if !matches!(self.state.phase, RunPhase::GameOverPending { .. }) {
            return None;
        }
        let index = quiz::pick_question(self.state.rng());
        if !self.state.accept_offer(index) {
            return None;
        }
        quiz::question(index)
    }

    /// The question being answered, if the quiz is open
    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        match self.state.phase {
            RunPhase::QuizActive { question } => quiz::question(question),
            _ => None,
        }
    }

    /// Answer the open question; `None` when no quiz is active
    pub fn answer(&mut self, choice: usize) -> Option<QuizResult> {
        let question = self.current_question()?;
        let correct = question.is_correct(choice);
        let feedback = question.feedback(choice, self.state.rng());
        self.state.answer_quiz(correct);
        self.after_transition();
        Some(QuizResult { correct, feedback })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct world access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn facts(&self) -> &FactRotation {
        &self.facts
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// Score beats every earlier run
    pub fn is_new_best(&self) -> bool {
        self.state.is_new_best()
    }

    pub fn offer_seconds_left(&self) -> Option<u32> {
        self.state.offer_seconds_left()
    }

    /// Whole seconds of invincibility left, while active
    pub fn invincibility_seconds_left(&self) -> Option<u32> {
        let inv = &self.state.invincibility;
        inv.active.then(|| whole_seconds_left(inv.remaining()))
    }

    fn after_transition(&mut self) {
        self.dispatch_events();
        self.update_facts(0.0);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            let effect = match event {
                GameEvent::Shot => Some(SoundEffect::Shot),
                GameEvent::HazardDestroyed { .. } => Some(SoundEffect::Hit),
                GameEvent::TerrainImpact { .. } => Some(SoundEffect::Explosion),
                GameEvent::NewBest { score } => {
                    if let Err(e) = self.store.save_best(score) {
                        log::warn!("Could not save best score {score}: {e:#}");
                    }
                    None
                }
                other => {
                    log::debug!("{other:?}");
                    None
                }
            };
            if let Some(effect) = effect {
                if let Err(e) = self.audio.play(effect) {
                    log::warn!("Sound {effect:?} failed: {e:#}");
                }
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn save_settings(&self) {
        if let Err(e) = self.settings.save() {
            log::warn!("Could not save settings: {e:#}");
        }
    }

    /// Native callers persist settings themselves
    #[cfg(not(target_arch = "wasm32"))]
    fn save_settings(&self) {}

    /// Facts rotate on the menu and the final game-over screen
    fn update_facts(&mut self, dt: f32) {
        let show = matches!(self.state.phase, RunPhase::Menu | RunPhase::GameOverFinal);
        if show && !self.facts.is_running() {
            self.facts.start(&mut self.facts_rng);
        } else if !show && self.facts.is_running() {
            self.facts.stop();
        }
        self.facts.update(secs_to_ms(dt), &mut self.facts_rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::highscores::MemoryStore;
    use crate::sim::Hazard;
    use anyhow::anyhow;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct AudioLog {
        played: Vec<SoundEffect>,
        resumes: usize,
    }

    /// Sink that shares what it heard with the test
    struct RecordingAudio {
        muted: bool,
        log: Rc<RefCell<AudioLog>>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) -> anyhow::Result<()> {
            if !self.muted {
                self.log.borrow_mut().played.push(effect);
            }
            Ok(())
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn is_muted(&self) -> bool {
            self.muted
        }
        fn resume(&mut self) {
            self.log.borrow_mut().resumes += 1;
        }
    }

    struct BrokenAudio;

    impl AudioSink for BrokenAudio {
        fn play(&mut self, _effect: SoundEffect) -> anyhow::Result<()> {
            Err(anyhow!("no audio device"))
        }
        fn set_muted(&mut self, _muted: bool) {}
        fn is_muted(&self) -> bool {
            false
        }
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load_best(&mut self) -> anyhow::Result<u64> {
            Err(anyhow!("storage disabled"))
        }
        fn save_best(&mut self, _score: u64) -> anyhow::Result<()> {
            Err(anyhow!("storage disabled"))
        }
    }

    fn game() -> Game {
        Game::new(
            7,
            &Settings::default(),
            Box::new(SilentAudio::default()),
            Box::new(MemoryStore {
                best: 40,
                saves: 0,
            }),
        )
    }

    /// Drop a hazard right onto the terrain line
    fn doom(game: &mut Game) {
        game.state.hazards.clear();
        game.state.invincibility.active = false;
        game.state.hazards.push(Hazard {
            pos: Vec2::new(30.0, 160.0),
            radius: 6.0,
            speed: 20.0,
            angle: 0.0,
            rot_speed: 0.0,
        });
        game.step(&TickInput::default(), 0.016);
    }

    fn lose_all_hearts(game: &mut Game) {
        while game.state.phase == RunPhase::Playing {
            doom(game);
        }
    }

    #[test]
    fn test_new_loads_best_score() {
        let game = game();
        assert_eq!(game.state().best_score, 40);
        assert_eq!(game.state().phase, RunPhase::Menu);
    }

    #[test]
    fn test_failing_collaborators_are_tolerated() {
        let mut game = Game::new(
            1,
            &Settings::default(),
            Box::new(BrokenAudio),
            Box::new(BrokenStore),
        );
        assert_eq!(game.state().best_score, 0);
        assert!(game.start());
        assert!(game.click());
        game.state.score = 99;
        lose_all_hearts(&mut game);
        assert!(game.state().phase.is_game_over());
        assert_eq!(game.state().best_score, 99);
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut game = game();
        game.start();
        let x = game.state().player.pos.x;
        game.key_down("ArrowLeft");
        game.frame(1000.0);
        assert_eq!(game.state().player.pos.x, x);
        game.frame(1016.0);
        assert!(game.state().player.pos.x < x);
        game.key_up("arrowleft");
    }

    #[test]
    fn test_keyboard_commands() {
        let mut game = game();
        game.start();
        game.key_down("m");
        assert!(game.is_muted());
        game.key_down("M");
        assert!(!game.is_muted());

        // Restart does nothing mid-run
        game.key_down("r");
        assert_eq!(game.state().phase, RunPhase::Playing);

        lose_all_hearts(&mut game);
        game.key_down("e");
        assert_eq!(game.state().phase, RunPhase::Menu);
    }

    #[test]
    fn test_correct_answer_restores_a_heart() {
        let mut game = game();
        game.start();
        lose_all_hearts(&mut game);
        assert_eq!(game.state().hearts, 0);

        let question = *game.accept_offer().expect("offer open");
        assert_eq!(game.current_question(), Some(&question));
        let result = game.answer(question.correct).expect("quiz open");
        assert!(result.correct);
        assert_eq!(game.state().hearts, 1);
        assert_eq!(game.state().phase, RunPhase::Playing);
        assert_eq!(game.invincibility_seconds_left(), Some(5));
    }

    #[test]
    fn test_wrong_answer_ends_run_and_starts_facts() {
        let mut game = game();
        game.start();
        game.state.score = 120;
        lose_all_hearts(&mut game);

        let question = *game.accept_offer().expect("offer open");
        let result = game.answer(question.correct + 1).expect("quiz open");
        assert!(!result.correct);
        assert!(result.feedback.contains(question.correct_answer()));
        assert_eq!(game.state().phase, RunPhase::GameOverFinal);
        assert_eq!(game.state().best_score, 120);
        assert!(game.facts().current().is_some());

        assert!(game.restart());
        assert!(game.facts().current().is_none());
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_answer_without_quiz_is_ignored() {
        let mut game = game();
        assert!(game.answer(0).is_none());
        assert!(game.accept_offer().is_none());
    }

    #[test]
    fn test_expired_offer_rejects_accept() {
        let mut game = game();
        game.start();
        lose_all_hearts(&mut game);
        for _ in 0..120 {
            game.step(&TickInput::default(), 0.05);
        }
        assert_eq!(game.state().phase, RunPhase::GameOverFinal);
        assert!(game.accept_offer().is_none());
    }

    #[test]
    fn test_starting_muted_can_unmute() {
        let log = Rc::new(RefCell::new(AudioLog::default()));
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let audio = RecordingAudio {
            muted: false,
            log: Rc::clone(&log),
        };
        let mut game = Game::new(3, &settings, Box::new(audio), Box::new(MemoryStore::default()));
        assert!(game.is_muted());

        game.key_down("m");
        assert!(!game.is_muted());
        assert!(!game.settings().muted);

        game.start();
        assert!(game.click());
        assert_eq!(log.borrow().played, vec![SoundEffect::Shot]);
        // Both gestures wake the output
        assert_eq!(log.borrow().resumes, 2);
    }

    #[test]
    fn test_facts_rotate_on_menu() {
        let mut game = game();
        assert!(game.facts().current().is_some());

        game.start();
        assert!(game.facts().current().is_none());

        lose_all_hearts(&mut game);
        assert!(game.facts().current().is_none());
        assert!(game.return_to_menu());
        assert!(game.facts().current().is_some());
        assert_eq!(game.facts().opacity(), 0.0);
    }

    #[test]
    fn test_facts_leave_simulation_rng_alone() {
        let mut idle = game();
        let mut waited = game();
        for _ in 0..600 {
            waited.step(&TickInput::default(), 0.05);
        }
        idle.start();
        waited.start();
        assert_eq!(idle.state().terrain, waited.state().terrain);
    }

    #[test]
    fn test_hud_values() {
        let mut game = game();
        game.start();
        assert_eq!(game.offer_seconds_left(), None);
        game.state.score = 120;
        lose_all_hearts(&mut game);

        assert!(game.is_new_best());
        assert_eq!(game.offer_seconds_left(), Some(5));
        for _ in 0..24 {
            game.step(&TickInput::default(), 0.05);
        }
        assert_eq!(game.offer_seconds_left(), Some(4));
    }
}
