//! Asteroid Smash entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary runs the game headless with a simple autopilot, which is
//! handy for soak-testing the simulation and the best-score file.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Result, bail};
    use clap::{Parser, ValueEnum};

    use asteroid_smash::audio::SilentAudio;
    use asteroid_smash::sim::{GameState, RunPhase, TickInput};
    use asteroid_smash::{FileStore, Game, MemoryStore, QualityPreset, ScoreStore, Settings};

    /// How the autopilot treats the extra-life quiz
    #[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
    pub enum QuizPolicy {
        Correct,
        Wrong,
        Ignore,
    }

    #[derive(Parser, Debug)]
    #[command(name = "asteroid-smash")]
    #[command(about = "Run Asteroid Smash headless with an autopilot")]
    pub struct Cli {
        /// Simulation seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Wall-clock seconds to simulate
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,
        /// Frames per second of the simulated display
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// JSON file holding the best score
        #[arg(long)]
        best_file: Option<PathBuf>,
        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Override the settings' quality preset (low, medium, high)
        #[arg(long)]
        quality: Option<QualityPreset>,
        #[arg(long, value_enum, default_value_t = QuizPolicy::Correct)]
        quiz: QuizPolicy,
    }

    /// Steer under the lowest hazard and keep firing
    pub fn autopilot(state: &GameState) -> TickInput {
        let target = state
            .hazards
            .iter()
            .max_by(|a, b| a.leading_edge().total_cmp(&b.leading_edge()));
        let x = state.player.pos.x;
        let (move_left, move_right) = match target {
            Some(hazard) if hazard.pos.x < x - 2.0 => (true, false),
            Some(hazard) if hazard.pos.x > x + 2.0 => (false, true),
            _ => (false, false),
        };
        TickInput {
            move_left,
            move_right,
            shoot: true,
        }
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        if cli.fps == 0 || !cli.seconds.is_finite() || cli.seconds < 0.0 {
            bail!("--fps must be positive and --seconds non-negative");
        }

        let mut settings = match &cli.settings {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        if let Some(preset) = cli.quality {
            settings.set_preset(preset);
        }
        let store: Box<dyn ScoreStore> = match &cli.best_file {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::default()),
        };
        let seed = cli.seed.unwrap_or_else(rand::random);
        log::info!("Asteroid Smash (native) starting, seed {seed}");

        let mut game = Game::new(seed, &settings, Box::new(SilentAudio::default()), store);
        game.start();

        let dt = 1.0 / cli.fps as f32;
        let frames = (cli.seconds * cli.fps as f32).round() as u64;
        let mut runs = 1u32;
        let mut extra_lives = 0u32;
        let mut best_run = 0u64;

        for _ in 0..frames {
            match game.state().phase {
                RunPhase::Playing => {
                    let input = autopilot(game.state());
                    game.step(&input, dt);
                }
                RunPhase::GameOverPending { .. } if cli.quiz != QuizPolicy::Ignore => {
                    if let Some(question) = game.accept_offer() {
                        let choice = match cli.quiz {
                            QuizPolicy::Correct => question.correct,
                            _ => (question.correct + 1) % question.answers.len(),
                        };
                        if let Some(result) = game.answer(choice) {
                            log::info!("Quiz: {}", result.feedback);
                            if result.correct {
                                extra_lives += 1;
                            }
                        }
                    }
                }
                RunPhase::GameOverFinal => {
                    best_run = best_run.max(game.state().score);
                    if let Some(fact) = game.facts().current() {
                        log::debug!("Did you know? {fact}");
                    }
                    game.restart();
                    runs += 1;
                }
                _ => game.step(&TickInput::default(), dt),
            }
        }
        best_run = best_run.max(game.state().score);

        let state = game.state();
        println!("seed:        {seed}");
        println!("runs:        {runs}");
        println!("extra lives: {extra_lives}");
        println!("best run:    {best_run}");
        println!("best score:  {}", state.best_score);
        println!("final phase: {:?}", state.phase);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
