//! Run life-cycle state machine
//!
//! ```text
//! Menu ──start──▶ Playing ──last heart──▶ GameOverPending ──accept──▶ QuizActive
//!                   ▲                          │ expire                │
//!                   │                          ▼                       │ wrong
//!                   └──────correct answer── GameOverFinal ◀────────────┘
//! ```
//!
//! Restart and return-to-menu are accepted from any game-over phase and
//! replace the phase outright, which also drops any pending offer countdown.
//! Requests that do not apply to the current phase return `false` and leave
//! the state untouched.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Idle, no simulation
    Menu,
    /// Simulation and spawner active
    Playing,
    /// Hearts just hit zero; extra-life offer open for `remaining_ms`
    GameOverPending { remaining_ms: f32 },
    /// Player accepted the offer and is answering question `question`
    QuizActive { question: usize },
    /// Run over; waiting for restart or menu
    GameOverFinal,
}

impl RunPhase {
    /// Any of the three game-over phases
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            RunPhase::GameOverPending { .. } | RunPhase::QuizActive { .. } | RunPhase::GameOverFinal
        )
    }
}

impl GameState {
    /// Menu → Playing with fresh entity stores
    pub fn start_run(&mut self) -> bool {
        if self.phase != RunPhase::Menu {
            return false;
        }
        self.reset_run();
        self.phase = RunPhase::Playing;
        log::info!("Run started (terrain seed {})", self.terrain.seed());
        true
    }

    /// Playing → GameOverPending after the last heart is lost
    pub fn enter_game_over(&mut self) -> bool {
        if self.phase != RunPhase::Playing {
            return false;
        }
        self.record_best();
        self.events.push(GameEvent::GameOver { score: self.score });
        self.phase = RunPhase::GameOverPending {
            remaining_ms: QUIZ_OFFER_MS,
        };
        log::info!("Game over at score {}; extra-life offer open", self.score);
        true
    }

    /// Count the extra-life offer down; expiry ends the run
    pub fn update_offer(&mut self, dt_ms: f32) {
        if let RunPhase::GameOverPending { remaining_ms } = &mut self.phase {
            *remaining_ms -= dt_ms;
            if *remaining_ms <= 0.0 {
                log::info!("Extra-life offer expired");
                self.finish_run();
            }
        }
    }

    /// GameOverPending → QuizActive
    pub fn accept_offer(&mut self, question: usize) -> bool {
        match self.phase {
            RunPhase::GameOverPending { remaining_ms } if remaining_ms > 0.0 => {
                self.phase = RunPhase::QuizActive { question };
                true
            }
            _ => false,
        }
    }

    /// QuizActive → Playing (correct) or GameOverFinal (wrong)
    pub fn answer_quiz(&mut self, correct: bool) -> bool {
        if !matches!(self.phase, RunPhase::QuizActive { .. }) {
            return false;
        }
        if correct {
            self.hearts = (self.hearts + 1).min(MAX_HEARTS);
            self.invincibility.grant();
            self.phase = RunPhase::Playing;
            self.events.push(GameEvent::ExtraLife { hearts: self.hearts });
            log::info!("Extra life granted ({} hearts)", self.hearts);
        } else {
            self.finish_run();
        }
        true
    }

    /// Any game-over phase → Playing with fresh entity stores
    pub fn restart(&mut self) -> bool {
        if !self.phase.is_game_over() {
            return false;
        }
        self.record_best();
        self.reset_run();
        self.phase = RunPhase::Playing;
        log::info!("Run restarted");
        true
    }

    /// Any game-over phase → Menu with fresh entity stores
    pub fn return_to_menu(&mut self) -> bool {
        if !self.phase.is_game_over() {
            return false;
        }
        self.record_best();
        self.reset_run();
        self.phase = RunPhase::Menu;
        log::info!("Returned to menu");
        true
    }

    /// Seconds left on the extra-life offer, if it is open
    pub fn offer_seconds_left(&self) -> Option<u32> {
        match self.phase {
            RunPhase::GameOverPending { remaining_ms } => Some(crate::whole_seconds_left(remaining_ms)),
            _ => None,
        }
    }

    fn finish_run(&mut self) {
        self.record_best();
        self.phase = RunPhase::GameOverFinal;
        self.events.push(GameEvent::RunEnded { score: self.score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_state() -> GameState {
        let mut state = GameState::new(11);
        assert!(state.start_run());
        state.hearts = 0;
        state.score = 40;
        assert!(state.enter_game_over());
        state
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, RunPhase::Menu);
        assert!(state.start_run());
        assert_eq!(state.phase, RunPhase::Playing);
        // Already playing
        assert!(!state.start_run());
    }

    #[test]
    fn test_game_over_opens_offer() {
        let mut state = pending_state();
        assert_eq!(
            state.phase,
            RunPhase::GameOverPending {
                remaining_ms: QUIZ_OFFER_MS
            }
        );
        assert_eq!(state.best_score, 40);
        assert_eq!(state.offer_seconds_left(), Some(5));
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 40 }));
        assert!(events.contains(&GameEvent::NewBest { score: 40 }));
    }

    #[test]
    fn test_offer_expires_to_final() {
        let mut state = pending_state();
        state.update_offer(4_000.0);
        assert_eq!(state.offer_seconds_left(), Some(1));
        state.update_offer(1_000.0);
        assert_eq!(state.phase, RunPhase::GameOverFinal);
        assert!(!state.accept_offer(0));
    }

    #[test]
    fn test_correct_answer_resumes_with_extra_heart() {
        let mut state = pending_state();
        assert!(state.accept_offer(3));
        assert_eq!(state.phase, RunPhase::QuizActive { question: 3 });
        assert!(state.answer_quiz(true));
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.hearts, 1);
        assert!(state.invincibility.active);
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_extra_heart_is_capped() {
        let mut state = pending_state();
        state.hearts = MAX_HEARTS;
        state.accept_offer(0);
        state.answer_quiz(true);
        assert_eq!(state.hearts, MAX_HEARTS);
    }

    #[test]
    fn test_wrong_answer_ends_run() {
        let mut state = pending_state();
        state.accept_offer(0);
        assert!(state.answer_quiz(false));
        assert_eq!(state.phase, RunPhase::GameOverFinal);
        assert!(state.drain_events().contains(&GameEvent::RunEnded { score: 40 }));
    }

    #[test]
    fn test_misuse_is_a_no_op() {
        let mut state = GameState::new(2);
        assert!(!state.restart());
        assert!(!state.return_to_menu());
        assert!(!state.accept_offer(0));
        assert!(!state.answer_quiz(true));
        assert_eq!(state.phase, RunPhase::Menu);

        state.start_run();
        assert!(!state.restart());
        assert_eq!(state.phase, RunPhase::Playing);
    }

    #[test]
    fn test_restart_cancels_pending_offer() {
        let mut state = pending_state();
        assert!(state.restart());
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.hearts, START_HEARTS);
        assert_eq!(state.best_score, 40);
        // The old countdown is gone
        state.update_offer(10_000.0);
        assert_eq!(state.phase, RunPhase::Playing);
    }

    #[test]
    fn test_menu_from_quiz() {
        let mut state = pending_state();
        state.accept_offer(1);
        assert!(state.return_to_menu());
        assert_eq!(state.phase, RunPhase::Menu);
        assert!(!state.answer_quiz(true));
    }
}
