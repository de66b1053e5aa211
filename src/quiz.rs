//! Extra-life quiz questions
//!
//! After the last heart is lost the player may answer one space question; a
//! correct answer buys a heart and a short invincibility window.

use rand::Rng;
use serde::Serialize;

/// A four-choice question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub answers: [&'static str; 4],
    /// Index into `answers`
    pub correct: usize,
}

impl QuizQuestion {
    /// Out-of-range choices are simply wrong
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }

    pub fn correct_answer(&self) -> &'static str {
        self.answers[self.correct]
    }

    /// Feedback line shown after answering
    pub fn feedback<R: Rng + ?Sized>(&self, choice: usize, rng: &mut R) -> String {
        if self.is_correct(choice) {
            ENCOURAGEMENTS[rng.random_range(0..ENCOURAGEMENTS.len())].to_string()
        } else {
            format!("Not quite! The correct answer was: {}", self.correct_answer())
        }
    }
}

const fn q(question: &'static str, answers: [&'static str; 4], correct: usize) -> QuizQuestion {
    QuizQuestion {
        question,
        answers,
        correct,
    }
}

pub const QUESTIONS: [QuizQuestion; 20] = [
    q("What is the largest planet in our solar system?", ["Jupiter", "Saturn", "Earth", "Mars"], 0),
    q("How many planets are in our solar system?", ["7", "8", "9", "10"], 1),
    q("What is the closest star to Earth?", ["Alpha Centauri", "Sirius", "The Sun", "Polaris"], 2),
    q("Which planet is known as the 'Red Planet'?", ["Venus", "Mars", "Jupiter", "Mercury"], 1),
    q("What is the name of Earth's natural satellite?", ["Luna (The Moon)", "Titan", "Europa", "Phobos"], 0),
    q("Which planet has the most moons?", ["Jupiter", "Saturn", "Mars", "Neptune"], 1),
    q("What is the hottest planet in our solar system?", ["Mercury", "Venus", "Mars", "Jupiter"], 1),
    q("What do we call a group of stars that form a pattern?", ["Galaxy", "Constellation", "Nebula", "Comet"], 1),
    q("How long does it take Earth to orbit the Sun?", ["24 hours", "30 days", "365 days", "12 months exactly"], 2),
    q("What is a shooting star actually?", ["A falling star", "A meteor", "A comet", "A satellite"], 1),
    q("Which planet is famous for its beautiful rings?", ["Jupiter", "Uranus", "Saturn", "Neptune"], 2),
    q("What is the galaxy that contains our solar system?", ["Andromeda", "Milky Way", "Whirlpool", "Sombrero"], 1),
    q("What is the smallest planet in our solar system?", ["Mars", "Mercury", "Venus", "Pluto"], 1),
    q("What causes the seasons on Earth?", ["Distance from Sun", "Earth's tilt", "Solar flares", "Moon phases"], 1),
    q("What is the name of the first human to walk on the Moon?", ["Buzz Aldrin", "Neil Armstrong", "Yuri Gagarin", "John Glenn"], 1),
    q("Which planet spins on its side?", ["Saturn", "Neptune", "Uranus", "Jupiter"], 2),
    q("What do we call the path a planet takes around the Sun?", ["Rotation", "Orbit", "Revolution", "Axis"], 1),
    q("What is the Great Red Spot on Jupiter?", ["A crater", "A giant storm", "A mountain", "A volcano"], 1),
    q("How many Earth days does it take the Moon to orbit Earth?", ["7 days", "14 days", "27-28 days", "30 days"], 2),
    q("What is the center of our solar system?", ["Earth", "Jupiter", "The Sun", "The Moon"], 2),
];

const ENCOURAGEMENTS: [&str; 5] = [
    "Excellent! You earned an extra heart!",
    "Nice work! +1 Heart!",
    "Great job! Extra life earned!",
    "Well done! You got it right!",
    "Awesome! +1 Heart!",
];

/// Pick a question index uniformly
pub fn pick_question<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.random_range(0..QUESTIONS.len())
}

/// Look up a question by index
pub fn question(index: usize) -> Option<&'static QuizQuestion> {
    QUESTIONS.get(index)
}
