//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names normalized to intents and commands)
//! - The browser entry point (`web`, wasm32 only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Command, InputState, Key};
