pub mod confetti;
pub mod fireworks;
pub mod gender;
pub mod headful;
pub mod playtest;
pub mod puzzle_core;
pub mod reveal;
pub mod rng;
pub mod serde_duration;
pub mod settings;
pub mod sfx;
pub mod stage;
pub mod state;
pub mod ui;
