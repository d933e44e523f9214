//! Lane Runner - a three-lane arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, spawning, combat, difficulty)
//! - `game`: Host-side session wrapper (input dispatch, frame stepping, high score)
//! - `renderer`: Draw-list generation for whatever backend presents frames
//! - `platform`: Input events and the fixed-step frame clock
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Lane-dodging bot used by the headless runner

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play area dimensions (base canvas, before display scaling)
    pub const WINDOW_WIDTH: f32 = 480.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;
    pub const WINDOW_TITLE: &str = "3-Lane Runner";

    /// Number of parallel lanes
    pub const LANE_COUNT: usize = 3;

    /// Default high score file name
    pub const HIGHSCORE_FILE: &str = "highscore.json";
}

/// RGB color triple
pub type Color = [u8; 3];
