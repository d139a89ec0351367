//! Ship XB11 - a 2D arcade shooter runtime core
//!
//! Core modules:
//! - `sim`: Simulation (sprites, crafts, collisions, per-frame step)
//! - `renderer`: Render step, explosion gate and pause overlays
//! - `game`: Fixed-rate loop, input dispatch, pause/resume/restart
//! - `platform`: Capability traits for drawing, input, audio and time
//! - `assets`: One-time loading of frame sheets and cached text
//! - `score`: Score, high score and the rolling odometer display
//! - `settings`: Runtime configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use error::{GameError, PlatformError};
pub use game::{Game, LoopControl, SessionSummary};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    pub const GAME_TITLE: &str = "Ship XB11";

    /// Fixed window size
    pub const WIDTH: u32 = 600;
    pub const HEIGHT: u32 = 800;
    /// Nominal frame rate
    pub const FPS: u32 = 60;

    /// Alien grid dimensions: types x slots per type
    pub const ALIEN_TYPES: usize = 4;
    pub const ALIEN_POPULATION: usize = 10;

    /// The divider line under the HUD; player missiles vanish above it
    pub const LINE_Y: f32 = 70.0;
    pub const LINE_X: f32 = 50.0;

    /// Lives
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 6;

    /// Score awards
    pub const ALIEN_POINTS: u32 = 20;
    pub const ASTEROID_POINTS: u32 = 20;
    pub const BIG_BLUE_POINTS: u32 = 100;

    /// Vertical band aliens patrol once every type is unlocked
    pub const ALIEN_MIN_Y: f32 = 72.0;
    pub const ALIEN_MAX_Y: f32 = 600.0;

    /// Missile speeds (units per frame)
    pub const PLAYER_MISSILE_SPEED: f32 = 5.0;
    pub const ENEMY_MISSILE_SPEED: f32 = 2.0;

    /// Big-blue drift per frame and the hit-animation timeout
    pub const BIG_BLUE_DX: f32 = -2.0;
    pub const BIG_BLUE_HIT_TIMEOUT: u32 = 500;
    /// Vertical offset of big-blue's missile from its top edge
    pub const BIG_BLUE_MISSILE_DROP: f32 = 101.0;

    /// Muzzle offsets cycled through by successive player shots
    pub const LAUNCHER_X: [f32; 4] = [3.0, 9.0, 22.0, 28.0];

    /// Random gates: `random_range(0..1024) < level` fires a missile,
    /// `random_range(0..8192) > threshold` spawns
    pub const MISSILE_ODDS_RANGE: u32 = 1024;
    pub const SPAWN_ODDS_RANGE: u32 = 8192;
    pub const BIG_BLUE_SPAWN_THRESHOLD: u32 = 8189;
    pub const ASTEROID_SPAWN_THRESHOLD: u32 = 8182;
    pub const ALIEN_DIVE_THRESHOLD: u32 = 8189;

    /// Digits in each score strip
    pub const SCORE_DIGITS: usize = 7;
}
