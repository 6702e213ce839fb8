//! Bean Platformer - a small single-screen 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entities, scoring, level state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (input)
//! - `tuning`: Level layout and gameplay constants
//! - `ui`: HUD text formatting

pub mod platform;
pub mod records;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use records::BestTime;
pub use settings::{Settings, SettingsError};
pub use tuning::{LevelConfig, PlayerMotion};

/// Game configuration constants (reference configuration)
pub mod consts {
    use glam::Vec2;

    /// Timestep used for the first frame and for headless runs
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta fed into a single tick (backgrounded tabs)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions in pixels
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Downward acceleration, pixels/s² (screen y grows downward)
    pub const GRAVITY: f32 = 1600.0;

    /// Player horizontal displacement (per tick in the reference behavior)
    pub const MOVE_SPEED: f32 = 400.0;
    /// Upward velocity applied on a successful jump
    pub const JUMP_FORCE: f32 = 850.0;
    /// Player box edge length
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player spawn point (top-left corner)
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(120.0, 80.0);
    /// How far below the playfield the player may fall before respawning
    pub const FALL_MARGIN: f32 = 40.0;

    /// Collectible speeds (per axis, pixels/s)
    pub const BALL_SPEED: f32 = 200.0;
    pub const TRIANGLE_SPEED: f32 = 250.0;
    pub const BALL_RADIUS: f32 = 15.0;
    pub const TRIANGLE_SIZE: f32 = 16.0;
    /// Collectibles spawn at least this far from the playfield edges
    pub const SPAWN_MARGIN: f32 = 50.0;

    pub const TOTAL_BALLS: u32 = 5;
    pub const TOTAL_TRIANGLES: u32 = 3;
    pub const TOTAL_COLLECTIBLES: u32 = TOTAL_BALLS + TOTAL_TRIANGLES;

    /// Points awarded per collectible kind
    pub const BALL_POINTS: u32 = 5;
    pub const TRIANGLE_POINTS: u32 = 10;
}

/// Format seconds the way the HUD shows them: one decimal place plus "s"
#[inline]
pub fn format_seconds(secs: f32) -> String {
    format!("{:.1}s", secs)
}
