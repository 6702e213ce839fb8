//! Data-driven level layout and gameplay balance
//!
//! `LevelConfig::default()` is the reference level: an 800×600 playfield,
//! six platforms, two side walls, five balls and three triangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::physics::Rect;

/// How player horizontal input turns into displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMotion {
    /// `move_speed` pixels every tick, regardless of frame time.
    /// Reference behavior: couples player speed to frame rate.
    #[default]
    PerTick,
    /// `move_speed` pixels per second, scaled by the tick's `dt`
    PerSecond,
}

impl PlayerMotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerMotion::PerTick => "per_tick",
            PlayerMotion::PerSecond => "per_second",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per_tick" | "tick" | "frame" => Some(PlayerMotion::PerTick),
            "per_second" | "second" | "time" => Some(PlayerMotion::PerSecond),
            _ => None,
        }
    }

    /// Horizontal displacement for one tick of held input
    pub fn displacement(&self, speed: f32, dt: f32) -> f32 {
        match self {
            PlayerMotion::PerTick => speed,
            PlayerMotion::PerSecond => speed * dt,
        }
    }
}

/// Everything that shapes one level instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,

    pub move_speed: f32,
    pub player_motion: PlayerMotion,
    pub jump_force: f32,
    pub player_spawn: Vec2,
    pub fall_margin: f32,

    pub ball_speed: f32,
    pub triangle_speed: f32,
    pub total_balls: u32,
    pub total_triangles: u32,

    /// Static platforms (top-left x, y, width, height)
    pub platforms: Vec<Rect>,
    /// Static side walls
    pub boundaries: Vec<Rect>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            gravity: GRAVITY,

            move_speed: MOVE_SPEED,
            player_motion: PlayerMotion::PerTick,
            jump_force: JUMP_FORCE,
            player_spawn: PLAYER_SPAWN,
            fall_margin: FALL_MARGIN,

            ball_speed: BALL_SPEED,
            triangle_speed: TRIANGLE_SPEED,
            total_balls: TOTAL_BALLS,
            total_triangles: TOTAL_TRIANGLES,

            platforms: vec![
                Rect::new(400.0, 550.0, 400.0, 20.0),
                Rect::new(300.0, 400.0, 120.0, 20.0),
                Rect::new(600.0, 450.0, 120.0, 20.0),
                Rect::new(100.0, 300.0, 120.0, 20.0),
                Rect::new(400.0, 250.0, 120.0, 20.0),
                Rect::new(200.0, 200.0, 120.0, 20.0),
            ],
            boundaries: vec![
                Rect::new(-10.0, 0.0, 20.0, 600.0),
                Rect::new(790.0, 0.0, 20.0, 600.0),
            ],
        }
    }
}

impl LevelConfig {
    /// Number of collectibles a level starts with
    pub fn total_collectibles(&self) -> u32 {
        self.total_balls + self.total_triangles
    }

    /// Playfield size as a vector (collectible bounds)
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Y coordinate past which the player counts as fallen off the world
    pub fn fall_limit(&self) -> f32 {
        self.height + self.fall_margin
    }

    pub fn with_player_motion(mut self, motion: PlayerMotion) -> Self {
        self.player_motion = motion;
        self
    }
}
