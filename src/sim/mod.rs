//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (registration order)
//! - No rendering or platform dependencies beyond `InputState`

pub mod physics;
pub mod progress;
pub mod session;
pub mod state;
pub mod tick;

pub use physics::{MoveResult, Rect, move_and_collide};
pub use progress::Progress;
pub use session::{SCENE_NAME, Session};
pub use state::{
    Collectible, CollectibleKind, EntityKind, EntityRef, GameEvent, Level, LevelPhase, Player,
    Solid, SolidKind,
};
pub use tick::{display_time, tick};
