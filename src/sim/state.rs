//! Level state and entity types
//!
//! A level owns every entity of one play-through: the player, the moving
//! collectibles and the static solids. Entities are plain structs per kind;
//! `EntityKind` names them and `EntityRef` lets callers walk all of them in
//! registration order.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::{Rect, move_and_collide};
use super::progress::Progress;
use crate::consts::*;
use crate::tuning::LevelConfig;

/// Every kind of entity in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Ball,
    Triangle,
    Platform,
    Boundary,
}

/// Current phase of the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LevelPhase {
    /// Collectibles remain
    Playing,
    /// Everything gathered; waiting for the restart input
    Complete { final_time: f32 },
}

impl LevelPhase {
    pub fn is_complete(&self) -> bool {
        matches!(self, LevelPhase::Complete { .. })
    }
}

/// Things that happened during a tick, drained by the host for logging/HUD
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Collected {
        id: u32,
        kind: CollectibleKind,
        points: u32,
    },
    Jumped,
    Respawned,
    LevelComplete {
        final_time: f32,
        new_best: bool,
    },
    Restarted {
        seed: u64,
    },
}

/// The player-controlled box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    /// Resting on a solid after the last physics step
    pub grounded: bool,
}

impl Player {
    pub fn new(id: u32, spawn: Vec2) -> Self {
        Self {
            id,
            pos: spawn,
            vel: Vec2::ZERO,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(PLAYER_SIZE),
        }
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn try_jump(&mut self, force: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel.y = -force;
        self.grounded = false;
        true
    }

    /// Apply gravity and move by `dx` horizontally plus the vertical velocity,
    /// resolving against static solids.
    pub fn step<'a, I>(&mut self, dx: f32, gravity: f32, dt: f32, solids: I)
    where
        I: IntoIterator<Item = &'a Rect> + Clone,
    {
        self.vel.y += gravity * dt;
        let result = move_and_collide(self.rect(), Vec2::new(dx, self.vel.y * dt), solids);
        self.pos = result.rect.pos;

        if result.blocked_down && self.vel.y > 0.0 {
            self.vel.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        if result.blocked_up && self.vel.y < 0.0 {
            self.vel.y = 0.0;
        }
    }

    pub fn has_fallen(&self, limit: f32) -> bool {
        self.pos.y > limit
    }

    /// Back to the spawn point with no vertical motion
    pub fn respawn(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel.y = 0.0;
    }
}

/// Collectible shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Ball,
    Triangle,
}

impl CollectibleKind {
    pub fn points(&self) -> u32 {
        match self {
            CollectibleKind::Ball => BALL_POINTS,
            CollectibleKind::Triangle => TRIANGLE_POINTS,
        }
    }

    pub fn speed(&self, config: &LevelConfig) -> f32 {
        match self {
            CollectibleKind::Ball => config.ball_speed,
            CollectibleKind::Triangle => config.triangle_speed,
        }
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self {
            CollectibleKind::Ball => EntityKind::Ball,
            CollectibleKind::Triangle => EntityKind::Triangle,
        }
    }
}

/// A ball or triangle bouncing around the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    /// Centre of the shape
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Collectible {
    /// Random position away from the edges, random diagonal direction
    pub fn spawn<R: Rng>(id: u32, kind: CollectibleKind, speed: f32, bounds: Vec2, rng: &mut R) -> Self {
        let pos = Vec2::new(
            rng.random_range(SPAWN_MARGIN..=bounds.x - SPAWN_MARGIN),
            rng.random_range(SPAWN_MARGIN..=bounds.y - SPAWN_MARGIN),
        );
        let dir_x = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dir_y = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            id,
            kind,
            pos,
            vel: Vec2::new(speed * dir_x, speed * dir_y),
            alive: true,
        }
    }

    /// Advance by one tick and bounce off the playfield edges.
    ///
    /// Each axis flips independently when its coordinate left `[0, bound]`;
    /// the position is then clamped back inside.
    pub fn advance(&mut self, dt: f32, bounds: Vec2) {
        self.pos += self.vel * dt;

        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }

        self.pos = self.pos.clamp(Vec2::ZERO, bounds);
    }

    /// Whether the player's box touches this shape
    pub fn overlaps(&self, player: &Rect) -> bool {
        match self.kind {
            CollectibleKind::Ball => player.intersects_circle(self.pos, BALL_RADIUS),
            CollectibleKind::Triangle => {
                player.intersects(&Rect::centered(self.pos, Vec2::splat(TRIANGLE_SIZE)))
            }
        }
    }

    /// Mark as collected. Returns false if it was already gone.
    pub fn collect(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        true
    }
}

/// Static solid kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolidKind {
    Platform,
    Boundary,
}

/// A static rectangle the player stands on or bumps into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solid {
    pub id: u32,
    pub kind: SolidKind,
    pub rect: Rect,
}

impl Solid {
    pub fn entity_kind(&self) -> EntityKind {
        match self.kind {
            SolidKind::Platform => EntityKind::Platform,
            SolidKind::Boundary => EntityKind::Boundary,
        }
    }
}

/// Borrowed view of any entity
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Collectible(&'a Collectible),
    Solid(&'a Solid),
}

impl EntityRef<'_> {
    pub fn id(&self) -> u32 {
        match self {
            EntityRef::Player(p) => p.id,
            EntityRef::Collectible(c) => c.id,
            EntityRef::Solid(s) => s.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Player(_) => EntityKind::Player,
            EntityRef::Collectible(c) => c.kind.entity_kind(),
            EntityRef::Solid(s) => s.entity_kind(),
        }
    }
}

/// One play-through of the level (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Seed the collectibles were placed from
    pub seed: u64,
    pub config: LevelConfig,
    pub phase: LevelPhase,
    pub progress: Progress,
    /// Seconds of play since the level started (frozen once complete)
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active collectibles in registration order
    pub collectibles: Vec<Collectible>,
    /// Platforms then boundaries, in registration order
    pub solids: Vec<Solid>,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Level {
    /// Build a fresh level: player at spawn, collectibles scattered from `seed`
    pub fn new(config: LevelConfig, seed: u64) -> Self {
        let total = config.total_collectibles();
        let mut level = Self {
            seed,
            phase: LevelPhase::Playing,
            progress: Progress::new(total),
            elapsed: 0.0,
            time_ticks: 0,
            player: Player::new(0, config.player_spawn),
            collectibles: Vec::with_capacity(total as usize),
            solids: Vec::new(),
            events: Vec::new(),
            next_id: 0,
            config,
        };
        level.player.id = level.next_entity_id();
        level.populate();
        log::info!(
            "Level started (seed {}, {} collectibles)",
            seed,
            level.collectibles.len()
        );
        level
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn populate(&mut self) {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let bounds = self.config.bounds();

        let spawns = std::iter::repeat_n(CollectibleKind::Ball, self.config.total_balls as usize)
            .chain(std::iter::repeat_n(
                CollectibleKind::Triangle,
                self.config.total_triangles as usize,
            ));
        for kind in spawns {
            let id = self.next_entity_id();
            let speed = kind.speed(&self.config);
            self.collectibles
                .push(Collectible::spawn(id, kind, speed, bounds, &mut rng));
        }

        let platforms = self.config.platforms.clone();
        for rect in platforms {
            let id = self.next_entity_id();
            self.solids.push(Solid {
                id,
                kind: SolidKind::Platform,
                rect,
            });
        }
        let boundaries = self.config.boundaries.clone();
        for rect in boundaries {
            let id = self.next_entity_id();
            self.solids.push(Solid {
                id,
                kind: SolidKind::Boundary,
                rect,
            });
        }
    }

    /// All entities in registration order
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Player(&self.player))
            .chain(self.collectibles.iter().map(EntityRef::Collectible))
            .chain(self.solids.iter().map(EntityRef::Solid))
    }

    pub fn remaining(&self) -> u32 {
        self.progress.remaining()
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_complete()
    }

    /// Handle a collection event for the collectible at `index`.
    ///
    /// Returns the final time if this collection completed the level.
    pub fn on_collected(&mut self, index: usize) -> Option<f32> {
        let collectible = self.collectibles.get_mut(index)?;
        if !collectible.collect() {
            return None;
        }
        let (id, kind) = (collectible.id, collectible.kind);
        let points = self.progress.record(kind);
        log::debug!(
            "Collected {:?} #{} (+{}), score {}, remaining {}",
            kind,
            id,
            points,
            self.progress.score,
            self.progress.remaining()
        );
        self.events.push(GameEvent::Collected { id, kind, points });

        if self.progress.is_complete() && !self.is_complete() {
            let final_time = self.elapsed;
            self.phase = LevelPhase::Complete { final_time };
            return Some(final_time);
        }
        None
    }

    /// Drop collected entities from the active set
    pub fn remove_collected(&mut self) {
        self.collectibles.retain(|c| c.alive);
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn collectible_at(pos: Vec2, vel: Vec2) -> Collectible {
        Collectible {
            id: 1,
            kind: CollectibleKind::Ball,
            pos,
            vel,
            alive: true,
        }
    }

    #[test]
    fn test_level_new_registers_entities_in_order() {
        let level = Level::new(LevelConfig::default(), 7);
        let kinds: Vec<EntityKind> = level.entities().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), 1 + 8 + 6 + 2);
        assert_eq!(kinds[0], EntityKind::Player);
        assert!(kinds[1..6].iter().all(|k| *k == EntityKind::Ball));
        assert!(kinds[6..9].iter().all(|k| *k == EntityKind::Triangle));
        assert!(kinds[9..15].iter().all(|k| *k == EntityKind::Platform));
        assert!(kinds[15..].iter().all(|k| *k == EntityKind::Boundary));

        let ids: Vec<u32> = level.entities().map(|e| e.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_spawn_within_margin_and_at_kind_speed() {
        let level = Level::new(LevelConfig::default(), 1234);
        for c in &level.collectibles {
            assert!(c.alive);
            assert!(c.pos.x >= 50.0 && c.pos.x <= 750.0);
            assert!(c.pos.y >= 50.0 && c.pos.y <= 550.0);
            let speed = match c.kind {
                CollectibleKind::Ball => BALL_SPEED,
                CollectibleKind::Triangle => TRIANGLE_SPEED,
            };
            assert_eq!(c.vel.x.abs(), speed);
            assert_eq!(c.vel.y.abs(), speed);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Level::new(LevelConfig::default(), 99);
        let b = Level::new(LevelConfig::default(), 99);
        for (ca, cb) in a.collectibles.iter().zip(&b.collectibles) {
            assert_eq!(ca.pos, cb.pos);
            assert_eq!(ca.vel, cb.vel);
        }
    }

    #[test]
    fn test_bounce_off_right_edge() {
        let mut c = collectible_at(Vec2::new(795.0, 300.0), Vec2::new(200.0, 200.0));
        c.advance(0.1, BOUNDS);
        assert_eq!(c.vel, Vec2::new(-200.0, 200.0));
        assert_eq!(c.pos.x, 800.0);
        assert!((c.pos.y - 320.0).abs() < 1e-4);
    }

    #[test]
    fn test_bounce_off_top_left_corner_flips_both_axes() {
        let mut c = collectible_at(Vec2::new(2.0, 2.0), Vec2::new(-250.0, -250.0));
        c.advance(0.05, BOUNDS);
        assert_eq!(c.vel, Vec2::new(250.0, 250.0));
        assert_eq!(c.pos, Vec2::ZERO);
    }

    #[test]
    fn test_collect_only_once() {
        let mut c = collectible_at(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert!(c.collect());
        assert!(!c.alive);
        assert!(!c.collect());
    }

    #[test]
    fn test_overlap_shapes() {
        let player = Rect::new(100.0, 100.0, 40.0, 40.0);
        let ball = Collectible {
            kind: CollectibleKind::Ball,
            ..collectible_at(Vec2::new(150.0, 120.0), Vec2::ZERO)
        };
        assert!(ball.overlaps(&player));
        let triangle = Collectible {
            kind: CollectibleKind::Triangle,
            ..collectible_at(Vec2::new(150.0, 120.0), Vec2::ZERO)
        };
        // Triangle box only reaches 8px from its centre
        assert!(!triangle.overlaps(&player));
        let triangle = Collectible {
            pos: Vec2::new(145.0, 120.0),
            ..triangle
        };
        assert!(triangle.overlaps(&player));
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut player = Player::new(0, PLAYER_SPAWN);
        player.vel.y = 120.0;
        assert!(!player.try_jump(JUMP_FORCE));
        assert_eq!(player.vel.y, 120.0);

        player.grounded = true;
        assert!(player.try_jump(JUMP_FORCE));
        assert_eq!(player.vel.y, -JUMP_FORCE);
        assert!(!player.grounded);
    }

    #[test]
    fn test_player_step_lands_and_grounds() {
        let floor = [Rect::new(0.0, 200.0, 400.0, 20.0)];
        let mut player = Player::new(0, Vec2::new(50.0, 150.0));
        for _ in 0..60 {
            player.step(0.0, GRAVITY, 1.0 / 60.0, &floor);
        }
        assert!(player.grounded);
        assert_eq!(player.vel.y, 0.0);
        assert!((player.rect().bottom() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_respawn_keeps_horizontal_velocity_only() {
        let mut player = Player::new(0, PLAYER_SPAWN);
        player.pos = Vec2::new(500.0, 700.0);
        player.vel = Vec2::new(3.0, 900.0);
        assert!(player.has_fallen(640.0));
        player.respawn(PLAYER_SPAWN);
        assert_eq!(player.pos, PLAYER_SPAWN);
        assert_eq!(player.vel, Vec2::new(3.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_advance_stays_in_bounds_and_keeps_speed(
            x in 0.0f32..=800.0,
            y in 0.0f32..=600.0,
            neg_x in any::<bool>(),
            neg_y in any::<bool>(),
            triangle in any::<bool>(),
            dt in 0.0001f32..0.1,
        ) {
            let speed = if triangle { TRIANGLE_SPEED } else { BALL_SPEED };
            let vel = Vec2::new(
                if neg_x { -speed } else { speed },
                if neg_y { -speed } else { speed },
            );
            let mut c = collectible_at(Vec2::new(x, y), vel);
            let moved = c.pos + c.vel * dt;
            c.advance(dt, BOUNDS);

            prop_assert!(c.pos.x >= 0.0 && c.pos.x <= BOUNDS.x);
            prop_assert!(c.pos.y >= 0.0 && c.pos.y <= BOUNDS.y);
            prop_assert_eq!(c.vel.x.abs(), speed);
            prop_assert_eq!(c.vel.y.abs(), speed);

            let out_x = moved.x < 0.0 || moved.x > BOUNDS.x;
            let out_y = moved.y < 0.0 || moved.y > BOUNDS.y;
            prop_assert_eq!(c.vel.x, if out_x { -vel.x } else { vel.x });
            prop_assert_eq!(c.vel.y, if out_y { -vel.y } else { vel.y });
        }

        #[test]
        fn prop_many_ticks_never_escape(seed in any::<u64>(), steps in 1usize..400) {
            let mut level = Level::new(LevelConfig::default(), seed);
            let bounds = level.config.bounds();
            for _ in 0..steps {
                for c in &mut level.collectibles {
                    c.advance(1.0 / 60.0, bounds);
                    prop_assert!(c.pos.cmpge(Vec2::ZERO).all() && c.pos.cmple(bounds).all());
                }
            }
        }
    }
}
