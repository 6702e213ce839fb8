//! Axis-aligned physics for the playfield
//!
//! Everything here works in playfield pixels with y growing downward.
//! Static solids never move; the only dynamic body that collides with them
//! is the player. Collectibles pass through solids and only test overlap
//! against the player.
//!
//! Movement uses axis-separable move-and-slide: resolve X first, then Y from
//! the corrected X. Each axis is swept, so a large per-tick displacement
//! stops at the first solid face in its path instead of tunnelling through.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlap with a circle (closest-point test)
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.left(), self.right()),
            center.y.clamp(self.top(), self.bottom()),
        );
        closest.distance_squared(center) < radius * radius
    }
}

/// Outcome of a move against static solids
#[derive(Debug, Clone, Copy)]
pub struct MoveResult {
    pub rect: Rect,
    pub blocked_left: bool,
    pub blocked_right: bool,
    /// Blocked while moving up (screen -y): hit a ceiling
    pub blocked_up: bool,
    /// Blocked while moving down (screen +y): landed on something
    pub blocked_down: bool,
}

const EPS: f32 = 0.001;

/// Move `rect` by `delta`, stopping at the first solid face on each axis.
///
/// Solids the rectangle already overlaps are ignored so a body spawned or
/// teleported inside geometry can always move out.
pub fn move_and_collide<'a, I>(rect: Rect, delta: Vec2, solids: I) -> MoveResult
where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    let resolved_x = resolve_axis_x(rect, delta.x, solids.clone());
    let collided_x = (resolved_x - (rect.pos.x + delta.x)).abs() > EPS;

    let mut moved = rect;
    moved.pos.x = resolved_x;
    let resolved_y = resolve_axis_y(moved, delta.y, solids);
    let collided_y = (resolved_y - (rect.pos.y + delta.y)).abs() > EPS;
    moved.pos.y = resolved_y;

    MoveResult {
        rect: moved,
        blocked_left: collided_x && delta.x < 0.0,
        blocked_right: collided_x && delta.x > 0.0,
        blocked_up: collided_y && delta.y < 0.0,
        blocked_down: collided_y && delta.y > 0.0,
    }
}

fn resolve_axis_x<'a, I>(rect: Rect, dx: f32, solids: I) -> f32
where
    I: IntoIterator<Item = &'a Rect>,
{
    if dx == 0.0 {
        return rect.pos.x;
    }

    let mut candidate_x = rect.pos.x + dx;
    for solid in solids {
        // Only solids sharing our vertical span can block horizontal motion
        if rect.top() >= solid.bottom() - EPS || rect.bottom() <= solid.top() + EPS {
            continue;
        }
        if dx > 0.0 {
            let ahead = solid.left() >= rect.right() - EPS;
            if ahead && solid.left() < rect.right() + dx {
                candidate_x = candidate_x.min(solid.left() - rect.size.x);
            }
        } else {
            let ahead = solid.right() <= rect.left() + EPS;
            if ahead && solid.right() > rect.left() + dx {
                candidate_x = candidate_x.max(solid.right());
            }
        }
    }

    // Never push against the direction of travel
    if dx > 0.0 {
        candidate_x.max(rect.pos.x)
    } else {
        candidate_x.min(rect.pos.x)
    }
}

fn resolve_axis_y<'a, I>(rect: Rect, dy: f32, solids: I) -> f32
where
    I: IntoIterator<Item = &'a Rect>,
{
    if dy == 0.0 {
        return rect.pos.y;
    }

    let mut candidate_y = rect.pos.y + dy;
    for solid in solids {
        if rect.left() >= solid.right() - EPS || rect.right() <= solid.left() + EPS {
            continue;
        }
        if dy > 0.0 {
            let ahead = solid.top() >= rect.bottom() - EPS;
            if ahead && solid.top() < rect.bottom() + dy {
                candidate_y = candidate_y.min(solid.top() - rect.size.y);
            }
        } else {
            let ahead = solid.bottom() <= rect.top() + EPS;
            if ahead && solid.bottom() > rect.top() + dy {
                candidate_y = candidate_y.max(solid.bottom());
            }
        }
    }

    if dy > 0.0 {
        candidate_y.max(rect.pos.y)
    } else {
        candidate_y.min(rect.pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_and_wall() -> Vec<Rect> {
        vec![
            Rect::new(0.0, 100.0, 400.0, 20.0), // floor
            Rect::new(200.0, 0.0, 20.0, 100.0), // wall standing on the floor
        ]
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b), "shared edge is not an overlap");
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_rect_intersects_circle() {
        let r = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert!(r.intersects_circle(Vec2::new(50.0, 20.0), 15.0));
        assert!(!r.intersects_circle(Vec2::new(60.0, 20.0), 15.0));
        // Corner case: diagonal distance matters, not the bounding box
        assert!(!r.intersects_circle(Vec2::new(52.0, 52.0), 15.0));
        assert!(r.intersects_circle(Vec2::new(20.0, 20.0), 1.0));
    }

    #[test]
    fn test_centered_and_contains() {
        let r = Rect::centered(Vec2::new(100.0, 100.0), Vec2::splat(16.0));
        assert_eq!(r.pos, Vec2::new(92.0, 92.0));
        assert_eq!(r.center(), Vec2::new(100.0, 100.0));
        assert!(r.contains(Vec2::new(108.0, 92.0)));
        assert!(!r.contains(Vec2::new(108.1, 92.0)));
    }

    #[test]
    fn test_falling_body_lands_on_floor() {
        let solids = floor_and_wall();
        let body = Rect::new(50.0, 50.0, 40.0, 40.0);
        let result = move_and_collide(body, Vec2::new(0.0, 30.0), &solids);
        assert!(result.blocked_down);
        assert!((result.rect.bottom() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_blocks_large_horizontal_move_without_tunnelling() {
        let solids = floor_and_wall();
        let body = Rect::new(100.0, 60.0, 40.0, 40.0);
        // One per-tick step much wider than the wall
        let result = move_and_collide(body, Vec2::new(400.0, 0.0), &solids);
        assert!(result.blocked_right);
        assert!((result.rect.right() - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_leftward_move_blocked_by_wall() {
        let solids = floor_and_wall();
        let body = Rect::new(260.0, 60.0, 40.0, 40.0);
        let result = move_and_collide(body, Vec2::new(-400.0, 0.0), &solids);
        assert!(result.blocked_left);
        assert!((result.rect.left() - 220.0).abs() < 1e-4);
    }

    #[test]
    fn test_ceiling_blocks_upward_move() {
        let solids = vec![Rect::new(0.0, 0.0, 100.0, 20.0)];
        let body = Rect::new(10.0, 40.0, 40.0, 40.0);
        let result = move_and_collide(body, Vec2::new(0.0, -50.0), &solids);
        assert!(result.blocked_up);
        assert!((result.rect.top() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_body_resting_on_floor_slides_freely() {
        let solids = floor_and_wall();
        let body = Rect::new(20.0, 60.0, 40.0, 40.0);
        let result = move_and_collide(body, Vec2::new(30.0, 1.0), &solids);
        assert!(!result.blocked_right);
        assert!(result.blocked_down);
        assert!((result.rect.left() - 50.0).abs() < 1e-4);
        assert!((result.rect.bottom() - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_overlapping_solid_does_not_trap_body() {
        let solids = vec![Rect::new(0.0, 0.0, 100.0, 100.0)];
        let body = Rect::new(50.0, 50.0, 10.0, 10.0);
        let result = move_and_collide(body, Vec2::new(5.0, 5.0), &solids);
        assert_eq!(result.rect.pos, Vec2::new(55.0, 55.0));
        assert!(!result.blocked_down && !result.blocked_right);
    }
}
