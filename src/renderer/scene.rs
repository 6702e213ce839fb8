//! Frame building: level state to playfield-space triangles

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{BALL_RADIUS, TRIANGLE_SIZE};
use crate::sim::{Collectible, CollectibleKind, EntityRef, Level, Player, SolidKind};

const CIRCLE_SEGMENTS: u32 = 24;

/// Build the vertex list for one frame.
///
/// Entities are drawn in the level's stable order (player, collectibles,
/// solids); nothing overlaps in the reference layout so order is cosmetic.
pub fn build_frame(level: &Level) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    for entity in level.entities() {
        match entity {
            EntityRef::Player(player) => draw_player(&mut vertices, player),
            EntityRef::Collectible(c) if c.alive => draw_collectible(&mut vertices, c),
            EntityRef::Collectible(_) => {}
            EntityRef::Solid(solid) => {
                let color = match solid.kind {
                    SolidKind::Platform => colors::PLATFORM,
                    SolidKind::Boundary => colors::BOUNDARY,
                };
                vertices.extend(shapes::rect(&solid.rect, color));
            }
        }
    }

    vertices
}

/// Red square with a face: two eyes and a smile
fn draw_player(out: &mut Vec<Vertex>, player: &Player) {
    let origin = player.pos;
    out.extend(shapes::rect(&player.rect(), colors::PLAYER));

    for eye in [Vec2::new(10.0, 15.0), Vec2::new(30.0, 15.0)] {
        out.extend(shapes::circle(origin + eye, 8.0, colors::EYE_WHITE, CIRCLE_SEGMENTS));
        out.extend(shapes::circle(origin + eye, 4.0, colors::PUPIL, CIRCLE_SEGMENTS));
    }

    let mouth_l = origin + Vec2::new(10.0, 30.0);
    let mouth_r = origin + Vec2::new(30.0, 30.0);
    out.extend(shapes::line(mouth_l, mouth_r, 2.0, colors::PUPIL));
    out.extend(shapes::line(mouth_l, mouth_l - Vec2::Y * 5.0, 2.0, colors::PUPIL));
    out.extend(shapes::line(mouth_r, mouth_r - Vec2::Y * 5.0, 2.0, colors::PUPIL));
}

fn draw_collectible(out: &mut Vec<Vertex>, c: &Collectible) {
    match c.kind {
        CollectibleKind::Ball => {
            out.extend(shapes::circle(c.pos, BALL_RADIUS, colors::BALL, CIRCLE_SEGMENTS));
            out.extend(shapes::circle(
                c.pos + Vec2::new(-5.0, -5.0),
                5.0,
                colors::BALL_HIGHLIGHT,
                CIRCLE_SEGMENTS,
            ));
        }
        CollectibleKind::Triangle => {
            let h = TRIANGLE_SIZE * 0.5;
            out.extend(shapes::triangle(
                c.pos + Vec2::new(0.0, -h),
                c.pos + Vec2::new(-h, h),
                c.pos + Vec2::new(h, h),
                colors::TRIANGLE,
            ));
        }
    }
}
