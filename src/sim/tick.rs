//! Per-frame simulation tick
//!
//! One call advances the session by one rendered frame. Order within a tick:
//! restart check, player control and physics, fall respawn, collectible
//! movement, then collision events in collectible registration order.

use super::session::Session;
use super::state::{GameEvent, Level, LevelPhase};
use crate::platform::InputState;

/// Advance the session by one tick of `dt` seconds
pub fn tick(session: &mut Session, input: &mut InputState, dt: f32) {
    // Restart is only listened for once the level is complete
    if session.level.is_complete() && input.restart {
        session.restart();
        return;
    }

    let Session {
        level, best_time, ..
    } = session;

    level.time_ticks += 1;
    if !level.is_complete() {
        level.elapsed += dt;
    }

    update_player(level, input, dt);

    let bounds = level.config.bounds();
    for collectible in &mut level.collectibles {
        collectible.advance(dt, bounds);
    }

    // Collision events: player against every live collectible
    let player_rect = level.player.rect();
    let hits: Vec<usize> = level
        .collectibles
        .iter()
        .enumerate()
        .filter(|(_, c)| c.alive && c.overlaps(&player_rect))
        .map(|(i, _)| i)
        .collect();

    for index in hits {
        if let Some(final_time) = level.on_collected(index) {
            let new_best = best_time.record(final_time);
            log::info!(
                "Level complete in {:.1}s (score {}){}",
                final_time,
                level.progress.score,
                if new_best { " - new best!" } else { "" }
            );
            level.events.push(GameEvent::LevelComplete {
                final_time,
                new_best,
            });
        }
    }
    level.remove_collected();
}

fn update_player(level: &mut Level, input: &mut InputState, dt: f32) {
    let config = &level.config;
    let step = config.player_motion.displacement(config.move_speed, dt);

    let mut dx = 0.0;
    if input.left() {
        dx -= step;
    }
    if input.right() {
        dx += step;
    }

    if input.jump_requested() && level.player.try_jump(config.jump_force) {
        input.consume_jump();
        level.events.push(GameEvent::Jumped);
    }

    level
        .player
        .step(dx, config.gravity, dt, level.solids.iter().map(|s| &s.rect));

    if level.player.has_fallen(config.fall_limit()) {
        log::debug!("Player fell at x={:.0}, respawning", level.player.pos.x);
        level.player.respawn(config.player_spawn);
        level.events.push(GameEvent::Respawned);
    }
}

/// Elapsed seconds shown to the player: live while playing, final once done
pub fn display_time(level: &Level) -> f32 {
    match level.phase {
        LevelPhase::Playing => level.elapsed,
        LevelPhase::Complete { final_time } => final_time,
    }
}
