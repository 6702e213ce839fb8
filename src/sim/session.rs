//! Process-lifetime game session
//!
//! The session sits above the level: a restart throws the level away and
//! builds a new one, while the best time and the seed sequence carry over.

use super::state::{GameEvent, Level};
use crate::records::BestTime;
use crate::tuning::LevelConfig;

/// Name of the one scene the host can start
pub const SCENE_NAME: &str = "game";

#[derive(Debug, Clone)]
pub struct Session {
    pub level: Level,
    pub best_time: BestTime,
    /// Levels started after the first one
    pub restarts: u32,
    config: LevelConfig,
    base_seed: u64,
}

impl Session {
    /// Start the game scene with a fresh level
    pub fn new(config: LevelConfig, seed: u64) -> Self {
        log::info!("Starting scene \"{}\" with seed {}", SCENE_NAME, seed);
        Self {
            level: Level::new(config.clone(), seed),
            best_time: BestTime::new(),
            restarts: 0,
            config,
            base_seed: seed,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Tear the level down and rebuild it from scratch
    pub fn restart(&mut self) {
        self.restarts += 1;
        let seed = self.level_seed();
        self.level = Level::new(self.config.clone(), seed);
        self.level.events.push(GameEvent::Restarted { seed });
        log::info!(
            "Scene \"{}\" restarted (run {}, best {})",
            SCENE_NAME,
            self.restarts + 1,
            self.best_time.display()
        );
    }

    /// Seed for the current run: golden-ratio stride from the base seed
    fn level_seed(&self) -> u64 {
        self.base_seed
            .wrapping_add((self.restarts as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.level.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_builds_fresh_level_with_new_seed() {
        let mut session = Session::new(LevelConfig::default(), 5);
        let first_seed = session.level.seed;
        session.level.progress.gathered = 3;
        session.level.progress.score = 20;
        session.level.elapsed = 9.0;
        session.level.collectibles.truncate(2);

        session.restart();
        assert_ne!(session.level.seed, first_seed);
        assert_eq!(session.level.progress.gathered, 0);
        assert_eq!(session.level.progress.score, 0);
        assert_eq!(session.level.elapsed, 0.0);
        assert_eq!(session.level.collectibles.len(), 8);
        assert_eq!(session.restarts, 1);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Restarted {
                seed: session.level.seed
            }]
        );
    }

    #[test]
    fn test_seed_sequence_is_reproducible() {
        let mut a = Session::new(LevelConfig::default(), 77);
        let mut b = Session::new(LevelConfig::default(), 77);
        a.restart();
        b.restart();
        assert_eq!(a.level.seed, b.level.seed);
    }
}
