//! HUD text
//!
//! Pure formatting of everything the player reads on screen. The browser
//! front end copies these strings into DOM elements each frame.

use crate::format_seconds;
use crate::sim::{LevelPhase, Session, display_time};

/// DOM element ids the HUD is written into
pub mod ids {
    pub const SCORE: &str = "hud-score";
    pub const TIME: &str = "hud-time";
    pub const BEST: &str = "hud-best";
    pub const REMAINING: &str = "hud-remaining";
    pub const COMPLETION: &str = "completion-message";
    pub const FPS: &str = "hud-fps";
    pub const TOUCH_CONTROLS: &str = "touch-controls";
    pub const LOADING: &str = "loading";
    pub const CANVAS: &str = "canvas";
}

/// Display strings for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub time: String,
    pub best: String,
    pub remaining: String,
    /// Shown only once the level is complete
    pub completion: Option<String>,
}

impl HudText {
    pub fn from_session(session: &Session) -> Self {
        let level = &session.level;
        let completion = match level.phase {
            LevelPhase::Playing => None,
            LevelPhase::Complete { final_time } => Some(completion_message(final_time)),
        };

        Self {
            score: format!("Score: {}", level.progress.score),
            time: format!("Time: {}", format_seconds(display_time(level))),
            best: format!("Best: {}", session.best_time.display()),
            remaining: format!("Remaining: {}", level.remaining()),
            completion,
        }
    }

    /// `(element id, text)` pairs for the always-visible lines
    pub fn lines(&self) -> [(&'static str, &str); 4] {
        [
            (ids::SCORE, self.score.as_str()),
            (ids::TIME, self.time.as_str()),
            (ids::BEST, self.best.as_str()),
            (ids::REMAINING, self.remaining.as_str()),
        ]
    }
}

pub fn completion_message(final_time: f32) -> String {
    format!(
        "Level Complete!\nTime: {}\nPress SPACE to restart",
        format_seconds(final_time)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::LevelConfig;

    #[test]
    fn test_fresh_session_hud() {
        let session = Session::new(LevelConfig::default(), 3);
        let hud = HudText::from_session(&session);
        assert_eq!(hud.score, "Score: 0");
        assert_eq!(hud.time, "Time: 0.0s");
        assert_eq!(hud.best, "Best: --");
        assert_eq!(hud.remaining, "Remaining: 8");
        assert_eq!(hud.completion, None);
    }

    #[test]
    fn test_complete_hud_shows_final_time() {
        let mut session = Session::new(LevelConfig::default(), 3);
        session.level.elapsed = 20.0;
        session.level.phase = LevelPhase::Complete { final_time: 12.34 };
        session.best_time.record(12.34);
        let hud = HudText::from_session(&session);
        assert_eq!(hud.time, "Time: 12.3s");
        assert_eq!(hud.best, "Best: 12.3s");
        assert_eq!(
            hud.completion.as_deref(),
            Some("Level Complete!\nTime: 12.3s\nPress SPACE to restart")
        );
    }

    #[test]
    fn test_lines_map_to_element_ids() {
        let session = Session::new(LevelConfig::default(), 3);
        let hud = HudText::from_session(&session);
        let lines = hud.lines();
        assert_eq!(lines[0], ("hud-score", "Score: 0"));
        assert_eq!(lines[3], ("hud-remaining", "Remaining: 8"));
    }
}
