//! Input state shared between event callbacks and the simulation tick
//!
//! Event listeners only flip flags here; the tick reads them at its start and
//! the host clears one-shot keyboard flags after each tick.

/// The three player controls for one input channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// On-screen touch buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

impl TouchButton {
    pub const ALL: [TouchButton; 3] = [TouchButton::Left, TouchButton::Right, TouchButton::Jump];

    /// DOM id of the button element
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchButton::Left => "left-btn",
            TouchButton::Right => "right-btn",
            TouchButton::Jump => "jump-btn",
        }
    }
}

/// Keyboard and touch channels, merged with logical OR
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: Controls,
    pub touch: Controls,
    /// Restart request (space); only honored once the level is complete
    pub restart: bool,
}

impl InputState {
    pub fn left(&self) -> bool {
        self.keyboard.left || self.touch.left
    }

    pub fn right(&self) -> bool {
        self.keyboard.right || self.touch.right
    }

    pub fn jump_requested(&self) -> bool {
        self.keyboard.jump || self.touch.jump
    }

    /// A jump happened; the request is spent on both channels
    pub fn consume_jump(&mut self) {
        self.keyboard.jump = false;
        self.touch.jump = false;
    }

    /// Clear one-shot keyboard inputs after a tick has seen them
    pub fn end_tick(&mut self) {
        self.keyboard.jump = false;
        self.restart = false;
    }

    /// Keyboard key pressed. Returns true if the key is bound.
    ///
    /// Auto-repeat presses are ignored for the jump/restart key so holding
    /// space does not re-trigger.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        match key {
            "ArrowLeft" | "Left" | "a" | "A" => self.keyboard.left = true,
            "ArrowRight" | "Right" | "d" | "D" => self.keyboard.right = true,
            " " | "Spacebar" => {
                if !repeat {
                    self.keyboard.jump = true;
                    self.restart = true;
                }
            }
            _ => return false,
        }
        true
    }

    /// Keyboard key released. Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowLeft" | "Left" | "a" | "A" => self.keyboard.left = false,
            "ArrowRight" | "Right" | "d" | "D" => self.keyboard.right = false,
            " " | "Spacebar" => {}
            _ => return false,
        }
        true
    }

    /// Touch start (`pressed = true`) or end on an on-screen button
    pub fn touch(&mut self, button: TouchButton, pressed: bool) {
        match button {
            TouchButton::Left => self.touch.left = pressed,
            TouchButton::Right => self.touch.right = pressed,
            TouchButton::Jump => self.touch.jump = pressed,
        }
    }

    /// Drop everything (focus loss, restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_merge_with_or() {
        let mut input = InputState::default();
        assert!(!input.left());
        input.touch(TouchButton::Left, true);
        assert!(input.left());
        input.key_down("ArrowLeft", false);
        input.touch(TouchButton::Left, false);
        assert!(input.left(), "keyboard still holds left");
        input.key_up("ArrowLeft");
        assert!(!input.left());

        input.key_down("ArrowRight", false);
        assert!(input.right());
        input.key_up("ArrowRight");
        input.key_down("d", false);
        assert!(input.right());
        assert!(!input.key_down("q", false));
    }

    #[test]
    fn test_space_is_one_shot() {
        let mut input = InputState::default();
        assert!(input.key_down(" ", false));
        assert!(input.jump_requested());
        assert!(input.restart);
        input.end_tick();
        assert!(!input.jump_requested());
        assert!(!input.restart);

        input.key_down(" ", true);
        assert!(!input.jump_requested(), "auto-repeat ignored");
    }

    #[test]
    fn test_touch_jump_survives_tick_until_consumed() {
        let mut input = InputState::default();
        input.touch(TouchButton::Jump, true);
        input.end_tick();
        assert!(input.jump_requested());
        input.consume_jump();
        assert!(!input.jump_requested());
    }

    #[test]
    fn test_unbound_keys_report_false() {
        let mut input = InputState::default();
        assert!(!input.key_down("q", false));
        assert!(!input.key_up("Escape"));
        assert_eq!(input.keyboard, Controls::default());
    }

    #[test]
    fn test_button_ids() {
        let ids: Vec<&str> = TouchButton::ALL.iter().map(|b| b.element_id()).collect();
        assert_eq!(ids, ["left-btn", "right-btn", "jump-btn"]);
    }
}
