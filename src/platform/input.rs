//! Keyboard input
//!
//! Front ends translate their native key events into [`Key`] and feed them to
//! [`Controls`], which turns them into one [`TickInput`] per simulation tick.

use crate::sim::TickInput;

/// Game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `P`: toggle pause
    Pause,
    /// `R`: resume while paused
    Resume,
    /// `N`: abandon this session and start a new one
    NewGame,
    /// `1`: debug, destroy every breakable brick
    ClearBricks,
    /// Left arrow (held)
    Left,
    /// Right arrow (held)
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_web_key(key: &str) -> Option<Self> {
        match key {
            "p" | "P" => Some(Key::Pause),
            "r" | "R" => Some(Key::Resume),
            "n" | "N" => Some(Key::NewGame),
            "1" => Some(Key::ClearBricks),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Accumulated key state between ticks
#[derive(Debug, Clone, Default)]
pub struct Controls {
    left_held: bool,
    right_held: bool,
    /// One-shot presses not yet consumed by a tick
    pending: TickInput,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. Auto-repeat only refreshes held state.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        match key {
            Key::Left => self.left_held = true,
            Key::Right => self.right_held = true,
            _ if repeat => {}
            Key::Pause => self.pending.toggle_pause = !self.pending.toggle_pause,
            Key::Resume => self.pending.resume = true,
            Key::NewGame => self.pending.new_game = true,
            Key::ClearBricks => self.pending.clear_breakable = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left_held = false,
            Key::Right => self.right_held = false,
            _ => {}
        }
    }

    /// Forget held keys (window lost focus, key-up will never arrive)
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }

    /// Consume a pending new-game request
    pub fn take_new_game(&mut self) -> bool {
        std::mem::take(&mut self.pending.new_game)
    }

    /// Input for the next tick: held keys sampled now, one-shots drained
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.left = self.left_held;
        input.right = self.right_held;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_key_mapping() {
        assert_eq!(Key::from_web_key("p"), Some(Key::Pause));
        assert_eq!(Key::from_web_key("R"), Some(Key::Resume));
        assert_eq!(Key::from_web_key("n"), Some(Key::NewGame));
        assert_eq!(Key::from_web_key("1"), Some(Key::ClearBricks));
        assert_eq!(Key::from_web_key("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_web_key("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_web_key("Escape"), None);
    }

    #[test]
    fn test_held_keys_are_sampled_every_tick() {
        let mut controls = Controls::new();
        controls.key_down(Key::Left, false);

        assert!(controls.take_tick_input().left);
        assert!(controls.take_tick_input().left);

        controls.key_up(Key::Left);
        assert!(!controls.take_tick_input().left);
    }

    #[test]
    fn test_one_shots_are_drained() {
        let mut controls = Controls::new();
        controls.key_down(Key::Pause, false);
        controls.key_down(Key::ClearBricks, false);

        let input = controls.take_tick_input();
        assert!(input.toggle_pause);
        assert!(input.clear_breakable);

        let input = controls.take_tick_input();
        assert!(!input.toggle_pause);
        assert!(!input.clear_breakable);
    }

    #[test]
    fn test_double_pause_press_cancels() {
        let mut controls = Controls::new();
        controls.key_down(Key::Pause, false);
        controls.key_down(Key::Pause, false);
        assert!(!controls.take_tick_input().toggle_pause);
    }

    #[test]
    fn test_auto_repeat_does_not_retrigger() {
        let mut controls = Controls::new();
        controls.key_down(Key::Pause, false);
        controls.key_down(Key::Pause, true);
        controls.key_down(Key::Right, true);

        let input = controls.take_tick_input();
        assert!(input.toggle_pause);
        assert!(input.right);
    }

    #[test]
    fn test_release_all_drops_held_keys() {
        let mut controls = Controls::new();
        controls.key_down(Key::Left, false);
        controls.key_down(Key::Right, false);
        controls.release_all();

        let input = controls.take_tick_input();
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_new_game_request() {
        let mut controls = Controls::new();
        assert!(!controls.take_new_game());
        controls.key_down(Key::NewGame, false);
        assert!(controls.take_new_game());
        assert!(!controls.take_new_game());
    }
}
