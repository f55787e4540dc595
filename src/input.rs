//! Maps keys, swipes and on-screen buttons onto a single pending heading.

use macroquad::prelude::{KeyCode, Vec2};

use crate::board::Direction;

/// Swipes at or under this many pixels on their dominant axis are taps.
pub const SWIPE_THRESHOLD: f32 = 20.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Turn(Direction),
    TogglePause,
}

pub fn intent_for_key(key: KeyCode) -> Option<Intent> {
    let intent = match key {
        KeyCode::Up | KeyCode::W => Intent::Turn(Direction::Up),
        KeyCode::Down | KeyCode::S => Intent::Turn(Direction::Down),
        KeyCode::Left | KeyCode::A => Intent::Turn(Direction::Left),
        KeyCode::Right | KeyCode::D => Intent::Turn(Direction::Right),
        KeyCode::Space => Intent::TogglePause,
        _ => return None,
    };
    Some(intent)
}

/// Heading for a finger displacement. Ties go to the vertical axis.
pub fn swipe_direction(delta: Vec2) -> Option<Direction> {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > SWIPE_THRESHOLD {
            Some(Direction::Right)
        } else if delta.x < -SWIPE_THRESHOLD {
            Some(Direction::Left)
        } else {
            None
        }
    } else if delta.y > SWIPE_THRESHOLD {
        Some(Direction::Down)
    } else if delta.y < -SWIPE_THRESHOLD {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Single-slot mailbox for the heading the player asked for last.
///
/// The slot is overwritten by every recognised input and is read but never
/// cleared by the engine, so at most one unconsumed turn exists at a time.
/// Reversal checks belong to the engine, not here.
#[derive(Debug, Clone)]
pub struct InputMapper {
    pending: Direction,
    touch_origin: Option<Vec2>,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl InputMapper {
    pub fn new() -> Self {
        Self { pending: Direction::Right, touch_origin: None }
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn reset(&mut self) {
        self.pending = Direction::Right;
        self.touch_origin = None;
    }

    pub fn turn(&mut self, dir: Direction) {
        self.pending = dir;
    }

    /// Applies turn keys directly. Pause requests are handed back to the
    /// caller because they touch the game phase, not the heading.
    pub fn key_down(&mut self, key: KeyCode) -> Option<Intent> {
        match intent_for_key(key)? {
            Intent::Turn(dir) => {
                self.turn(dir);
                None
            }
            Intent::TogglePause => Some(Intent::TogglePause),
        }
    }

    pub fn touch_start(&mut self, pos: Vec2) {
        self.touch_origin = Some(pos);
    }

    /// Finishes a swipe. Returns the heading it produced, if any.
    pub fn touch_end(&mut self, pos: Vec2) -> Option<Direction> {
        let origin = self.touch_origin.take()?;
        let dir = swipe_direction(pos - origin)?;
        self.turn(dir);
        Some(dir)
    }

    pub fn cancel_touch(&mut self) {
        self.touch_origin = None;
    }

    /// Activation of an on-screen button labelled with a heading.
    pub fn press_button(&mut self, label: &str) -> bool {
        match Direction::from_label(label) {
            Some(dir) => {
                self.turn(dir);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    #[test]
    fn arrows_and_wasd_turn() {
        let mut input = InputMapper::new();
        assert_eq!(input.key_down(KeyCode::W), None);
        assert_eq!(input.pending(), Direction::Up);
        input.key_down(KeyCode::Left);
        assert_eq!(input.pending(), Direction::Left);
        input.key_down(KeyCode::S);
        assert_eq!(input.pending(), Direction::Down);
        input.key_down(KeyCode::D);
        assert_eq!(input.pending(), Direction::Right);
    }

    #[test]
    fn space_is_handed_back_and_keeps_heading() {
        let mut input = InputMapper::new();
        input.key_down(KeyCode::Up);
        assert_eq!(input.key_down(KeyCode::Space), Some(Intent::TogglePause));
        assert_eq!(input.pending(), Direction::Up);
    }

    #[test]
    fn unrelated_keys_ignored() {
        let mut input = InputMapper::new();
        assert_eq!(input.key_down(KeyCode::Q), None);
        assert_eq!(input.pending(), Direction::Right);
    }

    #[test]
    fn reversal_is_not_filtered_here() {
        let mut input = InputMapper::new();
        input.key_down(KeyCode::Left);
        assert_eq!(input.pending(), Direction::Left);
    }

    #[test]
    fn last_write_wins() {
        let mut input = InputMapper::new();
        input.key_down(KeyCode::Up);
        input.press_button("down");
        input.key_down(KeyCode::A);
        assert_eq!(input.pending(), Direction::Left);
    }

    #[test]
    fn swipe_picks_dominant_axis() {
        assert_eq!(swipe_direction(vec2(50.0, 30.0)), Some(Direction::Right));
        assert_eq!(swipe_direction(vec2(-50.0, 30.0)), Some(Direction::Left));
        assert_eq!(swipe_direction(vec2(10.0, -40.0)), Some(Direction::Up));
        assert_eq!(swipe_direction(vec2(10.0, 40.0)), Some(Direction::Down));
    }

    #[test]
    fn diagonal_swipe_goes_vertical() {
        assert_eq!(swipe_direction(vec2(40.0, 40.0)), Some(Direction::Down));
        assert_eq!(swipe_direction(vec2(40.0, -40.0)), Some(Direction::Up));
        assert_eq!(swipe_direction(vec2(-40.0, 40.0)), Some(Direction::Down));
    }

    #[test]
    fn short_swipes_are_taps() {
        assert_eq!(swipe_direction(vec2(20.0, 0.0)), None);
        assert_eq!(swipe_direction(vec2(0.0, -20.0)), None);
        assert_eq!(swipe_direction(vec2(5.0, 3.0)), None);
    }

    #[test]
    fn touch_end_without_start_does_nothing() {
        let mut input = InputMapper::new();
        assert_eq!(input.touch_end(vec2(300.0, 0.0)), None);

        input.touch_start(vec2(100.0, 100.0));
        assert_eq!(input.touch_end(vec2(100.0, 20.0)), Some(Direction::Up));
        assert_eq!(input.pending(), Direction::Up);
        assert_eq!(input.touch_end(vec2(100.0, 300.0)), None);
    }

    #[test]
    fn unknown_button_labels_ignored() {
        let mut input = InputMapper::new();
        assert!(!input.press_button("jump"));
        assert!(input.press_button("up"));
        assert_eq!(input.pending(), Direction::Up);
    }
}
