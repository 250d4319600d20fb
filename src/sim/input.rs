//! Stateless intent mapping
//!
//! Raw device signals (key names, swipe deltas) reduce to two discrete
//! intents. The host adapters debounce to one signal per physical action;
//! everything here is a pure translation.

use super::state::GameCore;

/// A discrete player intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Shift one lane left (-1) or right (+1)
    ShiftLane(i8),
    Jump,
}

/// Minimum swipe travel, in canvas units, before a gesture counts.
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Map a keyboard key (as reported by `KeyboardEvent.key`) to an intent.
pub fn map_key(key: &str) -> Option<Intent> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Intent::ShiftLane(-1)),
        "ArrowRight" | "d" | "D" => Some(Intent::ShiftLane(1)),
        " " | "ArrowUp" | "w" | "W" => Some(Intent::Jump),
        _ => None,
    }
}

/// Map a completed touch swipe to an intent: the dominant axis wins,
/// horizontal swipes shift lanes, an upward swipe jumps.
pub fn map_swipe(dx: f32, dy: f32) -> Option<Intent> {
    if dx.abs() > dy.abs() {
        if dx > SWIPE_THRESHOLD {
            Some(Intent::ShiftLane(1))
        } else if dx < -SWIPE_THRESHOLD {
            Some(Intent::ShiftLane(-1))
        } else {
            None
        }
    } else if dy < -SWIPE_THRESHOLD {
        Some(Intent::Jump)
    } else {
        None
    }
}

impl GameCore {
    /// Dispatch a mapped intent to the player controller.
    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::ShiftLane(dir) => self.shift_lane(dir),
            Intent::Jump => self.request_jump(),
        }
    }
}
