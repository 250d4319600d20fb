//! Procedural spawner with a time-ramped difficulty interval
//!
//! The director is the only consumer of randomness in the simulation. It
//! takes the random source as a capability so tests can substitute a fixed
//! stream; the selection ratios and speed ranges are contract values.

use rand::Rng;

use super::state::SpawnedObject;
use crate::consts::*;

/// Decides, once per tick, whether to emit a new object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnDirector {
    /// Time since the last emission
    since_last: f32,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.since_last = 0.0;
    }

    /// Current spawn interval for the given session time: shrinks linearly,
    /// floored so long sessions stay survivable.
    pub fn interval_at(elapsed: f32) -> f32 {
        (SPAWN_INTERVAL_START - elapsed * SPAWN_RAMP_PER_SEC).max(SPAWN_INTERVAL_MIN)
    }

    /// Advance the accumulator; emits at most one object per tick. The
    /// accumulator resets to zero on emission - excess carry is discarded,
    /// so a stalled frame never produces a burst.
    pub fn advance<R: Rng>(
        &mut self,
        elapsed: f32,
        dt: f32,
        rng: &mut R,
    ) -> Option<SpawnedObject> {
        self.since_last += dt;
        if self.since_last <= Self::interval_at(elapsed) {
            return None;
        }
        self.since_last = 0.0;
        Some(Self::roll(rng))
    }

    /// Stochastic kind policy, independent of history:
    /// 65% lane-anchored falling object (78% obstacle / 22% star, lane
    /// uniform, fall speed uniform in [240, 340]), else a crossing cat
    /// (direction uniform, speed uniform in [120, 160]).
    pub fn roll<R: Rng>(rng: &mut R) -> SpawnedObject {
        if rng.random::<f32>() < P_FALLING {
            let lane: i8 = rng.random_range(-1..=1);
            let obstacle = rng.random::<f32>() < P_OBSTACLE_GIVEN_FALLING;
            let fall_speed = rng.random_range(FALL_SPEED_MIN..FALL_SPEED_MAX);
            if obstacle {
                SpawnedObject::obstacle(lane, fall_speed)
            } else {
                SpawnedObject::star(lane, fall_speed)
            }
        } else {
            let dir: i8 = if rng.random_bool(0.5) { -1 } else { 1 };
            let speed = rng.random_range(CAT_SPEED_MIN..CAT_SPEED_MAX);
            SpawnedObject::cat(dir, speed)
        }
    }
}
