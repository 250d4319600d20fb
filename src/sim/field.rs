//! The live object collection: motion, pruning, and player collision
//!
//! Objects that leave the play bounds are removed before their collision
//! test, so nothing can hit the player on the tick it exits. The field reads
//! the player but never mutates it - hits are reported as outcomes for the
//! session machine and score engine to act on.

use super::state::{Player, SpawnedObject};
use crate::consts::*;

/// What one field tick did to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// Stars consumed this tick (removed from the field, never fatal)
    pub stars_collected: u32,
    /// A non-invulnerable player touched an obstacle or cat. Iteration
    /// halted at the first such hit; any one fatal hit ends the session.
    pub fatal_hit: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleField {
    objects: Vec<SpawnedObject>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: SpawnedObject) {
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn objects(&self) -> &[SpawnedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Advance every object, prune exits, and test collisions against the
    /// just-updated player position.
    pub fn advance(&mut self, player: &Player, dt: f32) -> FieldReport {
        let mut report = FieldReport::default();

        let mut i = 0;
        while i < self.objects.len() {
            self.objects[i].advance(dt);
            if self.objects[i].is_off_field() {
                self.objects.remove(i);
                continue;
            }

            match &self.objects[i] {
                SpawnedObject::Star { .. } => {
                    // Stars are consumed regardless of invulnerability
                    if overlaps_player(&self.objects[i], player) {
                        self.objects.remove(i);
                        report.stars_collected += 1;
                        continue;
                    }
                }
                SpawnedObject::Obstacle { .. } | SpawnedObject::Cat { .. } => {
                    if overlaps_player(&self.objects[i], player)
                        && player.invulnerable_remaining <= 0.0
                    {
                        report.fatal_hit = true;
                        break;
                    }
                }
            }
            i += 1;
        }

        report
    }
}

/// Per-kind tolerance boxes around both centers. Falling objects use a tight
/// fixed tolerance; cats combine their own half-extents with a fraction of
/// the player's box.
fn overlaps_player(object: &SpawnedObject, player: &Player) -> bool {
    let dx = (object.pos().x - player.pos.x).abs();
    let dy = (object.pos().y - player.pos.y).abs();
    match object {
        SpawnedObject::Obstacle { .. } | SpawnedObject::Star { .. } => {
            dx < FALLING_HIT_TOLERANCE && dy < FALLING_HIT_TOLERANCE
        }
        SpawnedObject::Cat { width, height, .. } => {
            dx < width / 2.0 + PLAYER_WIDTH * CAT_PLAYER_BOX_FRACTION
                && dy < height / 2.0 + PLAYER_HEIGHT * CAT_PLAYER_BOX_FRACTION
        }
    }
}
