//! Game state and core simulation types
//!
//! The `GameCore` aggregate owns every piece of mutable session state; the
//! host holds exactly one and drives it through intents and `advance`.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::field::ObstacleField;
use super::score::ScoreEngine;
use super::spawn::SpawnDirector;
use crate::consts::*;
use crate::lane_x;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, idle player pose only
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; field layout stays frozen on screen
    Over,
}

/// One-shot side-effect signals, drained by the host after each frame.
///
/// Each fires at most once per triggering event per tick; the audio and
/// persistence adapters subscribe and never feed back into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An accepted jump request
    Jump,
    /// A star was consumed
    StarCollected,
    /// A run-ending hit; the session is now `Over`
    FatalCollision,
    /// Best score increased; the adapter should persist the new value
    NewBestScore(u64),
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Occupied lane in {-1, 0, 1}
    pub lane: i8,
    /// Continuous position; x interpolates toward the lane center
    pub pos: Vec2,
    /// Canonical x of the target lane
    pub target_x: f32,
    /// Vertical velocity (positive = downward)
    pub vy: f32,
    pub grounded: bool,
    /// Seconds of hit immunity left; decays to zero and stays there
    pub invulnerable_remaining: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            lane: 0,
            pos: Vec2::new(lane_x(0), PLAYER_GROUND_Y),
            target_x: lane_x(0),
            vy: 0.0,
            grounded: true,
            invulnerable_remaining: 0.0,
        }
    }

    /// Shift toward an adjacent lane. Deltas are clamped, never rejected.
    pub fn shift_lane(&mut self, dir: i8) {
        self.lane = self.lane.saturating_add(dir).clamp(-1, 1);
        self.target_x = lane_x(self.lane);
    }

    /// Begin a jump. Returns whether the request was accepted; an airborne
    /// request is a silent no-op.
    pub fn request_jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vy = JUMP_IMPULSE;
        self.grounded = false;
        true
    }

    /// Integrate one step of lateral smoothing and vertical physics.
    pub fn advance(&mut self, dt: f32) {
        self.pos.x += (self.target_x - self.pos.x) * (dt * LANE_SMOOTH_RATE).min(1.0);

        if !self.grounded {
            self.vy += GRAVITY * dt;
            self.pos.y += self.vy * dt;
            if self.pos.y >= PLAYER_GROUND_Y {
                self.pos.y = PLAYER_GROUND_Y;
                self.vy = 0.0;
                self.grounded = true;
            }
        }

        if self.invulnerable_remaining > 0.0 {
            self.invulnerable_remaining = (self.invulnerable_remaining - dt).max(0.0);
        }
    }
}

/// A live object in the field. Objects never change kind after creation:
/// lane-anchored kinds fall, cats cross horizontally at fixed height.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnedObject {
    Obstacle {
        lane: i8,
        pos: Vec2,
        fall_speed: f32,
        radius: f32,
    },
    Star {
        lane: i8,
        pos: Vec2,
        fall_speed: f32,
        radius: f32,
    },
    Cat {
        pos: Vec2,
        vx: f32,
        dir: i8,
        width: f32,
        height: f32,
    },
}

impl SpawnedObject {
    pub fn obstacle(lane: i8, fall_speed: f32) -> Self {
        Self::Obstacle {
            lane,
            pos: Vec2::new(lane_x(lane), FALLING_SPAWN_Y),
            fall_speed,
            radius: FALLING_RADIUS,
        }
    }

    pub fn star(lane: i8, fall_speed: f32) -> Self {
        Self::Star {
            lane,
            pos: Vec2::new(lane_x(lane), FALLING_SPAWN_Y),
            fall_speed,
            radius: FALLING_RADIUS,
        }
    }

    /// A cat entering from the edge matching `dir` (+1 enters on the left
    /// moving right, -1 enters on the right moving left).
    pub fn cat(dir: i8, speed: f32) -> Self {
        let x = if dir < 0 {
            FIELD_WIDTH + CAT_ENTRY_MARGIN
        } else {
            -CAT_ENTRY_MARGIN
        };
        Self::Cat {
            pos: Vec2::new(x, CAT_Y),
            vx: dir as f32 * speed,
            dir,
            width: CAT_WIDTH,
            height: CAT_HEIGHT,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match *self {
            Self::Obstacle { pos, .. } | Self::Star { pos, .. } | Self::Cat { pos, .. } => pos,
        }
    }

    /// Advance by this object's own kinematic rule.
    pub fn advance(&mut self, dt: f32) {
        match self {
            Self::Obstacle {
                pos, fall_speed, ..
            }
            | Self::Star {
                pos, fall_speed, ..
            } => pos.y += *fall_speed * dt,
            Self::Cat { pos, vx, .. } => pos.x += *vx * dt,
        }
    }

    /// True once the object has left the play bounds and must be removed.
    pub fn is_off_field(&self) -> bool {
        match self {
            Self::Obstacle { pos, .. } | Self::Star { pos, .. } => pos.y > FALLING_CULL_Y,
            Self::Cat { pos, .. } => {
                pos.x < -CAT_CULL_MARGIN || pos.x > FIELD_WIDTH + CAT_CULL_MARGIN
            }
        }
    }
}

/// Complete session state: player, field, spawner, score, and the session
/// phase machine. Constructed once at host startup; everything except the
/// best score is rebuilt on every transition into `Playing`.
pub struct GameCore {
    pub phase: Phase,
    /// Play time of the current session, in seconds
    pub elapsed: f32,
    pub player: Player,
    pub field: ObstacleField,
    pub spawner: SpawnDirector,
    pub score: ScoreEngine,
    /// Monotone across sessions; loaded by the host at startup
    pub best_score: u64,
    pub(crate) rng: Box<dyn RngCore>,
    events: Vec<GameEvent>,
}

impl GameCore {
    /// Create a core in the menu phase with a seeded spawn stream.
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self::with_rng(Box::new(Pcg32::seed_from_u64(seed)), best_score)
    }

    /// Create a core with an explicit random source. Tests substitute a
    /// fixed or scripted sequence here.
    pub fn with_rng(rng: Box<dyn RngCore>, best_score: u64) -> Self {
        Self {
            phase: Phase::Menu,
            elapsed: 0.0,
            player: Player::new(),
            field: ObstacleField::new(),
            spawner: SpawnDirector::new(),
            score: ScoreEngine::new(),
            best_score,
            rng,
            events: Vec::new(),
        }
    }

    /// Full per-session reset: no state carries over into a new run.
    fn reset_session(&mut self) {
        self.elapsed = 0.0;
        self.player = Player::new();
        self.field.clear();
        self.spawner.reset();
        self.score.reset();
    }

    /// Menu/Over -> Playing
    pub fn start_session(&mut self) {
        self.reset_session();
        self.phase = Phase::Playing;
        log::info!("session started (best {})", self.best_score);
    }

    /// Over -> Playing; same full reset as a fresh start
    pub fn retry_session(&mut self) {
        self.start_session();
    }

    /// -> Menu; the field is left as-is, the renderer shows only the idle
    /// player pose and the next start resets everything anyway
    pub fn return_to_menu(&mut self) {
        self.phase = Phase::Menu;
    }

    /// Lane-shift intent from the input adapter. Ignored outside play.
    pub fn shift_lane(&mut self, dir: i8) {
        if self.phase != Phase::Playing {
            return;
        }
        self.player.shift_lane(dir);
    }

    /// Jump intent from the input adapter. Ignored outside play; exactly one
    /// `Jump` event fires per accepted request.
    pub fn request_jump(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        if self.player.request_jump() {
            self.events.push(GameEvent::Jump);
        }
    }

    /// Playing -> Over: freeze ticking, keep the field layout, raise the
    /// best score and signal the persistence adapter when it moved.
    pub(crate) fn enter_over(&mut self) {
        self.phase = Phase::Over;
        self.events.push(GameEvent::FatalCollision);
        let final_score = self.score.display_score();
        if final_score > self.best_score {
            self.best_score = final_score;
            self.events.push(GameEvent::NewBestScore(final_score));
            log::info!("new best score: {}", final_score);
        }
        log::info!(
            "game over at {:.1}s: score {} (best {})",
            self.elapsed,
            final_score,
            self.best_score
        );
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the pending one-shot signals, oldest first. The host drains
    /// these once per frame after `advance`.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Integer score shown on the HUD and compared against the best.
    pub fn display_score(&self) -> u64 {
        self.score.display_score()
    }

    pub fn multiplier(&self) -> f64 {
        self.score.multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_starts_grounded_center_lane() {
        let p = Player::new();
        assert_eq!(p.lane, 0);
        assert!(p.grounded);
        assert_eq!(p.vy, 0.0);
        assert_eq!(p.pos, Vec2::new(480.0, PLAYER_GROUND_Y));
    }

    #[test]
    fn test_shift_lane_clamps() {
        let mut p = Player::new();
        p.shift_lane(-1);
        p.shift_lane(-1);
        p.shift_lane(-1);
        assert_eq!(p.lane, -1);
        assert_eq!(p.target_x, lane_x(-1));
        p.shift_lane(5); // out-of-range deltas clamp too
        assert_eq!(p.lane, 1);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut p = Player::new();
        assert!(p.request_jump());
        assert!(!p.grounded);
        assert_eq!(p.vy, JUMP_IMPULSE);
        // Airborne request is a silent no-op
        let vy = p.vy;
        assert!(!p.request_jump());
        assert_eq!(p.vy, vy);
    }

    #[test]
    fn test_jump_arc_lands_exactly_on_ground() {
        let mut p = Player::new();
        p.request_jump();
        let mut steps = 0;
        while !p.grounded && steps < 1000 {
            p.advance(1.0 / 60.0);
            assert!(p.pos.y <= PLAYER_GROUND_Y);
            steps += 1;
        }
        assert!(p.grounded);
        assert_eq!(p.pos.y, PLAYER_GROUND_Y);
        assert_eq!(p.vy, 0.0);
    }

    #[test]
    fn test_lane_interpolation_no_overshoot() {
        let mut p = Player::new();
        p.shift_lane(1);
        let mut last = p.pos.x;
        for _ in 0..200 {
            p.advance(1.0 / 30.0);
            assert!(p.pos.x >= last);
            assert!(p.pos.x <= lane_x(1));
            last = p.pos.x;
        }
        assert!((p.pos.x - lane_x(1)).abs() < 1.0);
    }

    #[test]
    fn test_invulnerability_decays_to_zero() {
        let mut p = Player::new();
        p.invulnerable_remaining = 0.05;
        p.advance(0.033);
        assert!(p.invulnerable_remaining > 0.0);
        p.advance(0.033);
        assert_eq!(p.invulnerable_remaining, 0.0);
        p.advance(0.033);
        assert_eq!(p.invulnerable_remaining, 0.0);
    }

    proptest! {
        /// For any dt sequence within the max step the player never sinks
        /// below ground, and `grounded` flips exactly at ground contact.
        #[test]
        fn prop_never_below_ground(
            dts in proptest::collection::vec(0.0f32..MAX_STEP, 1..200),
            jump_at in 0usize..50,
        ) {
            let mut p = Player::new();
            for (i, dt) in dts.iter().enumerate() {
                if i == jump_at {
                    p.request_jump();
                }
                p.advance(*dt);
                prop_assert!(p.pos.y <= PLAYER_GROUND_Y);
                prop_assert_eq!(p.grounded, p.pos.y == PLAYER_GROUND_Y && p.vy == 0.0);
            }
        }
    }

    #[test]
    fn test_start_session_fully_resets() {
        let mut core = GameCore::new(7, 123);
        core.start_session();
        core.player.shift_lane(1);
        core.request_jump();
        core.field.push(SpawnedObject::obstacle(0, 300.0));
        core.score.collect_star();
        core.advance(0.02);
        core.enter_over();
        assert_eq!(core.phase, Phase::Over);
        assert!(!core.field.is_empty()); // final layout stays visible

        core.retry_session();
        assert_eq!(core.phase, Phase::Playing);
        assert_eq!(core.display_score(), 0);
        assert_eq!(core.multiplier(), 1.0);
        assert_eq!(core.score.stars(), 0);
        assert!(core.field.is_empty());
        assert_eq!(core.player.lane, 0);
        assert!(core.player.grounded);
        assert_eq!(core.player.vy, 0.0);
        assert_eq!(core.elapsed, 0.0);
        // Best score survives the reset
        assert_eq!(core.best_score, 123);
    }

    #[test]
    fn test_jump_event_fires_once_per_accepted_request() {
        let mut core = GameCore::new(1, 0);
        core.start_session();
        core.drain_events();
        core.request_jump();
        core.request_jump(); // airborne, rejected
        let events = core.drain_events();
        assert_eq!(events, vec![GameEvent::Jump]);
    }

    #[test]
    fn test_intents_ignored_outside_play() {
        let mut core = GameCore::new(1, 0);
        core.shift_lane(1);
        core.request_jump();
        assert_eq!(core.player.lane, 0);
        assert!(core.player.grounded);
        assert!(core.drain_events().is_empty());
    }

    #[test]
    fn test_best_score_event_only_on_improvement() {
        let mut core = GameCore::new(1, 0);
        core.start_session();
        for _ in 0..100 {
            core.advance(0.02);
        }
        core.drain_events();
        core.enter_over();
        let events = core.drain_events();
        let best = core.best_score;
        assert!(best > 0);
        assert!(events.contains(&GameEvent::FatalCollision));
        assert!(events.contains(&GameEvent::NewBestScore(best)));

        // A worse run leaves the best untouched and silent
        core.retry_session();
        core.advance(0.02);
        core.drain_events();
        core.enter_over();
        let events = core.drain_events();
        assert_eq!(core.best_score, best);
        assert_eq!(events, vec![GameEvent::FatalCollision]);
    }

    #[test]
    fn test_cat_enters_from_matching_edge() {
        let left = SpawnedObject::cat(1, 140.0);
        let right = SpawnedObject::cat(-1, 140.0);
        assert_eq!(left.pos().x, -CAT_ENTRY_MARGIN);
        assert_eq!(right.pos().x, FIELD_WIDTH + CAT_ENTRY_MARGIN);
        match right {
            SpawnedObject::Cat { vx, .. } => assert!(vx < 0.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_objects_cull_past_bounds() {
        let mut falling = SpawnedObject::obstacle(0, 300.0);
        assert!(!falling.is_off_field());
        for _ in 0..100 {
            falling.advance(0.033);
        }
        assert!(falling.is_off_field());

        let mut cat = SpawnedObject::cat(-1, 160.0);
        assert!(!cat.is_off_field());
        for _ in 0..250 {
            cat.advance(0.033);
        }
        assert!(cat.is_off_field());
    }
}
