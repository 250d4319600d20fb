//! Lane Rush - a three-lane arcade runner
//!
//! Core modules:
//! - `sim`: Display-free simulation (player physics, spawning, collisions, scoring)
//! - `render`: Canvas-2D flat-shape renderer (wasm only)
//! - `audio`: Procedural sound effects (wasm only)
//! - `persistence`: Best-score scalar storage
//! - `settings`: Audio/accessibility preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod persistence;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;

pub use persistence::BestScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical field size (renderer scales to the canvas)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Maximum dt applied in a single advance - bounds physics error when the
    /// host frame stalls (tab switch, GC pause)
    pub const MAX_STEP: f32 = 0.033;

    /// Horizontal distance between adjacent lane centers
    pub const LANE_SPACING: f32 = 180.0;

    /// Player collision extents and resting height
    pub const PLAYER_WIDTH: f32 = 70.0;
    pub const PLAYER_HEIGHT: f32 = 90.0;
    pub const PLAYER_GROUND_Y: f32 = FIELD_HEIGHT - 110.0;

    /// Vertical physics (y grows downward, so the jump impulse is negative)
    pub const GRAVITY: f32 = 2200.0;
    pub const JUMP_IMPULSE: f32 = -900.0;

    /// Exponential smoothing rate for lane-change interpolation
    pub const LANE_SMOOTH_RATE: f32 = 8.0;

    /// Spawn interval ramp: starts at 0.9s, shrinks 0.04s per elapsed
    /// second, floored at 0.42s
    pub const SPAWN_INTERVAL_START: f32 = 0.9;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.42;
    pub const SPAWN_RAMP_PER_SEC: f32 = 0.04;

    /// Kind selection: 65% lane-anchored falling objects, of which 78% are
    /// obstacles (the rest stars); otherwise a crossing cat
    pub const P_FALLING: f32 = 0.65;
    pub const P_OBSTACLE_GIVEN_FALLING: f32 = 0.78;

    /// Falling object kinematics
    pub const FALL_SPEED_MIN: f32 = 240.0;
    pub const FALL_SPEED_MAX: f32 = 340.0;
    pub const FALLING_SPAWN_Y: f32 = -40.0;
    pub const FALLING_RADIUS: f32 = 28.0;
    /// Falling objects are culled past this line
    pub const FALLING_CULL_Y: f32 = FIELD_HEIGHT + 60.0;

    /// Crossing cat kinematics
    pub const CAT_SPEED_MIN: f32 = 120.0;
    pub const CAT_SPEED_MAX: f32 = 160.0;
    pub const CAT_Y: f32 = FIELD_HEIGHT - 96.0;
    pub const CAT_WIDTH: f32 = 100.0;
    pub const CAT_HEIGHT: f32 = 50.0;
    /// Cats enter this far beyond the field edge...
    pub const CAT_ENTRY_MARGIN: f32 = 60.0;
    /// ...and are culled this far past the opposite edge
    pub const CAT_CULL_MARGIN: f32 = 120.0;

    /// Obstacle/star hit test: axis-aligned tolerance around both centers
    pub const FALLING_HIT_TOLERANCE: f32 = 36.0;
    /// Cat hit test uses its own half-extents plus this fraction of the
    /// player's box
    pub const CAT_PLAYER_BOX_FRACTION: f32 = 0.3;

    /// Scoring
    pub const BASE_SCORE_RATE: f64 = 20.0;
    pub const STAR_SCORE_BONUS: f64 = 50.0;
    pub const STAR_MULT_STEP: f64 = 0.1;
    pub const MULT_CAP: f64 = 3.0;
}

/// Canonical x-position for a lane index in {-1, 0, 1}
#[inline]
pub fn lane_x(lane: i8) -> f32 {
    consts::FIELD_WIDTH / 2.0 + lane as f32 * consts::LANE_SPACING
}
