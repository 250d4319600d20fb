//! Display-free game simulation
//!
//! Everything in here is deterministic given an rng and a dt sequence. The
//! host adapters (render, audio, input, persistence) live outside and talk
//! to the simulation only through `GameCore`.

pub mod field;
pub mod input;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use field::{FieldReport, ObstacleField};
pub use input::{Intent, map_key, map_swipe};
pub use score::ScoreEngine;
pub use spawn::SpawnDirector;
pub use state::{GameCore, GameEvent, Phase, Player, SpawnedObject};
