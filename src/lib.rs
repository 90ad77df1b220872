//! Frame Duel - Fighting-game Character Core
//!
//! Deterministic, frame-exact logic for two-character fighting games:
//! - Movement regimes (grounded, crouching, airborne) and the effect interpreter
//! - Move frame data (startup / active / recovery) with hitbox windows
//! - Attack and defense state machines, arbitrated per tick
//! - Block/hit classification by move height and defender stance
//! - Bouts, training-dummy scripts and a determinism hash
//! - Bevy plugin for fixed-timestep integration

pub mod bout;
pub mod character;
pub mod combat;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod movement;
pub mod plugin;
pub mod script;

pub use bout::{Bout, BoutOutcome, BoutTick};
pub use character::{Character, CharacterSnapshot, InputEvent, Side};
pub use config::FightConfig;
pub use error::{FightError, FightResult};
pub use plugin::FightPlugin;
