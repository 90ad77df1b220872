//! Centralized tuning constants for the duel core.
//!
//! Everything here is a default: `FightConfig` can override movement and
//! character parameters at load time. Frame data for individual moves lives
//! with the move templates in `combat`.

// =====================================================
// Simulation
// =====================================================

/// Fixed simulation rate (one tick = one frame)
pub const TICK_RATE_HZ: u32 = 60;

/// Input dead zone applied to both motion axes
pub const INPUT_DEAD_ZONE: f32 = 0.1;

// =====================================================
// Movement
// =====================================================

/// Grounded walk speed in world units per second
pub const GROUNDED_SPEED: f32 = 3.0;

/// Downward acceleration while airborne
pub const GRAVITY: f32 = 20.0;

/// Horizontal drift speed while airborne
pub const HORIZONTAL_AIR_SPEED: f32 = 2.5;

/// Initial upward speed of a jump or launch
pub const JUMPING_SPEED: f32 = 8.0;

// =====================================================
// Character
// =====================================================

/// Starting health for both combatants
pub const MAX_HEALTH: u32 = 100;

/// Horizontal distance within which an active hitbox connects
pub const HITBOX_REACH: f32 = 1.2;

/// Horizontal distance between the two combatants at the start of a bout
pub const BOUT_START_DISTANCE: f32 = 2.0;
