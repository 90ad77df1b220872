//! Movement regimes: per-tick integrators for grounded and airborne motion.
//!
//! A regime reads the tick's input, moves the position and reports the
//! movement state the character should be in afterwards. Regimes never look
//! at attack or defense state.

use bevy::prelude::*;

use super::{Facing, JumpingDirection, MovementParams, MovementState};

/// Walking, reversing, standing still and crouching.
#[derive(Debug, Clone)]
pub struct GroundedMovement {
    pub speed: f32,
    pub dead_zone: f32,
}

impl GroundedMovement {
    pub fn new(params: &MovementParams) -> Self {
        Self {
            speed: params.grounded_speed,
            dead_zone: params.dead_zone,
        }
    }

    /// State selected by a held input axis, without moving.
    pub fn classify(&self, axis: Vec2, facing: Facing) -> MovementState {
        let backing = axis.x.abs() > self.dead_zone && axis.x.signum() != facing.sign();

        if axis.y < -self.dead_zone {
            return if backing {
                MovementState::CrouchingBlock
            } else {
                MovementState::Crouching
            };
        }

        if axis.x.abs() > self.dead_zone {
            if backing {
                MovementState::Reversing
            } else {
                MovementState::Walking
            }
        } else {
            MovementState::Stationary
        }
    }

    pub fn tick(&self, axis: Vec2, facing: Facing, position: &mut Vec2, delta: f32) -> MovementState {
        let state = self.classify(axis, facing);
        if matches!(state, MovementState::Walking | MovementState::Reversing) {
            position.x += self.speed * delta * axis.x.signum();
        }
        state
    }
}

/// Jump and landing arcs under constant gravity.
///
/// Both arcs integrate the same way; they differ only in the state they land
/// into. A `Jumping` arc lands `Stationary`. A `Landing` arc (motion disabled
/// mid-air, e.g. by an air attack or a launch) lands `Disabled`.
#[derive(Debug, Clone)]
pub struct AirMovement {
    pub gravity: f32,
    pub horizontal_air_speed: f32,
    pub jumping_speed: f32,
    air_time: f32,
}

impl AirMovement {
    pub fn new(params: &MovementParams) -> Self {
        Self {
            gravity: params.gravity,
            horizontal_air_speed: params.horizontal_air_speed,
            jumping_speed: params.jumping_speed,
            air_time: 0.0,
        }
    }

    pub fn air_time(&self) -> f32 {
        self.air_time
    }

    /// Restart the arc from the current height.
    pub fn reset(&mut self) {
        self.air_time = 0.0;
    }

    pub fn tick(
        &mut self,
        state: MovementState,
        direction: JumpingDirection,
        position: &mut Vec2,
        delta: f32,
    ) -> MovementState {
        let landed_state = match state {
            MovementState::Jumping => MovementState::Stationary,
            MovementState::Landing => MovementState::Disabled,
            other => return other,
        };

        self.air_time += delta;
        position.x += direction.sign() * self.horizontal_air_speed * delta;
        position.y += self.jumping_speed * delta - self.gravity * self.air_time * delta;

        if position.y < 0.0 {
            position.y = 0.0;
            self.air_time = 0.0;
            return landed_state;
        }

        state
    }
}
