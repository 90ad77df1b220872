//! Character movement: state, position, input and the effect interpreter.
//!
//! `MovementController` is the only owner of a character's movement state
//! and position. It changes them in exactly three ways:
//! - `motion` (input collaborator, between ticks)
//! - `tick` (regime integration, first step of every tick)
//! - `apply` (the movement effect returned by attack or defense, last step)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod effect;
pub mod regime;

pub use effect::MovementEffect;
pub use regime::{AirMovement, GroundedMovement};

use crate::constants::{
    GRAVITY, GROUNDED_SPEED, HORIZONTAL_AIR_SPEED, INPUT_DEAD_ZONE, JUMPING_SPEED,
};

/// Mutually exclusive movement state, one per character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    // Ground movement
    #[default]
    Stationary,
    Walking,
    Reversing,
    Disabled,

    // Air movement
    Jumping,
    Landing,

    // Crouching movement
    Crouching,
    CrouchingBlock,
    CrouchingDisabled,
}

impl MovementState {
    pub fn is_airborne(&self) -> bool {
        matches!(self, MovementState::Jumping | MovementState::Landing)
    }

    /// States in which motion input is read immediately
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            MovementState::Stationary
                | MovementState::Walking
                | MovementState::Reversing
                | MovementState::Crouching
                | MovementState::CrouchingBlock
        )
    }
}

/// Horizontal drift captured at take-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpingDirection {
    Left,
    #[default]
    None,
    Right,
}

impl JumpingDirection {
    pub fn sign(&self) -> f32 {
        match self {
            JumpingDirection::Left => -1.0,
            JumpingDirection::None => 0.0,
            JumpingDirection::Right => 1.0,
        }
    }

    pub fn from_axis(x: f32, dead_zone: f32) -> Self {
        if x > dead_zone {
            JumpingDirection::Right
        } else if x < -dead_zone {
            JumpingDirection::Left
        } else {
            JumpingDirection::None
        }
    }
}

/// Which way the character faces. Walking is toward facing, reversing away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Drift direction pointing the way this faces
    pub fn forward(&self) -> JumpingDirection {
        match self {
            Facing::Left => JumpingDirection::Left,
            Facing::Right => JumpingDirection::Right,
        }
    }
}

/// Physics tuning for both regimes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementParams {
    pub grounded_speed: f32,
    pub gravity: f32,
    pub horizontal_air_speed: f32,
    pub jumping_speed: f32,
    pub dead_zone: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            grounded_speed: GROUNDED_SPEED,
            gravity: GRAVITY,
            horizontal_air_speed: HORIZONTAL_AIR_SPEED,
            jumping_speed: JUMPING_SPEED,
            dead_zone: INPUT_DEAD_ZONE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MovementController {
    state: MovementState,
    position: Vec2,
    axis: Vec2,
    direction: JumpingDirection,
    facing: Facing,
    grounded: GroundedMovement,
    air: AirMovement,
}

impl MovementController {
    pub fn new(params: &MovementParams, facing: Facing, position: Vec2) -> Self {
        Self {
            state: MovementState::Stationary,
            position,
            axis: Vec2::ZERO,
            direction: JumpingDirection::None,
            facing,
            grounded: GroundedMovement::new(params),
            air: AirMovement::new(params),
        }
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn direction(&self) -> JumpingDirection {
        self.direction
    }

    /// Input collaborator: the held motion axis changed.
    ///
    /// The axis is always stored; the state only reacts while motion is
    /// enabled on the ground. Disabled and airborne states keep their state.
    pub fn motion(&mut self, axis: Vec2) {
        self.axis = axis;

        if !self.state.accepts_input() {
            return;
        }

        let dead_zone = self.grounded.dead_zone;
        if axis.y > dead_zone {
            self.direction = JumpingDirection::from_axis(axis.x, dead_zone);
            self.air.reset();
            self.state = MovementState::Jumping;
            tracing::debug!(direction = ?self.direction, "jump");
        } else {
            self.state = self.grounded.classify(axis, self.facing);
        }
    }

    /// Integrate one fixed tick with the regime that owns the current state.
    pub fn tick(&mut self, delta: f32) -> MovementState {
        let previous = self.state;
        self.state = match self.state {
            MovementState::Stationary
            | MovementState::Walking
            | MovementState::Reversing
            | MovementState::Crouching
            | MovementState::CrouchingBlock => {
                self.grounded
                    .tick(self.axis, self.facing, &mut self.position, delta)
            }
            MovementState::Jumping | MovementState::Landing => {
                self.air
                    .tick(self.state, self.direction, &mut self.position, delta)
            }
            MovementState::Disabled | MovementState::CrouchingDisabled => self.state,
        };

        if previous.is_airborne() && !self.state.is_airborne() {
            tracing::debug!(from = ?previous, to = ?self.state, "landed");
        }
        self.state
    }

    /// Interpret a movement effect. Total: every effect is valid in every state.
    pub fn apply(&mut self, effect: MovementEffect) -> MovementState {
        match effect {
            MovementEffect::Identity => {}
            MovementEffect::DisableMotion => self.disable_motion(),
            MovementEffect::EnableMotion => self.enable_motion(),
            MovementEffect::EnterLanding(direction) => {
                if self.state.is_airborne() {
                    self.direction = direction;
                    self.state = MovementState::Landing;
                }
            }
            MovementEffect::Launch(direction) => {
                self.direction = direction;
                self.air.reset();
                self.state = MovementState::Landing;
            }
        }
        self.state
    }

    pub fn disable_motion(&mut self) {
        self.state = match self.state {
            MovementState::Crouching | MovementState::CrouchingBlock => {
                MovementState::CrouchingDisabled
            }
            MovementState::Walking | MovementState::Stationary | MovementState::Reversing => {
                MovementState::Disabled
            }
            MovementState::Jumping => MovementState::Landing,
            other => other,
        };
    }

    pub fn enable_motion(&mut self) {
        self.state = match self.state {
            MovementState::CrouchingDisabled => MovementState::Crouching,
            MovementState::Disabled => MovementState::Stationary,
            MovementState::Landing => MovementState::Jumping,
            other => other,
        };
    }
}
