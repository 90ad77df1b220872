//! Movement effects: the one value that crosses from attack and defense into
//! movement.
//!
//! Moves and defense reactions never touch a `MovementController` directly.
//! They return a `MovementEffect`, and the character applies it exactly once
//! per tick through `MovementController::apply`.

use serde::{Deserialize, Serialize};

use super::JumpingDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementEffect {
    /// Leave movement as it is
    #[default]
    Identity,
    /// Freeze motion: grounded → Disabled, crouching → CrouchingDisabled, jumping → Landing
    DisableMotion,
    /// Inverse of `DisableMotion`
    EnableMotion,
    /// Redirect an airborne character into its landing arc with a new drift;
    /// no-op on the ground
    EnterLanding(JumpingDirection),
    /// Knock the character into the air with motion disabled
    Launch(JumpingDirection),
}

impl MovementEffect {
    pub fn is_identity(&self) -> bool {
        matches!(self, MovementEffect::Identity)
    }
}
