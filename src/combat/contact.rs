//! The collision record handed from an attacker's move to the defender.

use serde::{Deserialize, Serialize};

use super::{DefenseFrames, MoveHeight};
use crate::movement::JumpingDirection;

/// "An opposing move with this height entered my hurtbox."
///
/// Carries everything the defender needs to react without holding a
/// reference to the attacker's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub height: MoveHeight,
    pub damage: u32,
    pub reaction: DefenseFrames,
    /// Drift direction if the contact launches the defender
    pub knockback: JumpingDirection,
}

/// How a contact was resolved once the defender's reaction started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    Blocked,
    Hit { damage: u32 },
}
