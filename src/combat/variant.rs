//! Stance-dependent move selection.

use serde::{Deserialize, Serialize};

use super::{MoveId, MoveLibrary};
use crate::error::FightResult;
use crate::movement::MovementState;

/// The acting character's stance, as far as move selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    Standing,
    Crouching,
    Jumping,
}

impl Stance {
    /// Disabled, landing and crouch-disabled characters have no stance.
    pub fn of(state: MovementState) -> Option<Stance> {
        match state {
            MovementState::Reversing | MovementState::Stationary | MovementState::Walking => {
                Some(Stance::Standing)
            }
            MovementState::Crouching | MovementState::CrouchingBlock => Some(Stance::Crouching),
            MovementState::Jumping => Some(Stance::Jumping),
            MovementState::Disabled
            | MovementState::Landing
            | MovementState::CrouchingDisabled => None,
        }
    }
}

/// Template names per stance, as written in config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub standing: String,
    pub crouching: String,
    pub jumping: String,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            standing: "light_punch_standing".into(),
            crouching: "light_punch_crouching".into(),
            jumping: "light_punch_jumping".into(),
        }
    }
}

/// Immutable stance → template mapping, resolved against one library.
///
/// Every stance is bound at construction; a name missing from the library is
/// an authoring error reported by `Variant::resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    standing: MoveId,
    crouching: MoveId,
    jumping: MoveId,
}

impl Variant {
    pub fn resolve(config: &VariantConfig, library: &MoveLibrary) -> FightResult<Self> {
        Ok(Self {
            standing: library.id_of(&config.standing)?,
            crouching: library.id_of(&config.crouching)?,
            jumping: library.id_of(&config.jumping)?,
        })
    }

    pub fn for_stance(&self, stance: Stance) -> MoveId {
        match stance {
            Stance::Standing => self.standing,
            Stance::Crouching => self.crouching,
            Stance::Jumping => self.jumping,
        }
    }

    pub fn select(&self, state: MovementState) -> Option<MoveId> {
        Stance::of(state).map(|stance| self.for_stance(stance))
    }
}
