//! Per-tick priority between attacking and defending.

use serde::{Deserialize, Serialize};

use super::{AttackController, AttackState, DefenseController};
use crate::error::FightResult;
use crate::movement::{MovementEffect, MovementState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArbiterState {
    #[default]
    None,
    Attacking,
    Defending,
}

/// Owns both sides of a character's combat and decides which one runs.
///
/// Defense always wins: a contact that is being blocked or taken cancels
/// any attack in progress on the same tick.
#[derive(Debug, Clone)]
pub struct Arbiter {
    state: ArbiterState,
    attack: AttackController,
    defense: DefenseController,
}

impl Arbiter {
    pub fn new(attack: AttackController, defense: DefenseController) -> Self {
        Self {
            state: ArbiterState::None,
            attack,
            defense,
        }
    }

    pub fn state(&self) -> ArbiterState {
        self.state
    }

    pub fn attack(&self) -> &AttackController {
        &self.attack
    }

    pub fn attack_mut(&mut self) -> &mut AttackController {
        &mut self.attack
    }

    pub fn defense(&self) -> &DefenseController {
        &self.defense
    }

    pub fn defense_mut(&mut self) -> &mut DefenseController {
        &mut self.defense
    }

    /// Resolve defense, then attack, then pick the side that owns this tick.
    pub fn resolve(&mut self, movement: MovementState) -> FightResult<ArbiterState> {
        let defense = self.defense.resolve(movement);
        let attack = self.attack.resolve(movement)?;

        self.state = if defense.is_engaged() {
            if attack != AttackState::None {
                tracing::debug!(?attack, ?defense, "defense preempts attack");
                self.attack.cancel();
            }
            ArbiterState::Defending
        } else if attack != AttackState::None {
            ArbiterState::Attacking
        } else {
            ArbiterState::None
        };

        Ok(self.state)
    }

    /// Advance whichever side won arbitration by one frame.
    pub fn tick(&mut self) -> FightResult<MovementEffect> {
        match self.state {
            ArbiterState::Attacking => self.attack.tick(),
            ArbiterState::Defending => self.defense.tick(),
            ArbiterState::None => Ok(MovementEffect::Identity),
        }
    }
}
