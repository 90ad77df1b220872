//! Attacking-side state machine with a single-slot input buffer.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AttackState, Move, MoveId, MoveLibrary, Stance, Variant};
use crate::error::{FightError, FightResult};
use crate::movement::{MovementEffect, MovementState};

/// A pending attack request, held until the next `resolve`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackIntent {
    /// Light punch for whatever stance the character is in
    LightPunch,
    /// Light punch for a fixed stance, regardless of movement state
    ForcedLightPunch(Stance),
}

#[derive(Debug, Clone)]
pub struct AttackController {
    state: AttackState,
    current: Option<Move>,
    buffered: Option<AttackIntent>,
    light_punch: Variant,
    library: Arc<MoveLibrary>,
}

impl AttackController {
    pub fn new(library: Arc<MoveLibrary>, light_punch: Variant) -> Self {
        Self {
            state: AttackState::None,
            current: None,
            buffered: None,
            light_punch,
            library,
        }
    }

    pub fn state(&self) -> AttackState {
        self.state
    }

    pub fn current_move(&self) -> Option<&Move> {
        self.current.as_ref()
    }

    pub fn current_move_mut(&mut self) -> Option<&mut Move> {
        self.current.as_mut()
    }

    pub fn buffered(&self) -> Option<AttackIntent> {
        self.buffered
    }

    /// Buffer an intent. Last write wins; there is only one slot.
    pub fn buffer(&mut self, intent: AttackIntent) {
        if let Some(previous) = self.buffered.replace(intent) {
            tracing::trace!(?previous, ?intent, "buffered intent overwritten");
        }
    }

    pub fn light_punch(&mut self) {
        self.buffer(AttackIntent::LightPunch);
    }

    pub fn standing_light_punch(&mut self) {
        self.buffer(AttackIntent::ForcedLightPunch(Stance::Standing));
    }

    pub fn crouching_light_punch(&mut self) {
        self.buffer(AttackIntent::ForcedLightPunch(Stance::Crouching));
    }

    pub fn jumping_light_punch(&mut self) {
        self.buffer(AttackIntent::ForcedLightPunch(Stance::Jumping));
    }

    /// Promote the buffered intent into a move if the attacker is idle.
    ///
    /// The buffer is always emptied: an intent issued mid-attack, or while
    /// the character has no stance, is dropped rather than queued.
    pub fn resolve(&mut self, movement: MovementState) -> FightResult<AttackState> {
        let Some(intent) = self.buffered.take() else {
            return Ok(self.state);
        };

        if self.state != AttackState::None {
            tracing::debug!(?intent, state = ?self.state, "intent dropped mid-attack");
            return Ok(self.state);
        }

        let Some(id) = self.select(intent, movement) else {
            tracing::debug!(?intent, ?movement, "intent dropped, no stance");
            return Ok(self.state);
        };

        let template = self
            .library
            .get(id)
            .ok_or_else(|| FightError::MissingTemplate(format!("#{}", id.0)))?;
        tracing::debug!(id = %template.id, ?movement, "move instantiated");

        self.current = Some(Move::instantiate(template));
        self.state = AttackState::PreMove;
        Ok(self.state)
    }

    /// Advance the owned move by one tick and return its effect on the attacker.
    pub fn tick(&mut self) -> FightResult<MovementEffect> {
        let effect = match self.state {
            AttackState::None => MovementEffect::Identity,
            AttackState::PreMove => {
                let mv = self
                    .current
                    .as_mut()
                    .ok_or(FightError::MissingMove(self.state))?;
                let (state, effect) = mv.initialize();
                self.state = state;
                effect
            }
            AttackState::Startup | AttackState::Active | AttackState::Recovery => {
                let mv = self
                    .current
                    .as_mut()
                    .ok_or(FightError::MissingMove(self.state))?;
                let (state, effect) = mv.tick(self.state)?;
                self.state = state;
                if state == AttackState::None {
                    self.current = None;
                }
                effect
            }
        };
        Ok(effect)
    }

    /// Drop the current move immediately, without its end-of-move effect.
    pub fn cancel(&mut self) {
        if let Some(mv) = self.current.take() {
            tracing::debug!(id = %mv.id(), state = ?self.state, "move cancelled");
        }
        self.state = AttackState::None;
    }

    fn select(&self, intent: AttackIntent, movement: MovementState) -> Option<MoveId> {
        match intent {
            AttackIntent::LightPunch => self.light_punch.select(movement),
            AttackIntent::ForcedLightPunch(stance) => Some(self.light_punch.for_stance(stance)),
        }
    }
}
