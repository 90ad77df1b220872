//! One executing attack: Startup → Active → Recovery, counted in ticks.

use super::{AttackState, Contact, DefenseFrames, FrameData, MoveEffects, MoveHeight, MoveTemplate};
use crate::error::{FightError, FightResult};
use crate::movement::{JumpingDirection, MovementEffect};

/// A move instance. Lives in the attacker's `AttackController` slot for
/// exactly one attack attempt and is dropped when Recovery ends or the
/// attack is cancelled.
#[derive(Debug, Clone)]
pub struct Move {
    id: String,
    height: MoveHeight,
    damage: u32,
    frames: FrameData,
    reaction: DefenseFrames,
    effects: MoveEffects,
    elapsed_frames: u32,
    hitbox_enabled: bool,
    /// Set once the hitbox has been reported against the opponent
    connected: bool,
}

impl Move {
    pub fn instantiate(template: &MoveTemplate) -> Self {
        Self {
            id: template.id.clone(),
            height: template.height,
            damage: template.damage,
            frames: template.frames,
            reaction: template.reaction,
            effects: template.effects,
            elapsed_frames: 0,
            hitbox_enabled: false,
            connected: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn height(&self) -> MoveHeight {
        self.height
    }

    pub fn frames(&self) -> FrameData {
        self.frames
    }

    pub fn elapsed_frames(&self) -> u32 {
        self.elapsed_frames
    }

    pub fn hitbox_enabled(&self) -> bool {
        self.hitbox_enabled
    }

    pub fn has_connected(&self) -> bool {
        self.connected
    }

    /// Enter Startup.
    pub fn initialize(&mut self) -> (AttackState, MovementEffect) {
        self.elapsed_frames = 0;
        self.hitbox_enabled = false;
        (AttackState::Startup, self.effects.enter_startup)
    }

    /// Advance the current phase by one frame.
    ///
    /// Returns the phase after the tick and the effect to apply to the
    /// attacker: the next phase's entry effect on a boundary, `Identity`
    /// otherwise. At most one boundary is crossed per call.
    pub fn tick(&mut self, current: AttackState) -> FightResult<(AttackState, MovementEffect)> {
        let (length, next, entry) = match current {
            AttackState::Startup => (
                self.frames.startup,
                AttackState::Active,
                self.effects.enter_active,
            ),
            AttackState::Active => (
                self.frames.active,
                AttackState::Recovery,
                self.effects.enter_recovery,
            ),
            AttackState::Recovery => (self.frames.recovery, AttackState::None, self.effects.end_move),
            other => return Err(FightError::InvalidAttackTick(other)),
        };

        self.elapsed_frames += 1;
        if self.elapsed_frames < length {
            return Ok((current, MovementEffect::Identity));
        }

        self.elapsed_frames = 0;
        self.hitbox_enabled = next == AttackState::Active;
        tracing::debug!(id = %self.id, from = ?current, to = ?next, "move phase");

        Ok((next, entry))
    }

    /// Claim this move's single contact against the opponent.
    ///
    /// Returns `None` outside the Active phase or once the move has already
    /// connected.
    pub fn take_contact(&mut self, knockback: JumpingDirection) -> Option<Contact> {
        if !self.hitbox_enabled || self.connected {
            return None;
        }
        self.connected = true;
        Some(Contact {
            height: self.height,
            damage: self.damage,
            reaction: self.reaction,
            knockback,
        })
    }
}
