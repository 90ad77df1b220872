//! Defender-side reaction timer (block-stun / hit-stun).

use super::{Contact, DefenseFrames, DefenseState};
use crate::error::{FightError, FightResult};
use crate::movement::{JumpingDirection, MovementEffect};

#[derive(Debug, Clone)]
pub struct DefenseMove {
    frames: DefenseFrames,
    knockback: JumpingDirection,
    elapsed_frames: u32,
}

impl DefenseMove {
    pub fn instantiate(contact: &Contact) -> Self {
        Self {
            frames: contact.reaction,
            knockback: contact.knockback,
            elapsed_frames: 0,
        }
    }

    pub fn elapsed_frames(&self) -> u32 {
        self.elapsed_frames
    }

    pub fn initialize_block(&mut self) -> (DefenseState, MovementEffect) {
        self.elapsed_frames = 0;
        (DefenseState::Blocking, MovementEffect::DisableMotion)
    }

    pub fn initialize_hit(&mut self) -> (DefenseState, MovementEffect) {
        self.elapsed_frames = 0;
        (DefenseState::Hit, MovementEffect::Launch(self.knockback))
    }

    pub fn tick_block(&mut self) -> (DefenseState, MovementEffect) {
        self.advance(self.frames.on_block, DefenseState::Blocking)
    }

    pub fn tick_hit(&mut self) -> (DefenseState, MovementEffect) {
        self.advance(self.frames.on_hit, DefenseState::Hit)
    }

    /// Dispatch on the current reaction state.
    pub fn tick(&mut self, current: DefenseState) -> FightResult<(DefenseState, MovementEffect)> {
        match current {
            DefenseState::Blocking => Ok(self.tick_block()),
            DefenseState::Hit => Ok(self.tick_hit()),
            other => Err(FightError::InvalidDefenseTick(other)),
        }
    }

    fn advance(&mut self, length: u32, current: DefenseState) -> (DefenseState, MovementEffect) {
        self.elapsed_frames += 1;
        if self.elapsed_frames >= length {
            return (DefenseState::None, MovementEffect::EnableMotion);
        }
        (current, MovementEffect::Identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MoveHeight;

    fn contact(on_block: u32, on_hit: u32) -> Contact {
        Contact {
            height: MoveHeight::Mid,
            damage: 5,
            reaction: DefenseFrames { on_block, on_hit },
            knockback: JumpingDirection::Left,
        }
    }

    #[test]
    fn test_block_stun_length() {
        let mut dm = DefenseMove::instantiate(&contact(3, 10));
        let (state, effect) = dm.initialize_block();
        assert_eq!(state, DefenseState::Blocking);
        assert_eq!(effect, MovementEffect::DisableMotion);

        assert_eq!(dm.tick_block(), (DefenseState::Blocking, MovementEffect::Identity));
        assert_eq!(dm.tick_block(), (DefenseState::Blocking, MovementEffect::Identity));
        assert_eq!(dm.tick_block(), (DefenseState::None, MovementEffect::EnableMotion));
    }

    #[test]
    fn test_hit_launches_with_knockback() {
        let mut dm = DefenseMove::instantiate(&contact(3, 2));
        let (state, effect) = dm.initialize_hit();
        assert_eq!(state, DefenseState::Hit);
        assert_eq!(effect, MovementEffect::Launch(JumpingDirection::Left));

        assert_eq!(dm.tick_hit().0, DefenseState::Hit);
        assert_eq!(dm.tick_hit(), (DefenseState::None, MovementEffect::EnableMotion));
    }

    #[test]
    fn test_zero_stun_ends_on_first_tick() {
        let mut dm = DefenseMove::instantiate(&contact(0, 0));
        dm.initialize_block();
        assert_eq!(dm.tick_block().0, DefenseState::None);
    }

    #[test]
    fn test_tick_outside_reaction_fails() {
        let mut dm = DefenseMove::instantiate(&contact(3, 3));
        for state in [DefenseState::None, DefenseState::PreBlock, DefenseState::PreHit] {
            assert!(matches!(
                dm.tick(state),
                Err(FightError::InvalidDefenseTick(s)) if s == state
            ));
        }
        assert!(dm.tick(DefenseState::Hit).is_ok());
    }
}
