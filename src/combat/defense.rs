//! Defending-side state machine: classify contacts, run block/hit-stun.

use super::{Contact, ContactOutcome, DefenseMove, DefenseState, MoveHeight};
use crate::error::{FightError, FightResult};
use crate::movement::{MovementEffect, MovementState};

/// Block/hit matrix: defender's movement state against the attack height.
///
/// | Height | Reversing | CrouchingBlock | Other   |
/// |--------|-----------|----------------|---------|
/// | High   | PreBlock  | PreHit         | PreHit  |
/// | Mid    | PreBlock  | PreBlock       | PreHit  |
/// | Low    | PreHit    | PreBlock       | PreHit  |
pub fn classify_contact(height: MoveHeight, movement: MovementState) -> DefenseState {
    let blocked = match height {
        MoveHeight::High => movement == MovementState::Reversing,
        MoveHeight::Mid => matches!(
            movement,
            MovementState::Reversing | MovementState::CrouchingBlock
        ),
        MoveHeight::Low => movement == MovementState::CrouchingBlock,
    };

    if blocked {
        DefenseState::PreBlock
    } else {
        DefenseState::PreHit
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefenseController {
    state: DefenseState,
    reaction: Option<DefenseMove>,
    /// Single-slot handoff from the collision collaborator
    pending: Option<Contact>,
    /// Contact classified this tick, waiting for `tick` to start the reaction
    engaged: Option<Contact>,
    outcome: Option<ContactOutcome>,
}

impl DefenseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DefenseState {
        self.state
    }

    pub fn reaction(&self) -> Option<&DefenseMove> {
        self.reaction.as_ref()
    }

    pub fn pending_contact(&self) -> Option<&Contact> {
        self.pending.as_ref()
    }

    /// Collision collaborator: an opposing move entered the hurtbox.
    /// Last report before the next `resolve` wins.
    pub fn report_contact(&mut self, contact: Contact) {
        self.pending = Some(contact);
    }

    /// Consume the pending contact, if any, and classify it.
    pub fn resolve(&mut self, movement: MovementState) -> DefenseState {
        let Some(contact) = self.pending.take() else {
            return self.state;
        };

        match self.state {
            DefenseState::Blocking | DefenseState::Hit => {
                tracing::debug!(state = ?self.state, height = ?contact.height, "contact ignored during reaction");
            }
            _ => {
                self.state = classify_contact(contact.height, movement);
                self.engaged = Some(contact);
                tracing::debug!(height = ?contact.height, ?movement, state = ?self.state, "contact classified");
            }
        }
        self.state
    }

    /// Start or advance the reaction by one tick and return its effect on the defender.
    pub fn tick(&mut self) -> FightResult<MovementEffect> {
        match self.state {
            DefenseState::None => Ok(MovementEffect::Identity),
            DefenseState::PreBlock => self.begin(false),
            DefenseState::PreHit => self.begin(true),
            DefenseState::Blocking | DefenseState::Hit => {
                let reaction = self
                    .reaction
                    .as_mut()
                    .ok_or(FightError::MissingReaction(self.state))?;
                let (state, effect) = reaction.tick(self.state)?;
                self.state = state;
                if state == DefenseState::None {
                    self.reaction = None;
                    tracing::debug!("reaction finished");
                }
                Ok(effect)
            }
        }
    }

    /// How the last started reaction resolved; cleared on read.
    pub fn take_outcome(&mut self) -> Option<ContactOutcome> {
        self.outcome.take()
    }

    fn begin(&mut self, hit: bool) -> FightResult<MovementEffect> {
        let contact = self
            .engaged
            .take()
            .ok_or(FightError::MissingReaction(self.state))?;
        let mut reaction = DefenseMove::instantiate(&contact);

        let (state, effect) = if hit {
            self.outcome = Some(ContactOutcome::Hit {
                damage: contact.damage,
            });
            reaction.initialize_hit()
        } else {
            self.outcome = Some(ContactOutcome::Blocked);
            reaction.initialize_block()
        };

        self.reaction = Some(reaction);
        self.state = state;
        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DefenseFrames;
    use crate::movement::JumpingDirection;

    fn contact(height: MoveHeight) -> Contact {
        Contact {
            height,
            damage: 7,
            reaction: DefenseFrames {
                on_block: 2,
                on_hit: 3,
            },
            knockback: JumpingDirection::Right,
        }
    }

    #[test]
    fn test_classification_matrix() {
        use DefenseState::{PreBlock, PreHit};
        use MovementState::*;

        let table = [
            (MoveHeight::High, Reversing, PreBlock),
            (MoveHeight::High, CrouchingBlock, PreHit),
            (MoveHeight::High, Stationary, PreHit),
            (MoveHeight::Mid, Reversing, PreBlock),
            (MoveHeight::Mid, CrouchingBlock, PreBlock),
            (MoveHeight::Mid, Walking, PreHit),
            (MoveHeight::Low, Reversing, PreHit),
            (MoveHeight::Low, CrouchingBlock, PreBlock),
            (MoveHeight::Low, Crouching, PreHit),
        ];
        for (height, movement, expected) in table {
            assert_eq!(classify_contact(height, movement), expected, "{height:?} vs {movement:?}");
        }
    }

    #[test]
    fn test_resolve_without_contact_is_noop() {
        let mut dc = DefenseController::new();
        assert_eq!(dc.resolve(MovementState::Stationary), DefenseState::None);
        assert!(dc.tick().unwrap().is_identity());
        assert!(dc.take_outcome().is_none());
    }

    #[test]
    fn test_block_reaction_runs_to_completion() {
        let mut dc = DefenseController::new();
        dc.report_contact(contact(MoveHeight::Mid));
        assert_eq!(dc.resolve(MovementState::Reversing), DefenseState::PreBlock);
        assert!(dc.pending_contact().is_none());

        assert_eq!(dc.tick().unwrap(), MovementEffect::DisableMotion);
        assert_eq!(dc.state(), DefenseState::Blocking);
        assert_eq!(dc.take_outcome(), Some(ContactOutcome::Blocked));

        assert!(dc.tick().unwrap().is_identity());
        assert_eq!(dc.tick().unwrap(), MovementEffect::EnableMotion);
        assert_eq!(dc.state(), DefenseState::None);
        assert!(dc.reaction().is_none());
    }

    #[test]
    fn test_hit_reports_damage_and_launches() {
        let mut dc = DefenseController::new();
        dc.report_contact(contact(MoveHeight::Low));
        assert_eq!(dc.resolve(MovementState::Stationary), DefenseState::PreHit);
        assert_eq!(
            dc.tick().unwrap(),
            MovementEffect::Launch(JumpingDirection::Right)
        );
        assert_eq!(dc.state(), DefenseState::Hit);
        assert_eq!(dc.take_outcome(), Some(ContactOutcome::Hit { damage: 7 }));
    }

    #[test]
    fn test_no_hit_stacking() {
        let mut dc = DefenseController::new();
        dc.report_contact(contact(MoveHeight::High));
        dc.resolve(MovementState::Stationary);
        dc.tick().unwrap();
        assert_eq!(dc.state(), DefenseState::Hit);

        dc.report_contact(contact(MoveHeight::Mid));
        assert_eq!(dc.resolve(MovementState::Landing), DefenseState::Hit);
        assert!(dc.pending_contact().is_none());
        dc.take_outcome();

        dc.tick().unwrap();
        dc.tick().unwrap();
        assert_eq!(dc.tick().unwrap(), MovementEffect::EnableMotion);
        assert_eq!(dc.state(), DefenseState::None);
        assert!(dc.take_outcome().is_none());
    }

    #[test]
    fn test_last_contact_report_wins() {
        let mut dc = DefenseController::new();
        dc.report_contact(contact(MoveHeight::Low));
        dc.report_contact(contact(MoveHeight::High));
        assert_eq!(dc.resolve(MovementState::Reversing), DefenseState::PreBlock);
    }
}
