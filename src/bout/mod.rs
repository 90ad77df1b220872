//! Two-character bout: the headless stand-in for the scene.
//!
//! Each `Bout::tick`:
//! 1. polls the dummy behaviors and forwards their input
//! 2. ticks Left, then Right
//! 3. turns free characters toward each other
//! 4. hands each enabled hitbox within reach to the opponent as a contact
//!
//! Contacts found on tick N are resolved by the defender on tick N+1.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};

use crate::character::{Character, CharacterSnapshot, InputEvent, Side, TickReport};
use crate::combat::Contact;
use crate::config::FightConfig;
use crate::error::FightResult;
use crate::script::{DummyBehavior, InputScript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoutOutcome {
    #[default]
    InProgress,
    Winner(Side),
    Draw,
}

/// A contact handed from one side's move to the other side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactReport {
    pub attacker: Side,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoutTick {
    pub tick: u64,
    pub left: TickReport,
    pub right: TickReport,
    pub contacts: Vec<ContactReport>,
    pub outcome: BoutOutcome,
}

#[derive(Debug, Clone)]
pub struct Bout {
    left: Character,
    right: Character,
    behaviors: [DummyBehavior; 2],
    reach: f32,
    tick: u64,
    outcome: BoutOutcome,
    history_hash: u64,
}

impl Bout {
    pub fn new(config: &FightConfig) -> FightResult<Self> {
        let roster = config.roster()?;
        let half = config.character.start_distance / 2.0;
        Ok(Self {
            left: Character::new(Side::Left, &roster, Vec2::new(-half, 0.0)),
            right: Character::new(Side::Right, &roster, Vec2::new(half, 0.0)),
            behaviors: [DummyBehavior::Idle; 2],
            reach: config.character.reach,
            tick: 0,
            outcome: BoutOutcome::InProgress,
            history_hash: 0,
        })
    }

    pub fn with_behaviors(mut self, left: DummyBehavior, right: DummyBehavior) -> Self {
        self.behaviors = [left, right];
        self
    }

    pub fn set_behavior(&mut self, side: Side, behavior: DummyBehavior) {
        self.behaviors[index(side)] = behavior;
    }

    pub fn character(&self, side: Side) -> &Character {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn character_mut(&mut self, side: Side) -> &mut Character {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn input(&mut self, side: Side, event: InputEvent) {
        self.character_mut(side).handle_input(event);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn outcome(&self) -> BoutOutcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != BoutOutcome::InProgress
    }

    pub fn tick(&mut self) -> FightResult<BoutTick> {
        for side in [Side::Left, Side::Right] {
            let inputs = self.behaviors[index(side)].inputs(self.tick, self.character(side));
            for event in inputs {
                self.input(side, event);
            }
        }

        let left = self.left.tick()?;
        let right = self.right.tick()?;

        let (left_x, right_x) = (self.left.position().x, self.right.position().x);
        self.left.face_towards(right_x);
        self.right.face_towards(left_x);

        let contacts = self.detect_contacts();

        self.tick += 1;
        self.history_hash = self.chain_hash();
        if self.outcome == BoutOutcome::InProgress {
            self.outcome = match (self.left.is_defeated(), self.right.is_defeated()) {
                (true, true) => BoutOutcome::Draw,
                (true, false) => BoutOutcome::Winner(Side::Right),
                (false, true) => BoutOutcome::Winner(Side::Left),
                (false, false) => BoutOutcome::InProgress,
            };
            if self.outcome != BoutOutcome::InProgress {
                tracing::info!(tick = self.tick, outcome = ?self.outcome, "bout over");
            }
        }

        Ok(BoutTick {
            tick: self.tick,
            left,
            right,
            contacts,
            outcome: self.outcome,
        })
    }

    /// Feed `script` into the bout for up to `ticks` ticks, stopping early when
    /// a side is defeated.
    pub fn run_script(&mut self, script: &InputScript, ticks: u64) -> FightResult<Vec<BoutTick>> {
        let mut out = Vec::new();
        for _ in 0..ticks {
            let inputs: Vec<_> = script.at(self.tick).copied().collect();
            for input in inputs {
                self.input(input.side, input.event);
            }
            out.push(self.tick()?);
            if self.is_over() {
                break;
            }
        }
        Ok(out)
    }

    fn detect_contacts(&mut self) -> Vec<ContactReport> {
        let mut contacts = Vec::new();
        let distance = (self.left.position().x - self.right.position().x).abs();
        if distance > self.reach {
            return contacts;
        }

        for attacker in [Side::Left, Side::Right] {
            let (atk, def) = self.pair_mut(attacker);
            let knockback = atk.movement().facing().forward();
            if let Some(contact) = atk.claim_contact(knockback) {
                tracing::debug!(?attacker, height = ?contact.height, distance, "contact");
                def.report_contact(contact);
                contacts.push(ContactReport { attacker, contact });
            }
        }
        contacts
    }

    fn pair_mut(&mut self, attacker: Side) -> (&mut Character, &mut Character) {
        match attacker {
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        }
    }

    pub fn snapshots(&self) -> [CharacterSnapshot; 2] {
        [self.left.snapshot(), self.right.snapshot()]
    }

    /// Hash of the current observable state of both characters
    pub fn state_hash(&self) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.tick.to_le_bytes());
        for snap in self.snapshots() {
            hasher.update([
                snap.movement as u8,
                snap.attack as u8,
                snap.defense as u8,
                snap.arbiter as u8,
                snap.hitbox_enabled as u8,
            ]);
            hasher.update(snap.position[0].to_bits().to_le_bytes());
            hasher.update(snap.position[1].to_bits().to_le_bytes());
            hasher.update(snap.health.to_le_bytes());
        }
        truncate(&hasher.finalize())
    }

    /// Running hash over every tick so far; equal histories give equal hashes.
    pub fn history_hash(&self) -> u64 {
        self.history_hash
    }

    fn chain_hash(&self) -> u64 {
        let mut hasher = Sha3_256::new();
        hasher.update(self.history_hash.to_le_bytes());
        hasher.update(self.state_hash().to_le_bytes());
        truncate(&hasher.finalize())
    }
}

fn index(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

fn truncate(digest: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AttackState, ContactOutcome, DefenseState, MoveHeight};
    use crate::movement::{JumpingDirection, MovementState};

    fn close_config() -> FightConfig {
        let mut config = FightConfig::default();
        config.character.start_distance = 1.0;
        config
    }

    #[test]
    fn test_bout_starts_facing_each_other() {
        let bout = Bout::new(&FightConfig::default()).unwrap();
        assert_eq!(bout.character(Side::Left).position(), Vec2::new(-1.0, 0.0));
        assert_eq!(bout.character(Side::Right).position(), Vec2::new(1.0, 0.0));
        assert_eq!(bout.outcome(), BoutOutcome::InProgress);
        assert_eq!(bout.tick_count(), 0);
    }

    #[test]
    fn test_out_of_reach_never_connects() {
        let mut bout = Bout::new(&FightConfig::default())
            .unwrap()
            .with_behaviors(DummyBehavior::PunchOnce, DummyBehavior::Idle);
        for _ in 0..30 {
            assert!(bout.tick().unwrap().contacts.is_empty());
        }
        assert_eq!(bout.character(Side::Right).health(), 100);
    }

    #[test]
    fn test_punch_connects_once_and_is_resolved_next_tick() {
        let mut bout = Bout::new(&close_config())
            .unwrap()
            .with_behaviors(DummyBehavior::PunchOnce, DummyBehavior::Idle);

        // 1 tick to initialize, 4 startup ticks
        for _ in 0..4 {
            assert!(bout.tick().unwrap().contacts.is_empty());
        }
        let fifth = bout.tick().unwrap();
        assert_eq!(fifth.left.attack, AttackState::Active);
        assert_eq!(fifth.contacts.len(), 1);
        assert_eq!(fifth.contacts[0].attacker, Side::Left);
        assert_eq!(fifth.contacts[0].contact.height, MoveHeight::Mid);
        assert_eq!(fifth.contacts[0].contact.knockback, JumpingDirection::Right);

        let sixth = bout.tick().unwrap();
        assert_eq!(sixth.right.outcome, Some(ContactOutcome::Hit { damage: 5 }));
        assert_eq!(sixth.right.defense, DefenseState::Hit);
        assert_eq!(sixth.right.movement, MovementState::Landing);
        assert!(sixth.contacts.is_empty(), "second active tick must not reconnect");
        assert_eq!(bout.character(Side::Right).health(), 95);
    }

    #[test]
    fn test_crouch_block_stops_standing_punch() {
        let mut bout = Bout::new(&close_config())
            .unwrap()
            .with_behaviors(DummyBehavior::PunchOnce, DummyBehavior::Idle);
        // Right faces left, so holding +x is holding back
        bout.input(Side::Right, InputEvent::Motion { x: 1.0, y: -1.0 });

        let mut outcomes = Vec::new();
        for _ in 0..10 {
            outcomes.extend(bout.tick().unwrap().right.outcome);
        }
        assert_eq!(outcomes, vec![ContactOutcome::Blocked]);
        assert_eq!(bout.character(Side::Right).health(), 100);
    }

    #[test]
    fn test_simultaneous_punches_trade() {
        let mut bout = Bout::new(&close_config())
            .unwrap()
            .with_behaviors(DummyBehavior::PunchOnce, DummyBehavior::PunchOnce);
        for _ in 0..6 {
            bout.tick().unwrap();
        }
        assert_eq!(bout.character(Side::Left).health(), 95);
        assert_eq!(bout.character(Side::Right).health(), 95);
        assert_eq!(bout.character(Side::Left).attack_state(), AttackState::None);
        assert_eq!(bout.character(Side::Right).attack_state(), AttackState::None);
    }

    #[test]
    fn test_defeat_ends_bout() {
        let mut config = close_config();
        config.character.max_health = 5;
        let mut bout = Bout::new(&config)
            .unwrap()
            .with_behaviors(DummyBehavior::PunchOnce, DummyBehavior::Idle);
        let ticks = bout.run_script(&InputScript::new(), 100).unwrap();
        assert_eq!(ticks.len(), 6);
        assert_eq!(bout.outcome(), BoutOutcome::Winner(Side::Left));
        assert!(bout.is_over());
    }

    #[test]
    fn test_unbounded_budget_runs_until_defeat() {
        let mut config = close_config();
        config.character.max_health = 5;
        let mut bout = Bout::new(&config)
            .unwrap()
            .with_behaviors(DummyBehavior::PunchOnce, DummyBehavior::Idle);
        let ticks = bout.run_script(&InputScript::new(), u64::MAX).unwrap();
        assert_eq!(ticks.len(), 6);
        assert_eq!(bout.outcome(), BoutOutcome::Winner(Side::Left));
    }

    #[test]
    fn test_history_hash_is_deterministic() {
        let run = || {
            let mut bout = Bout::new(&close_config())
                .unwrap()
                .with_behaviors(DummyBehavior::PunchWhenIdle, DummyBehavior::JumpWhenStationary);
            bout.run_script(&InputScript::new(), 120).unwrap();
            bout.history_hash()
        };
        assert_eq!(run(), run());

        let mut other = Bout::new(&close_config()).unwrap();
        other.run_script(&InputScript::new(), 120).unwrap();
        assert_ne!(other.history_hash(), run());
    }
}
