//! A single combatant: movement, combat arbitration and health.
//!
//! `Character::tick` runs one fixed frame in a fixed order:
//! 1. movement integration
//! 2. defense resolve, attack resolve, priority (inside `Arbiter::resolve`)
//! 3. dispatch one tick to the winning side
//! 4. apply the returned movement effect

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::combat::{
    Arbiter, ArbiterState, AttackController, AttackState, Contact, ContactOutcome,
    DefenseController, DefenseState, MoveLibrary, Variant,
};
use crate::error::FightResult;
use crate::movement::{Facing, JumpingDirection, MovementController, MovementEffect, MovementParams, MovementState};

/// Which end of the stage a character starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Starting facing: both sides face the middle of the stage
    pub fn facing(&self) -> Facing {
        match self {
            Side::Left => Facing::Right,
            Side::Right => Facing::Left,
        }
    }
}

/// Input collaborator events, already mapped from devices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Motion { x: f32, y: f32 },
    LightPunch,
    StandingLightPunch,
    CrouchingLightPunch,
    JumpingLightPunch,
}

/// Everything needed to build a character, shared by both sides
#[derive(Debug, Clone)]
pub struct Roster {
    pub library: Arc<MoveLibrary>,
    pub light_punch: Variant,
    pub movement: MovementParams,
    pub max_health: u32,
    /// Seconds per fixed tick
    pub delta: f32,
}

/// What one tick did to a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub movement: MovementState,
    pub attack: AttackState,
    pub defense: DefenseState,
    pub arbiter: ArbiterState,
    pub effect: MovementEffect,
    pub outcome: Option<ContactOutcome>,
}

/// Read-only telemetry record, one per character per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub side: Side,
    pub tick: u64,
    pub movement: MovementState,
    pub attack: AttackState,
    pub defense: DefenseState,
    pub arbiter: ArbiterState,
    pub position: [f32; 2],
    pub health: u32,
    pub hitbox_enabled: bool,
}

impl CharacterSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Character {
    side: Side,
    movement: MovementController,
    arbiter: Arbiter,
    health: u32,
    delta: f32,
    ticks: u64,
}

impl Character {
    pub fn new(side: Side, roster: &Roster, position: Vec2) -> Self {
        let attack = AttackController::new(Arc::clone(&roster.library), roster.light_punch);
        Self {
            side,
            movement: MovementController::new(&roster.movement, side.facing(), position),
            arbiter: Arbiter::new(attack, DefenseController::new()),
            health: roster.max_health,
            delta: roster.delta,
            ticks: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    pub fn movement_state(&self) -> MovementState {
        self.movement.state()
    }

    pub fn attack_state(&self) -> AttackState {
        self.arbiter.attack().state()
    }

    pub fn defense_state(&self) -> DefenseState {
        self.arbiter.defense().state()
    }

    pub fn position(&self) -> Vec2 {
        self.movement.position()
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn hitbox_enabled(&self) -> bool {
        self.arbiter
            .attack()
            .current_move()
            .is_some_and(|mv| mv.hitbox_enabled())
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let attack = self.arbiter.attack_mut();
        match event {
            InputEvent::Motion { x, y } => self.movement.motion(Vec2::new(x, y)),
            InputEvent::LightPunch => attack.light_punch(),
            InputEvent::StandingLightPunch => attack.standing_light_punch(),
            InputEvent::CrouchingLightPunch => attack.crouching_light_punch(),
            InputEvent::JumpingLightPunch => attack.jumping_light_punch(),
        }
    }

    pub fn motion(&mut self, axis: Vec2) {
        self.movement.motion(axis);
    }

    pub fn light_punch(&mut self) {
        self.arbiter.attack_mut().light_punch();
    }

    /// Collision collaborator: an opposing move touched this character.
    pub fn report_contact(&mut self, contact: Contact) {
        self.arbiter.defense_mut().report_contact(contact);
    }

    /// Claim the current move's contact, if its hitbox is out and has not connected yet.
    pub fn claim_contact(&mut self, knockback: JumpingDirection) -> Option<Contact> {
        self.arbiter
            .attack_mut()
            .current_move_mut()
            .and_then(|mv| mv.take_contact(knockback))
    }

    /// Turn toward the opponent; only while motion is under the player's control.
    pub fn face_towards(&mut self, x: f32) {
        if !self.movement.state().accepts_input() {
            return;
        }
        let dx = x - self.movement.position().x;
        if dx > 0.0 {
            self.movement.set_facing(Facing::Right);
        } else if dx < 0.0 {
            self.movement.set_facing(Facing::Left);
        }
    }

    /// Run one fixed frame.
    pub fn tick(&mut self) -> FightResult<TickReport> {
        let movement = self.movement.tick(self.delta);
        let arbiter = self.arbiter.resolve(movement)?;
        let effect = self.arbiter.tick()?;

        let outcome = self.arbiter.defense_mut().take_outcome();
        if let Some(ContactOutcome::Hit { damage }) = outcome {
            self.health = self.health.saturating_sub(damage);
            tracing::info!(side = ?self.side, damage, health = self.health, "hit");
        }

        let movement = self.movement.apply(effect);
        self.ticks += 1;

        let report = TickReport {
            movement,
            attack: self.attack_state(),
            defense: self.defense_state(),
            arbiter,
            effect,
            outcome,
        };
        tracing::trace!(side = ?self.side, tick = self.ticks, ?report, "tick");
        Ok(report)
    }

    pub fn snapshot(&self) -> CharacterSnapshot {
        let position = self.position();
        CharacterSnapshot {
            side: self.side,
            tick: self.ticks,
            movement: self.movement_state(),
            attack: self.attack_state(),
            defense: self.defense_state(),
            arbiter: self.arbiter.state(),
            position: [position.x, position.y],
            health: self.health,
            hitbox_enabled: self.hitbox_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{DefenseFrames, MoveHeight};
    use crate::config::FightConfig;

    fn character(side: Side) -> Character {
        let roster = FightConfig::default().roster().unwrap();
        Character::new(side, &roster, Vec2::ZERO)
    }

    fn contact(height: MoveHeight, damage: u32) -> Contact {
        Contact {
            height,
            damage,
            reaction: DefenseFrames {
                on_block: 4,
                on_hit: 6,
            },
            knockback: JumpingDirection::Left,
        }
    }

    #[test]
    fn test_idle_tick_is_identity() {
        let mut c = character(Side::Left);
        let report = c.tick().unwrap();
        assert!(report.effect.is_identity());
        assert_eq!(report.attack, AttackState::None);
        assert_eq!(report.defense, DefenseState::None);
        assert_eq!(report.arbiter, ArbiterState::None);
        assert_eq!(report.movement, MovementState::Stationary);
        assert_eq!(c.ticks(), 1);
    }

    #[test]
    fn test_punch_plants_and_releases() {
        let mut c = character(Side::Left);
        c.light_punch();
        let report = c.tick().unwrap();
        assert_eq!(report.attack, AttackState::Startup);
        assert_eq!(report.movement, MovementState::Disabled);

        let mut last = report;
        while last.attack != AttackState::None {
            last = c.tick().unwrap();
        }
        assert_eq!(last.effect, MovementEffect::EnableMotion);
        assert_eq!(last.movement, MovementState::Stationary);
    }

    #[test]
    fn test_blocked_contact_deals_no_damage() {
        let mut c = character(Side::Left);
        c.motion(Vec2::new(-1.0, 0.0));
        c.report_contact(contact(MoveHeight::Mid, 10));
        let report = c.tick().unwrap();
        assert_eq!(report.outcome, Some(ContactOutcome::Blocked));
        assert_eq!(report.defense, DefenseState::Blocking);
        assert_eq!(report.movement, MovementState::Disabled);
        assert_eq!(c.health(), FightConfig::default().character.max_health);
    }

    #[test]
    fn test_hit_damages_and_launches() {
        let mut c = character(Side::Right);
        c.report_contact(contact(MoveHeight::Low, 10));
        let report = c.tick().unwrap();
        assert_eq!(report.outcome, Some(ContactOutcome::Hit { damage: 10 }));
        assert_eq!(report.movement, MovementState::Landing);
        assert_eq!(c.health(), FightConfig::default().character.max_health - 10);
    }

    #[test]
    fn test_health_saturates_at_zero() {
        let mut c = character(Side::Left);
        c.report_contact(contact(MoveHeight::High, 10_000));
        c.tick().unwrap();
        assert_eq!(c.health(), 0);
        assert!(c.is_defeated());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut c = character(Side::Right);
        c.light_punch();
        c.tick().unwrap();
        let snap = c.snapshot();
        assert_eq!(snap.side, Side::Right);
        assert_eq!(snap.tick, 1);
        assert_eq!(snap.attack, AttackState::Startup);
        assert_eq!(snap.arbiter, ArbiterState::Attacking);
        assert!(!snap.hitbox_enabled);
        assert!(snap.to_json().contains("\"Startup\""));
    }

    #[test]
    fn test_face_towards_only_when_free() {
        let mut c = character(Side::Left);
        c.face_towards(-3.0);
        assert_eq!(c.movement().facing(), Facing::Left);

        c.light_punch();
        c.tick().unwrap();
        c.face_towards(3.0);
        assert_eq!(c.movement().facing(), Facing::Left);
    }
}
