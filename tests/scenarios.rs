//! Frame-exact scenarios for reactions and arbitration

use bevy::math::Vec2;
use frame_duel_core::combat::{
    classify_contact, AttackState, Contact, DefenseFrames, DefenseMove, DefenseState, MoveHeight,
};
use frame_duel_core::movement::{JumpingDirection, MovementEffect, MovementState};
use frame_duel_core::{Character, FightConfig, FightError, Side};

fn character(side: Side) -> Character {
    let roster = FightConfig::default().roster().unwrap();
    Character::new(side, &roster, Vec2::ZERO)
}

#[test]
fn defense_tick_outside_reaction_fails() {
    let contact = Contact {
        height: MoveHeight::Mid,
        damage: 1,
        reaction: DefenseFrames {
            on_block: 2,
            on_hit: 2,
        },
        knockback: JumpingDirection::None,
    };
    let mut reaction = DefenseMove::instantiate(&contact);
    assert!(matches!(
        reaction.tick(DefenseState::PreBlock),
        Err(FightError::InvalidDefenseTick(DefenseState::PreBlock))
    ));
}

#[test]
fn reversing_defender_blocks_mid() {
    assert_eq!(
        classify_contact(MoveHeight::Mid, MovementState::Reversing),
        DefenseState::PreBlock
    );
}

#[test]
fn idle_character_tick_is_idempotent() {
    let mut c = character(Side::Left);
    for _ in 0..10 {
        let report = c.tick().unwrap();
        assert_eq!(report.attack, AttackState::None);
        assert_eq!(report.defense, DefenseState::None);
        assert!(report.effect.is_identity());
    }
    assert_eq!(c.position(), Vec2::ZERO);
}

#[test]
fn active_attacker_is_preempted_by_hit() {
    let mut attacker = character(Side::Left);
    attacker.light_punch();
    while attacker.attack_state() != AttackState::Active {
        attacker.tick().unwrap();
    }
    let contact = attacker.claim_contact(JumpingDirection::Right).unwrap();

    let mut defender = character(Side::Right);
    defender.light_punch();
    while defender.attack_state() != AttackState::Active {
        defender.tick().unwrap();
    }
    defender.report_contact(contact);

    let report = defender.tick().unwrap();
    assert_eq!(report.attack, AttackState::None);
    assert_eq!(report.defense, DefenseState::Hit);
    assert!(defender.arbiter().attack().current_move().is_none());
    assert_eq!(report.effect, MovementEffect::Launch(JumpingDirection::Right));
    assert_eq!(defender.health(), 95);
}

#[test]
fn air_punch_turns_jump_into_landing() {
    let mut c = character(Side::Left);
    c.motion(Vec2::new(0.0, 1.0));
    c.motion(Vec2::ZERO);
    for _ in 0..5 {
        c.tick().unwrap();
    }
    c.light_punch();
    let report = c.tick().unwrap();
    assert_eq!(report.attack, AttackState::Startup);
    assert_eq!(report.movement, MovementState::Landing);
    assert_eq!(
        c.arbiter().attack().current_move().unwrap().id(),
        "light_punch_jumping"
    );

    let mut guard = 0;
    while c.attack_state() != AttackState::None || c.movement_state() != MovementState::Stationary {
        c.tick().unwrap();
        guard += 1;
        assert!(guard < 200, "character never recovered");
    }
    assert_eq!(c.position().y, 0.0);
}
