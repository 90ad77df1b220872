//! Bevy integration: fighters as components, input and contacts as events,
//! one chained `FixedUpdate` pass per tick.
//!
//! apply input → tick fighters → detect contacts → publish telemetry

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterSnapshot, InputEvent, Roster, Side};
use crate::combat::Contact;
use crate::config::FightConfig;
use crate::error::FightResult;

pub struct FightPlugin {
    settings: FightSettings,
}

impl FightPlugin {
    pub fn new(config: &FightConfig) -> FightResult<Self> {
        Ok(Self {
            settings: FightSettings::from_config(config)?,
        })
    }
}

impl Plugin for FightPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .insert_resource(Time::<Fixed>::from_hz(self.settings.tick_rate as f64))
            .init_resource::<FightTelemetry>()
            .add_event::<FighterInput>()
            .add_event::<ContactEvent>()
            .add_systems(
                FixedUpdate,
                (
                    apply_fighter_input,
                    tick_fighters,
                    detect_contacts,
                    publish_telemetry,
                )
                    .chain(),
            );
    }
}

/// Validated fight settings shared by every fighter
#[derive(Resource, Debug, Clone)]
pub struct FightSettings {
    pub roster: Roster,
    pub tick_rate: u32,
    pub reach: f32,
    pub start_distance: f32,
}

impl FightSettings {
    pub fn from_config(config: &FightConfig) -> FightResult<Self> {
        Ok(Self {
            roster: config.roster()?,
            tick_rate: config.tick_rate,
            reach: config.character.reach,
            start_distance: config.character.start_distance,
        })
    }

    /// A fresh fighter at its side's starting position
    pub fn fighter(&self, side: Side) -> Fighter {
        let half = self.start_distance / 2.0;
        let x = match side {
            Side::Left => -half,
            Side::Right => half,
        };
        Fighter(Character::new(side, &self.roster, Vec2::new(x, 0.0)))
    }
}

#[derive(Component, Debug, Clone)]
pub struct Fighter(pub Character);

/// A fighter whose tick returned an error; it is no longer ticked.
#[derive(Component, Debug, Clone)]
pub struct Faulted(pub String);

/// Device-mapped input for one side
#[derive(Event, Debug, Clone, Copy)]
pub struct FighterInput {
    pub side: Side,
    pub event: InputEvent,
}

/// An attacker's hitbox reached the opponent this tick
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactEvent {
    pub attacker: Side,
    pub contact: Contact,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FightTelemetry {
    pub tick: u64,
    pub snapshots: Vec<CharacterSnapshot>,
    pub contacts: u64,
    pub last_error: Option<String>,
}

impl FightTelemetry {
    pub fn snapshot(&self, side: Side) -> Option<&CharacterSnapshot> {
        self.snapshots.iter().find(|snap| snap.side == side)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

// ============================================================================
// Systems
// ============================================================================

fn apply_fighter_input(mut inputs: EventReader<FighterInput>, mut fighters: Query<&mut Fighter>) {
    for input in inputs.read() {
        for mut fighter in &mut fighters {
            if fighter.0.side() == input.side {
                fighter.0.handle_input(input.event);
            }
        }
    }
}

fn tick_fighters(
    mut commands: Commands,
    mut fighters: Query<(Entity, &mut Fighter), Without<Faulted>>,
    mut telemetry: ResMut<FightTelemetry>,
) {
    for (entity, mut fighter) in &mut fighters {
        if let Err(e) = fighter.0.tick() {
            tracing::error!(side = ?fighter.0.side(), "fighter tick failed, fighter halted: {}", e);
            telemetry.last_error = Some(e.to_string());
            commands.entity(entity).insert(Faulted(e.to_string()));
        }
    }
}

fn detect_contacts(
    mut fighters: Query<&mut Fighter>,
    settings: Res<FightSettings>,
    mut contacts: EventWriter<ContactEvent>,
) {
    let mut pairs = fighters.iter_combinations_mut();
    while let Some([mut a, mut b]) = pairs.fetch_next() {
        let (a, b) = (&mut a.0, &mut b.0);
        a.face_towards(b.position().x);
        b.face_towards(a.position().x);

        if (a.position().x - b.position().x).abs() > settings.reach {
            continue;
        }
        for event in [exchange(a, b), exchange(b, a)].into_iter().flatten() {
            contacts.send(event);
        }
    }
}

fn exchange(attacker: &mut Character, defender: &mut Character) -> Option<ContactEvent> {
    let knockback = attacker.movement().facing().forward();
    let contact = attacker.claim_contact(knockback)?;
    defender.report_contact(contact);
    Some(ContactEvent {
        attacker: attacker.side(),
        contact,
    })
}

fn publish_telemetry(
    fighters: Query<&Fighter>,
    mut contacts: EventReader<ContactEvent>,
    mut telemetry: ResMut<FightTelemetry>,
) {
    telemetry.tick += 1;
    telemetry.contacts += contacts.read().count() as u64;

    let mut snapshots: Vec<_> = fighters.iter().map(|f| f.0.snapshot()).collect();
    snapshots.sort_by_key(|snap| snap.side == Side::Right);
    telemetry.snapshots = snapshots;
}
