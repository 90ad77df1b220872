//! Attack/defense arbitration: frame data, move templates and the three
//! coupled state machines (attack, defense, arbiter).
//!
//! ```text
//! MoveTemplate (library) ──Variant──▶ Move (attacker, Option slot)
//!        │                               │ hitbox on during Active
//!        └── reaction frames ──Contact──▶ DefenseMove (defender, Option slot)
//!
//! Arbiter: defense resolve → attack resolve → priority → dispatch one tick
//! ```

use serde::{Deserialize, Serialize};

pub mod arbiter;
pub mod attack;
pub mod attack_move;
pub mod contact;
pub mod defense;
pub mod defense_move;
pub mod variant;

pub use arbiter::{Arbiter, ArbiterState};
pub use attack::{AttackController, AttackIntent};
pub use attack_move::Move;
pub use contact::{Contact, ContactOutcome};
pub use defense::{classify_contact, DefenseController};
pub use defense_move::DefenseMove;
pub use variant::{Stance, Variant, VariantConfig};

use crate::error::{FightError, FightResult};
use crate::movement::MovementEffect;

// ============================================================================
// States
// ============================================================================

/// Attacking-side state. A `Move` exists iff this is not `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackState {
    #[default]
    None,
    PreMove,
    Startup,
    Active,
    Recovery,
}

/// Defending-side state. A `DefenseMove` exists iff this is Blocking or Hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefenseState {
    // Normal/attacking situations
    #[default]
    None,

    // Contact classified, reaction not started yet (same tick only)
    PreBlock,
    PreHit,

    // Reacting to a move
    Blocking,
    Hit,
}

impl DefenseState {
    pub fn is_engaged(&self) -> bool {
        !matches!(self, DefenseState::None)
    }
}

/// Height of a move's hitbox, read only by the defender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveHeight {
    Low,
    Mid,
    High,
}

// ============================================================================
// Frame data
// ============================================================================

/// Attacker frame data, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameData {
    pub startup: u32,
    pub active: u32,
    pub recovery: u32,
}

impl FrameData {
    pub fn new(startup: u32, active: u32, recovery: u32) -> Self {
        Self {
            startup,
            active,
            recovery,
        }
    }

    /// Ticks from `initialize` until the move ends (zero-length phases still take one tick)
    pub fn total(&self) -> u32 {
        self.startup.max(1) + self.active.max(1) + self.recovery.max(1)
    }
}

/// Defender frame data: how long the opponent is held in block/hit-stun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseFrames {
    pub on_block: u32,
    pub on_hit: u32,
}

/// Phase-entry effects a move applies to its attacker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffects {
    pub enter_startup: MovementEffect,
    pub enter_active: MovementEffect,
    pub enter_recovery: MovementEffect,
    pub end_move: MovementEffect,
}

impl Default for MoveEffects {
    /// Plant the attacker for the whole move, release it at the end.
    /// In the air, disabling motion turns the jump into a landing arc.
    fn default() -> Self {
        Self {
            enter_startup: MovementEffect::DisableMotion,
            enter_active: MovementEffect::Identity,
            enter_recovery: MovementEffect::Identity,
            end_move: MovementEffect::EnableMotion,
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

/// Authoring-time description of a move. `Move` instances are stamped from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTemplate {
    pub id: String,
    pub height: MoveHeight,
    pub damage: u32,
    pub frames: FrameData,
    pub reaction: DefenseFrames,
    #[serde(default)]
    pub effects: MoveEffects,
}

/// Index of a template inside the `MoveLibrary` it was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveId(pub usize);

/// Every move template available to a roster
#[derive(Debug, Clone)]
pub struct MoveLibrary {
    templates: Vec<MoveTemplate>,
}

impl MoveLibrary {
    pub fn new(templates: Vec<MoveTemplate>) -> FightResult<Self> {
        for (i, template) in templates.iter().enumerate() {
            if templates[..i].iter().any(|t| t.id == template.id) {
                return Err(FightError::InvalidConfig(format!(
                    "duplicate move template id: {}",
                    template.id
                )));
            }
        }
        Ok(Self { templates })
    }

    pub fn id_of(&self, name: &str) -> FightResult<MoveId> {
        self.templates
            .iter()
            .position(|t| t.id == name)
            .map(MoveId)
            .ok_or_else(|| FightError::MissingTemplate(name.to_string()))
    }

    pub fn get(&self, id: MoveId) -> Option<&MoveTemplate> {
        self.templates.get(id.0)
    }

    pub fn templates(&self) -> &[MoveTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Built-in light punch set: standing hits mid, crouching hits low, jumping hits high.
pub fn default_templates() -> Vec<MoveTemplate> {
    vec![
        MoveTemplate {
            id: "light_punch_standing".into(),
            height: MoveHeight::Mid,
            damage: 5,
            frames: FrameData::new(4, 2, 6),
            reaction: DefenseFrames {
                on_block: 8,
                on_hit: 14,
            },
            effects: MoveEffects::default(),
        },
        MoveTemplate {
            id: "light_punch_crouching".into(),
            height: MoveHeight::Low,
            damage: 4,
            frames: FrameData::new(4, 2, 7),
            reaction: DefenseFrames {
                on_block: 8,
                on_hit: 12,
            },
            effects: MoveEffects::default(),
        },
        MoveTemplate {
            id: "light_punch_jumping".into(),
            height: MoveHeight::High,
            damage: 6,
            frames: FrameData::new(5, 3, 8),
            reaction: DefenseFrames {
                on_block: 10,
                on_hit: 16,
            },
            effects: MoveEffects::default(),
        },
    ]
}
