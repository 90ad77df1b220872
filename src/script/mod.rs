//! Scripted input for headless bouts: training-dummy behaviors and
//! frame-stamped input scripts.

use serde::{Deserialize, Serialize};

use crate::character::{Character, InputEvent, Side};
use crate::combat::{AttackState, DefenseState};
use crate::error::FightResult;
use crate::movement::MovementState;

/// Per-tick training dummy, polled before the character ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DummyBehavior {
    /// Never sends input
    #[default]
    Idle,
    /// Jump straight up whenever standing still
    JumpWhenStationary,
    /// One light punch on the first tick, nothing afterwards
    PunchOnce,
    /// Light punch whenever neither attacking nor reacting
    PunchWhenIdle,
}

impl DummyBehavior {
    pub fn inputs(&self, tick: u64, character: &Character) -> Vec<InputEvent> {
        match self {
            DummyBehavior::Idle => Vec::new(),
            DummyBehavior::JumpWhenStationary => {
                if character.movement_state() == MovementState::Stationary {
                    // press up, then release so the held axis is neutral on landing
                    vec![
                        InputEvent::Motion { x: 0.0, y: 1.0 },
                        InputEvent::Motion { x: 0.0, y: 0.0 },
                    ]
                } else {
                    Vec::new()
                }
            }
            DummyBehavior::PunchOnce => {
                if tick == 0 {
                    vec![InputEvent::LightPunch]
                } else {
                    Vec::new()
                }
            }
            DummyBehavior::PunchWhenIdle => {
                if character.attack_state() == AttackState::None
                    && character.defense_state() == DefenseState::None
                {
                    vec![InputEvent::LightPunch]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

/// One input delivered to one side just before the given tick runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    pub tick: u64,
    pub side: Side,
    pub event: InputEvent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub inputs: Vec<ScriptedInput>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ron_str(source: &str) -> FightResult<Self> {
        Ok(ron::from_str(source)?)
    }

    pub fn push(&mut self, tick: u64, side: Side, event: InputEvent) -> &mut Self {
        self.inputs.push(ScriptedInput { tick, side, event });
        self
    }

    /// Inputs for `tick`, in the order they were written
    pub fn at(&self, tick: u64) -> impl Iterator<Item = &ScriptedInput> {
        self.inputs.iter().filter(move |input| input.tick == tick)
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.inputs.iter().map(|input| input.tick).max()
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
