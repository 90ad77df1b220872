//! Error taxonomy for the duel core.
//!
//! Invalid-state ticks and a missing move instance are contract violations:
//! they are returned as errors so the caller sees them on the same tick, and
//! nothing inside the core tries to recover from them. Redundant attack input
//! and "nothing to do this tick" are not errors at all.

use crate::combat::{AttackState, DefenseState};

#[derive(Debug, thiserror::Error)]
pub enum FightError {
    #[error("cannot tick a move in attack state {0:?} (must be Startup, Active or Recovery)")]
    InvalidAttackTick(AttackState),
    #[error("cannot tick a defense reaction in defense state {0:?} (must be Blocking or Hit)")]
    InvalidDefenseTick(DefenseState),
    #[error("attack state {0:?} has no move instance")]
    MissingMove(AttackState),
    #[error("defense state {0:?} has no pending contact or reaction")]
    MissingReaction(DefenseState),
    #[error("move template not found: {0}")]
    MissingTemplate(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FightResult<T> = Result<T, FightError>;
