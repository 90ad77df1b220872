//! Fight configuration: tick rate, physics, character tuning and the move set.
//!
//! Loaded from RON (`config/fight.ron`) or JSON; the file extension picks the
//! format. `FightConfig::default()` is the built-in light punch roster.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::character::Roster;
use crate::combat::{default_templates, MoveLibrary, MoveTemplate, Variant, VariantConfig};
use crate::constants::{BOUT_START_DISTANCE, HITBOX_REACH, MAX_HEALTH, TICK_RATE_HZ};
use crate::error::{FightError, FightResult};
use crate::logging::TracingConfig;
use crate::movement::MovementParams;

/// Per-character tuning shared by both sides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterParams {
    pub max_health: u32,
    /// Horizontal distance within which an active hitbox reaches the opponent
    pub reach: f32,
    /// Distance between the two characters when a bout starts
    pub start_distance: f32,
}

impl Default for CharacterParams {
    fn default() -> Self {
        Self {
            max_health: MAX_HEALTH,
            reach: HITBOX_REACH,
            start_distance: BOUT_START_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FightConfig {
    pub tick_rate: u32,
    pub movement: MovementParams,
    pub character: CharacterParams,
    pub moves: Vec<MoveTemplate>,
    pub light_punch: VariantConfig,
    pub tracing: TracingConfig,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE_HZ,
            movement: MovementParams::default(),
            character: CharacterParams::default(),
            moves: default_templates(),
            light_punch: VariantConfig::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl FightConfig {
    pub fn from_ron_str(source: &str) -> FightResult<Self> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> FightResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk. `.json` files are read as JSON, everything else as RON.
    pub fn load(path: impl AsRef<Path>) -> FightResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_ron_str(&content)?,
        };
        tracing::info!(path = %path.display(), moves = config.moves.len(), "fight config loaded");
        Ok(config)
    }

    pub fn to_ron_string(&self) -> FightResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| FightError::InvalidConfig(e.to_string()))
    }

    /// Seconds per fixed tick
    pub fn delta(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> FightResult<()> {
        if self.tick_rate == 0 {
            return Err(FightError::InvalidConfig("tick_rate must be non-zero".into()));
        }

        let m = &self.movement;
        let positive = [
            ("grounded_speed", m.grounded_speed),
            ("gravity", m.gravity),
            ("jumping_speed", m.jumping_speed),
            ("reach", self.character.reach),
            ("start_distance", self.character.start_distance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FightError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if !m.horizontal_air_speed.is_finite() || m.horizontal_air_speed < 0.0 {
            return Err(FightError::InvalidConfig(format!(
                "horizontal_air_speed must be finite and non-negative, got {}",
                m.horizontal_air_speed
            )));
        }
        if !(0.0..1.0).contains(&m.dead_zone) {
            return Err(FightError::InvalidConfig(format!(
                "dead_zone must be in [0, 1), got {}",
                m.dead_zone
            )));
        }
        if self.character.max_health == 0 {
            return Err(FightError::InvalidConfig("max_health must be non-zero".into()));
        }

        let library = MoveLibrary::new(self.moves.clone())?;
        Variant::resolve(&self.light_punch, &library)?;
        Ok(())
    }

    /// Validate and build the shared character definition.
    pub fn roster(&self) -> FightResult<Roster> {
        self.validate()?;
        let library = MoveLibrary::new(self.moves.clone())?;
        let light_punch = Variant::resolve(&self.light_punch, &library)?;
        Ok(Roster {
            library: Arc::new(library),
            light_punch,
            movement: self.movement.clone(),
            max_health: self.character.max_health,
            delta: self.delta(),
        })
    }
}
