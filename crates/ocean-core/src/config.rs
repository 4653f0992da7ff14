//! Configuration types for the simulation.
//!
//! Per-kind behaviour constants are fixed at compile time. Only the shape of a
//! run (board size, tick count, seed, initial population) is read at runtime.

use crate::error::{Error, Result};
use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Behaviour constants for an energy-tracking creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureProfile {
    /// Energy of a freshly seeded creature
    pub initial_energy: i32,
    /// Upper bound on energy; gains are clamped to it
    pub max_energy: i32,
    /// Age at which the creature dies
    pub max_age: u32,
    /// Energy deducted every tick
    pub upkeep: i32,
    /// Energy gained per meal
    pub meal_energy: i32,
    /// Minimum energy required to reproduce
    pub reproduction_threshold: i32,
    /// Energy paid by the parent per offspring
    pub reproduction_cost: i32,
    /// Starting energy of an offspring
    pub offspring_energy: i32,
    /// Chance (percent) that an eligible creature reproduces this tick
    pub reproduction_chance_percent: u32,
    /// How far the creature can see food
    pub sight_radius: i32,
    /// Energy level that drives foraging
    pub critical_energy: i32,
    /// Below this energy the hungry glyph is shown
    pub hungry_below: i32,
    pub symbol: char,
    pub hungry_symbol: char,
    pub dead_symbol: char,
    /// What this creature eats
    pub prey: EntityKind,
}

impl CreatureProfile {
    pub const HERBIVORE: CreatureProfile = CreatureProfile {
        initial_energy: 120,
        max_energy: 250,
        max_age: 70,
        upkeep: 2,
        meal_energy: 30,
        reproduction_threshold: 180,
        reproduction_cost: 80,
        offspring_energy: 90,
        reproduction_chance_percent: 25,
        sight_radius: 4,
        critical_energy: 70,
        hungry_below: 70 / 2,
        symbol: 'H',
        hungry_symbol: 'h',
        dead_symbol: 'x',
        prey: EntityKind::Producer,
    };

    pub const PREDATOR: CreatureProfile = CreatureProfile {
        initial_energy: 150,
        max_energy: 300,
        max_age: 70,
        upkeep: 4,
        meal_energy: 60,
        reproduction_threshold: 230,
        reproduction_cost: 110,
        offspring_energy: 100,
        reproduction_chance_percent: 15,
        sight_radius: 5,
        critical_energy: 75,
        hungry_below: 150 / 2,
        symbol: 'P',
        hungry_symbol: 'p',
        dead_symbol: 'x',
        prey: EntityKind::Herbivore,
    };

    /// Whether `energy` is low enough to hunt instead of wander
    /// (below one and a half times the critical level).
    pub fn is_hungry(&self, energy: i32) -> bool {
        2 * energy < 3 * self.critical_energy
    }
}

/// Behaviour constants for a producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerProfile {
    /// Chance (percent) of spreading into a neighbouring cell each tick
    pub spread_chance_percent: u32,
    pub symbol: char,
}

impl ProducerProfile {
    pub const ALGAE: ProducerProfile = ProducerProfile {
        spread_chance_percent: 10,
        symbol: 'A',
    };
}

/// Initial population density, expressed as "one attempt per N cells"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
    pub producer_divisor: u32,
    pub herbivore_divisor: u32,
    pub predator_divisor: u32,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            producer_divisor: 15,
            herbivore_divisor: 100,
            predator_divisor: 300,
        }
    }
}

impl SeedingConfig {
    pub fn divisor(&self, kind: EntityKind) -> u32 {
        match kind {
            EntityKind::Producer => self.producer_divisor,
            EntityKind::Herbivore => self.herbivore_divisor,
            EntityKind::Predator => self.predator_divisor,
        }
    }

    /// Number of placement attempts for `kind` on a board with `cells` cells
    pub fn attempts(&self, kind: EntityKind, cells: usize) -> usize {
        match self.divisor(kind) {
            0 => 0,
            divisor => cells / divisor as usize,
        }
    }
}

/// Shape of a single simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub rows: i32,
    pub cols: i32,
    /// Number of ticks to run
    pub num_ticks: u64,
    /// Random seed for reproducibility; entropy when absent
    pub seed: Option<u64>,
    pub seeding: SeedingConfig,
    /// Wall-clock pause between ticks
    pub tick_interval_ms: u64,
    /// Emit a population snapshot every N ticks (0 disables)
    pub snapshot_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            num_ticks: 200,
            seed: None,
            seeding: SeedingConfig::default(),
            tick_interval_ms: 500,
            snapshot_interval: 10,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded simulation config");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for kind in EntityKind::ALL {
            if self.seeding.divisor(kind) == 0 {
                return Err(Error::InvalidConfig(format!(
                    "seeding divisor for {} must be positive",
                    kind
                )));
            }
        }
        Ok(())
    }
}
