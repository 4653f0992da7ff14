//! Population counts and per-tick activity statistics.

use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Number of living entities of each kind on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub producers: usize,
    pub herbivores: usize,
    pub predators: usize,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Producer => self.producers += 1,
            EntityKind::Herbivore => self.herbivores += 1,
            EntityKind::Predator => self.predators += 1,
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Producer => self.producers,
            EntityKind::Herbivore => self.herbivores,
            EntityKind::Predator => self.predators,
        }
    }

    pub fn total(&self) -> usize {
        self.producers + self.herbivores + self.predators
    }

    /// True when neither herbivores nor predators remain
    pub fn is_barren(&self) -> bool {
        self.herbivores == 0 && self.predators == 0
    }
}

impl FromIterator<EntityKind> for Census {
    fn from_iter<I: IntoIterator<Item = EntityKind>>(iter: I) -> Self {
        let mut census = Census::new();
        for kind in iter {
            census.record(kind);
        }
        census
    }
}

/// What happened during one or more ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Entities that took a turn
    pub updates: u64,
    /// Offspring and spread algae placed
    pub births: u64,
    /// Prey consumed
    pub meals: u64,
    /// Entities removed by the death sweep
    pub deaths: u64,
}

impl TickStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddAssign for TickStats {
    fn add_assign(&mut self, other: Self) {
        self.updates += other.updates;
        self.births += other.births;
        self.meals += other.meals;
        self.deaths += other.deaths;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_from_kinds() {
        let census: Census = [
            EntityKind::Producer,
            EntityKind::Producer,
            EntityKind::Herbivore,
        ]
        .into_iter()
        .collect();

        assert_eq!(census.producers, 2);
        assert_eq!(census.herbivores, 1);
        assert_eq!(census.predators, 0);
        assert_eq!(census.total(), 3);
        assert!(!census.is_barren());
        assert_eq!(census.count(EntityKind::Producer), 2);
    }

    #[test]
    fn test_barren_census() {
        let mut census = Census::new();
        census.record(EntityKind::Producer);
        assert!(census.is_barren());
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = TickStats::new();
        total += TickStats {
            updates: 10,
            births: 2,
            meals: 1,
            deaths: 0,
        };
        total += TickStats {
            updates: 12,
            births: 0,
            meals: 3,
            deaths: 4,
        };
        assert_eq!(total.updates, 22);
        assert_eq!(total.births, 2);
        assert_eq!(total.meals, 4);
        assert_eq!(total.deaths, 4);
    }
}
