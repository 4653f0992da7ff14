//! Entity state.

use ocean_core::{CreatureProfile, EntityKind, ProducerProfile};

/// An animal that tracks energy and age
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creature {
    energy: i32,
    age: u32,
    profile: &'static CreatureProfile,
}

impl Creature {
    /// Energy above the profile's maximum is clamped.
    pub fn new(profile: &'static CreatureProfile, energy: i32) -> Self {
        Self {
            energy: energy.min(profile.max_energy),
            age: 0,
            profile,
        }
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn profile(&self) -> &'static CreatureProfile {
        self.profile
    }

    pub fn is_dead(&self) -> bool {
        self.energy <= 0 || self.age >= self.profile.max_age
    }

    /// Advance age by one tick and pay upkeep
    pub fn metabolize(&mut self) {
        self.age += 1;
        self.energy -= self.profile.upkeep;
    }

    pub fn gain_energy(&mut self, amount: i32) {
        self.energy = (self.energy + amount).min(self.profile.max_energy);
    }

    pub fn spend_energy(&mut self, amount: i32) {
        self.energy -= amount;
    }

    pub fn can_reproduce(&self) -> bool {
        self.energy >= self.profile.reproduction_threshold
    }

    pub fn is_hungry(&self) -> bool {
        self.profile.is_hungry(self.energy)
    }

    /// A newborn of the same profile
    pub fn offspring(&self) -> Self {
        Self::new(self.profile, self.profile.offspring_energy)
    }

    pub fn symbol(&self) -> char {
        if self.is_dead() {
            self.profile.dead_symbol
        } else if self.energy < self.profile.hungry_below {
            self.profile.hungry_symbol
        } else {
            self.profile.symbol
        }
    }
}

/// An occupant of a board cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Producer,
    Herbivore(Creature),
    Predator(Creature),
}

impl Entity {
    pub fn algae() -> Self {
        Entity::Producer
    }

    pub fn herbivore() -> Self {
        Self::herbivore_with_energy(CreatureProfile::HERBIVORE.initial_energy)
    }

    pub fn herbivore_with_energy(energy: i32) -> Self {
        Entity::Herbivore(Creature::new(&CreatureProfile::HERBIVORE, energy))
    }

    pub fn predator() -> Self {
        Self::predator_with_energy(CreatureProfile::PREDATOR.initial_energy)
    }

    pub fn predator_with_energy(energy: i32) -> Self {
        Entity::Predator(Creature::new(&CreatureProfile::PREDATOR, energy))
    }

    /// A freshly seeded entity of the given kind
    pub fn spawn(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Producer => Self::algae(),
            EntityKind::Herbivore => Self::herbivore(),
            EntityKind::Predator => Self::predator(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Producer => EntityKind::Producer,
            Entity::Herbivore(_) => EntityKind::Herbivore,
            Entity::Predator(_) => EntityKind::Predator,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Entity::Producer => ProducerProfile::ALGAE.symbol,
            Entity::Herbivore(c) | Entity::Predator(c) => c.symbol(),
        }
    }

    /// Producers are only ever consumed, never dead.
    pub fn is_dead(&self) -> bool {
        self.creature().is_some_and(Creature::is_dead)
    }

    pub fn creature(&self) -> Option<&Creature> {
        match self {
            Entity::Producer => None,
            Entity::Herbivore(c) | Entity::Predator(c) => Some(c),
        }
    }

    pub fn creature_mut(&mut self) -> Option<&mut Creature> {
        match self {
            Entity::Producer => None,
            Entity::Herbivore(c) | Entity::Predator(c) => Some(c),
        }
    }

    /// A newborn of the same kind
    pub fn offspring(&self) -> Self {
        match self {
            Entity::Producer => Entity::Producer,
            Entity::Herbivore(c) => Entity::Herbivore(c.offspring()),
            Entity::Predator(c) => Entity::Predator(c.offspring()),
        }
    }
}
