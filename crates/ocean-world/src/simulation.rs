//! Simulation engine driving the board tick by tick.

use crate::behavior;
use crate::board::Board;
use crate::entity::Entity;
use crate::random::{RandomSource, SeededRandom};
use ocean_core::{Census, EntityKind, Position, Result, SeedingConfig, SimulationConfig, TickStats};
use tracing::{debug, info, instrument};

pub struct Simulation<R: RandomSource = SeededRandom> {
    board: Board,
    rng: R,
    tick: u64,
    last_tick: TickStats,
    totals: TickStats,
}

impl Simulation<SeededRandom> {
    /// Build a board from `config` and seed its initial population
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols)?;
        let rng = match config.seed {
            Some(seed) => SeededRandom::seed_from_u64(seed),
            None => SeededRandom::from_entropy(),
        };

        let mut sim = Self::new(board, rng);
        sim.seed_population(&config.seeding);
        Ok(sim)
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn new(board: Board, rng: R) -> Self {
        Self {
            board,
            rng,
            tick: 0,
            last_tick: TickStats::new(),
            totals: TickStats::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setup; placements made here act from the next tick.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn census(&self) -> Census {
        self.board.census()
    }

    /// Activity during the most recent tick
    pub fn last_tick_stats(&self) -> TickStats {
        self.last_tick
    }

    /// Activity accumulated over the whole run
    pub fn total_stats(&self) -> TickStats {
        self.totals
    }

    /// Try `attempts` random placements of a fresh `kind`; occupied cells are
    /// skipped. Returns how many landed.
    pub fn seed(&mut self, kind: EntityKind, attempts: usize) -> usize {
        let max_row = self.board.rows() - 1;
        let max_col = self.board.cols() - 1;
        let mut placed = 0;

        for _ in 0..attempts {
            let row = self.rng.int_in_range(0, max_row);
            let col = self.rng.int_in_range(0, max_col);
            if self.board.add_entity(Entity::spawn(kind), Position::new(row, col)) {
                placed += 1;
            }
        }

        info!(%kind, attempts, placed, "Seeded initial population");
        placed
    }

    /// Seed algae, herbivores and predators, in that order
    pub fn seed_population(&mut self, seeding: &SeedingConfig) -> Census {
        let cells = self.board.rows() as usize * self.board.cols() as usize;
        let mut placed = Census::new();
        for kind in EntityKind::ALL {
            let count = self.seed(kind, seeding.attempts(kind, cells));
            for _ in 0..count {
                placed.record(kind);
            }
        }
        placed
    }

    /// Advance the world by one tick.
    ///
    /// Every entity present at the start of the tick gets at most one turn,
    /// in shuffled order. Entities that die during the tick stay on the board
    /// (and can still be eaten) until the sweep at the end.
    pub fn tick(&mut self) {
        self.tick += 1;
        let mut stats = TickStats::new();

        let mut order = self.board.occupied_positions();
        debug!(tick = self.tick, entities = order.len(), "Starting tick");
        self.rng.shuffle(&mut order);
        self.board.begin_turns();

        for pos in order {
            // The occupant may have been eaten or replaced since the snapshot
            if !self.board.claim_turn(pos) {
                continue;
            }
            let turn = behavior::update(&mut self.board, &mut self.rng, pos);
            stats.updates += 1;
            if turn.offspring.is_some() {
                stats.births += 1;
            }
            if turn.ate {
                stats.meals += 1;
            }
        }

        stats.deaths = self.board.remove_dead() as u64;
        if stats.deaths > 0 {
            debug!(tick = self.tick, removed = stats.deaths, "Removed dead entities");
        }

        self.last_tick = stats;
        self.totals += stats;
    }

    /// Run `num_ticks` ticks, logging progress every 100
    #[instrument(skip(self))]
    pub fn run(&mut self, num_ticks: u64) -> Census {
        info!("Starting simulation for {} ticks", num_ticks);

        for _ in 0..num_ticks {
            self.tick();
            if self.tick % 100 == 0 {
                info!(
                    "Tick {}: {} entities alive",
                    self.tick,
                    self.board.len()
                );
            }
        }

        let census = self.census();
        self.emit_population_metrics();
        census
    }

    /// Log a population snapshot
    pub fn emit_population_metrics(&self) {
        let census = self.census();
        let stats = self.last_tick;
        info!(
            event = "population_metrics",
            tick = self.tick,
            algae = census.producers,
            herbivores = census.herbivores,
            predators = census.predators,
            births = stats.births,
            meals = stats.meals,
            deaths = stats.deaths,
            total_births = self.totals.births,
            total_deaths = self.totals.deaths,
            "Population metrics snapshot"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FirstChoice;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn scripted(rows: i32, cols: i32) -> Simulation<FirstChoice> {
        Simulation::new(Board::new(rows, cols).unwrap(), FirstChoice)
    }

    fn energy_at<R: RandomSource>(sim: &Simulation<R>, pos: Position) -> i32 {
        sim.board()
            .get_entity(pos)
            .and_then(Entity::creature)
            .unwrap()
            .energy()
    }

    #[test]
    fn test_herbivore_eats_adjacent_algae() {
        let mut sim = scripted(10, 20);
        assert!(sim.board_mut().add_entity(Entity::algae(), p(2, 2)));
        assert!(sim.board_mut().add_entity(Entity::herbivore(), p(3, 2)));

        sim.tick();

        let herbivore = sim.board().get_entity(p(2, 2)).unwrap();
        assert_eq!(herbivore.kind(), EntityKind::Herbivore);
        assert_eq!(energy_at(&sim, p(2, 2)), 120 - 2 + 30);
        assert!(sim.board().get_entity(p(3, 2)).is_none());
        assert_eq!(sim.last_tick_stats().meals, 1);
    }

    #[test]
    fn test_starving_herbivore_is_swept() {
        let mut sim = scripted(5, 5);
        sim.board_mut().add_entity(Entity::herbivore_with_energy(1), p(2, 2));

        sim.tick();

        assert!(sim.board().is_empty());
        assert_eq!(sim.last_tick_stats().deaths, 1);
    }

    #[test]
    fn test_predator_eats_instead_of_reproducing() {
        let mut sim = scripted(5, 5);
        sim.board_mut().add_entity(Entity::predator_with_energy(250), p(2, 2));
        sim.board_mut().add_entity(Entity::herbivore(), p(2, 3));

        sim.tick();

        assert_eq!(sim.board().len(), 1);
        let census = sim.census();
        assert_eq!(census.predators, 1);
        assert_eq!(census.herbivores, 0);
        assert_eq!(sim.board().get_entity(p(2, 3)).unwrap().kind(), EntityKind::Predator);
        assert_eq!(sim.last_tick_stats().births, 0);
        // The eaten herbivore never got its turn
        assert_eq!(sim.last_tick_stats().updates, 1);
    }

    #[test]
    fn test_entity_acts_at_most_once_per_tick() {
        let mut sim = scripted(5, 5);
        sim.board_mut().add_entity(Entity::herbivore(), p(2, 2));
        // Pending later in the snapshot; the herbivore moves here by eating it
        sim.board_mut().add_entity(Entity::algae(), p(3, 3));

        sim.tick();

        assert_eq!(energy_at(&sim, p(3, 3)), 120 - 2 + 30);
        assert_eq!(sim.last_tick_stats().updates, 1);
    }

    #[test]
    fn test_newborns_wait_for_next_tick() {
        let mut sim = scripted(5, 5);
        sim.board_mut().add_entity(Entity::predator_with_energy(250), p(2, 2));

        sim.tick();
        assert_eq!(sim.last_tick_stats().updates, 1);
        assert_eq!(sim.last_tick_stats().births, 1);
        assert_eq!(energy_at(&sim, p(1, 1)), 100);

        sim.tick();
        assert_eq!(sim.last_tick_stats().updates, 2);
    }

    #[test]
    fn test_dying_herbivore_is_still_prey_this_tick() {
        let mut sim = scripted(3, 3);
        sim.board_mut().add_entity(Entity::herbivore_with_energy(1), p(1, 1));
        sim.board_mut().add_entity(Entity::predator(), p(1, 2));

        sim.tick();

        assert_eq!(sim.board().len(), 1);
        assert_eq!(energy_at(&sim, p(1, 1)), 150 - 4 + 60);
        let stats = sim.last_tick_stats();
        assert_eq!(stats.meals, 1);
        assert_eq!(stats.deaths, 0);
    }

    #[test]
    fn test_death_by_old_age() {
        let mut sim = scripted(5, 5);
        // Never reaches the reproduction threshold and never starves before 70
        sim.board_mut().add_entity(Entity::herbivore_with_energy(179), p(2, 2));

        for _ in 0..69 {
            sim.tick();
        }
        assert_eq!(sim.census().herbivores, 1);

        sim.tick();
        assert!(sim.board().is_empty());
        assert_eq!(sim.total_stats().deaths, 1);
    }

    #[test]
    fn test_seed_counts_successful_placements() {
        let board = Board::new(1, 1).unwrap();
        let mut sim = Simulation::new(board, SeededRandom::seed_from_u64(5));
        assert_eq!(sim.seed(EntityKind::Producer, 10), 1);
        assert_eq!(sim.seed(EntityKind::Herbivore, 10), 0);
        assert_eq!(sim.census().producers, 1);
    }

    #[test]
    fn test_from_config_seeds_population() {
        let config = SimulationConfig {
            rows: 30,
            cols: 30,
            seed: Some(42),
            ..Default::default()
        };
        let sim = Simulation::from_config(&config).unwrap();
        let census = sim.census();

        assert!(census.producers > 0 && census.producers <= 900 / 15);
        assert!(census.herbivores > 0 && census.herbivores <= 900 / 100);
        assert!(census.predators <= 900 / 300);
        assert_eq!(census.total(), sim.board().len());
    }

    #[test]
    fn test_from_config_rejects_bad_dimensions() {
        let config = SimulationConfig {
            rows: -3,
            ..Default::default()
        };
        assert!(Simulation::from_config(&config).is_err());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimulationConfig {
            rows: 20,
            cols: 20,
            seed: Some(7),
            ..Default::default()
        };
        let mut a = Simulation::from_config(&config).unwrap();
        let mut b = Simulation::from_config(&config).unwrap();

        a.run(25);
        b.run(25);
        assert_eq!(a.board().to_string(), b.board().to_string());
        assert_eq!(a.total_stats(), b.total_stats());
    }

    #[test]
    fn test_invariants_hold_over_a_long_run() {
        let config = SimulationConfig {
            rows: 25,
            cols: 25,
            seed: Some(1234),
            ..Default::default()
        };
        let mut sim = Simulation::from_config(&config).unwrap();

        for _ in 0..150 {
            sim.tick();
            for (_, entity) in sim.board().iter() {
                assert!(!entity.is_dead());
                if let Some(creature) = entity.creature() {
                    assert!(creature.energy() > 0);
                    assert!(creature.energy() <= creature.profile().max_energy);
                    assert!(creature.age() < creature.profile().max_age);
                }
            }
            assert_eq!(sim.census().total(), sim.board().len());
        }
        assert_eq!(sim.tick_count(), 150);
        assert!(sim.total_stats().updates > 0);
    }
}
