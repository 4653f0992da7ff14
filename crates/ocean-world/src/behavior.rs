//! Per-tick update policies.
//!
//! Every policy works on the entity found at a board position and mutates the
//! board directly. A failed board operation means the attempt simply did not
//! happen; the policy falls through to its next step.
//!
//! Herbivores and predators share one algorithm and differ only in their
//! [`CreatureProfile`]. Within a turn:
//!
//! 1. age and pay upkeep; a creature that dies here does nothing else
//! 2. eat an adjacent prey if there is one, moving into its cell (ends the turn)
//! 3. reproduce into an empty neighbour when energy and chance allow
//! 4. re-check death
//! 5. move: toward the nearest prey in sight when hungry, otherwise (or when
//!    that step is blocked) into a random empty neighbour

use crate::board::Board;
use crate::entity::{Creature, Entity};
use crate::random::RandomSource;
use ocean_core::{CreatureProfile, EntityKind, Position, ProducerProfile};
use tracing::{debug, trace, warn};

/// What an entity did with its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Where the entity ended up
    pub position: Position,
    /// Cell of a newly placed offspring
    pub offspring: Option<Position>,
    pub ate: bool,
    /// Died during upkeep or right after reproducing
    pub died: bool,
}

impl Turn {
    fn stayed(position: Position) -> Self {
        Self {
            position,
            offspring: None,
            ate: false,
            died: false,
        }
    }
}

/// Run one turn for the entity at `pos`. An empty cell yields an idle turn.
pub fn update<R: RandomSource>(board: &mut Board, rng: &mut R, pos: Position) -> Turn {
    match board.get_entity(pos).map(Entity::kind) {
        None => Turn::stayed(pos),
        Some(EntityKind::Producer) => spread(board, rng, pos, &ProducerProfile::ALGAE),
        Some(EntityKind::Herbivore | EntityKind::Predator) => live(board, rng, pos),
    }
}

fn spread<R: RandomSource>(
    board: &mut Board,
    rng: &mut R,
    pos: Position,
    profile: &ProducerProfile,
) -> Turn {
    let mut turn = Turn::stayed(pos);
    if !rng.percent_chance(profile.spread_chance_percent) {
        return turn;
    }

    let empty = board.empty_neighbors(pos);
    if let Some(&target) = rng.choose(&empty) {
        if board.add_entity(Entity::algae(), target) {
            trace!(from = %pos, to = %target, "Algae spread");
            turn.offspring = Some(target);
        }
    }
    turn
}

fn creature_at(board: &Board, pos: Position) -> Option<&Creature> {
    board.get_entity(pos).and_then(Entity::creature)
}

fn creature_at_mut(board: &mut Board, pos: Position) -> Option<&mut Creature> {
    board.get_entity_mut(pos).and_then(Entity::creature_mut)
}

fn live<R: RandomSource>(board: &mut Board, rng: &mut R, pos: Position) -> Turn {
    let mut turn = Turn::stayed(pos);

    let Some(creature) = creature_at_mut(board, pos) else {
        return turn;
    };
    creature.metabolize();
    let profile = creature.profile();
    let (energy, age) = (creature.energy(), creature.age());
    trace!(%pos, energy, age, "Creature turn");

    if creature.is_dead() {
        debug!(%pos, energy, age, "Creature died during upkeep");
        turn.died = true;
        return turn;
    }

    match try_eat(board, rng, pos, profile) {
        Meal::Eaten(at) => {
            turn.ate = true;
            turn.position = at;
            return turn;
        }
        Meal::Refused => return turn,
        Meal::Nothing => {}
    }

    if creature_at(board, pos).is_some_and(Creature::can_reproduce) {
        turn.offspring = try_reproduce(board, rng, pos, profile);
        if creature_at(board, pos).map_or(true, Creature::is_dead) {
            debug!(%pos, "Creature died after reproducing");
            turn.died = true;
            return turn;
        }
    }

    turn.position = roam(board, rng, pos, profile);
    turn
}

enum Meal {
    Eaten(Position),
    /// The chosen neighbour was not prey after all and went back untouched
    Refused,
    Nothing,
}

fn try_eat<R: RandomSource>(
    board: &mut Board,
    rng: &mut R,
    pos: Position,
    profile: &CreatureProfile,
) -> Meal {
    let prey = board.neighbors_of_kind(pos, profile.prey);
    let Some(&target) = rng.choose(&prey) else {
        return Meal::Nothing;
    };
    let Some(victim) = board.remove_entity(target) else {
        return Meal::Nothing;
    };

    if victim.kind() != profile.prey {
        warn!(%pos, %target, found = %victim.kind(), expected = %profile.prey, "Neighbour is not prey, putting it back");
        board.restore_entity(victim, target);
        return Meal::Refused;
    }

    let Some(creature) = creature_at_mut(board, pos) else {
        return Meal::Nothing;
    };
    creature.gain_energy(profile.meal_energy);
    let energy = creature.energy();

    board.move_entity(pos, target);
    debug!(from = %pos, to = %target, prey = %profile.prey, energy, "Creature ate");
    Meal::Eaten(target)
}

fn try_reproduce<R: RandomSource>(
    board: &mut Board,
    rng: &mut R,
    pos: Position,
    profile: &CreatureProfile,
) -> Option<Position> {
    if !rng.percent_chance(profile.reproduction_chance_percent) {
        return None;
    }

    let empty = board.empty_neighbors(pos);
    let &target = rng.choose(&empty)?;
    let offspring = board.get_entity(pos)?.offspring();
    if !board.add_entity(offspring, target) {
        return None;
    }

    let parent = creature_at_mut(board, pos)?;
    parent.spend_energy(profile.reproduction_cost);
    debug!(%pos, offspring = %target, energy = parent.energy(), "Creature reproduced");
    Some(target)
}

/// Move one cell and return the new position.
///
/// Hunting only ever steps into an empty cell; prey next to the creature is
/// handled by eating, not by moving.
fn roam<R: RandomSource>(
    board: &mut Board,
    rng: &mut R,
    pos: Position,
    profile: &CreatureProfile,
) -> Position {
    if creature_at(board, pos).is_some_and(Creature::is_hungry) {
        let step = board.nearest_of_kind_within_radius(pos, profile.prey, profile.sight_radius);
        if !step.is_zero() {
            let next = pos.step(step);
            if board.get_entity(next).is_none() && board.move_entity(pos, next) {
                trace!(from = %pos, to = %next, "Creature moved toward food");
                return next;
            }
        }
    }

    let empty = board.empty_neighbors(pos);
    match rng.choose(&empty) {
        Some(&target) if board.move_entity(pos, target) => {
            trace!(from = %pos, to = %target, "Creature wandered");
            target
        }
        _ => pos,
    }
}
