//! 2D board of entity slots.

use crate::entity::Entity;
use ocean_core::{Census, Direction, EntityKind, Error, Offset, Position, Result};
use std::fmt;
use tracing::{debug, trace};

/// A bounded rows x cols grid; each cell holds at most one entity.
///
/// Storage is a flat row-major arena. The board owns every resident entity;
/// `remove_entity` hands ownership back to the caller.
#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    cols: i32,
    cells: Vec<Option<Entity>>,
    // Tick on which each cell's occupant last took, or was born into, a turn.
    turns: Vec<u64>,
    epoch: u64,
}

impl Board {
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let size = rows as usize * cols as usize;
        Ok(Self {
            rows,
            cols,
            cells: vec![None; size],
            turns: vec![0; size],
            epoch: 0,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn is_valid_coordinate(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.is_valid_coordinate(pos)
            .then(|| pos.row as usize * self.cols as usize + pos.col as usize)
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let row = (index / self.cols as usize) as i32;
        let col = (index % self.cols as usize) as i32;
        Position::new(row, col)
    }

    /// Place `entity` at `pos`. Fails without side effects when the
    /// coordinate is out of bounds or the cell is taken.
    pub fn add_entity(&mut self, entity: Entity, pos: Position) -> bool {
        let Some(index) = self.index(pos) else {
            debug!(%pos, kind = %entity.kind(), "Cannot add entity outside the board");
            return false;
        };
        if let Some(occupant) = &self.cells[index] {
            trace!(%pos, occupant = %occupant.kind(), requested = %entity.kind(), "Cannot add entity to occupied cell");
            return false;
        }
        trace!(%pos, kind = %entity.kind(), "Adding entity");
        self.cells[index] = Some(entity);
        self.turns[index] = self.epoch;
        true
    }

    /// Return a just-removed entity to its cell without resetting its turn.
    pub(crate) fn restore_entity(&mut self, entity: Entity, pos: Position) -> bool {
        match self.index(pos) {
            Some(index) if self.cells[index].is_none() => {
                self.cells[index] = Some(entity);
                true
            }
            _ => false,
        }
    }

    pub fn get_entity(&self, pos: Position) -> Option<&Entity> {
        self.index(pos).and_then(|index| self.cells[index].as_ref())
    }

    pub fn get_entity_mut(&mut self, pos: Position) -> Option<&mut Entity> {
        let index = self.index(pos)?;
        self.cells[index].as_mut()
    }

    pub fn remove_entity(&mut self, pos: Position) -> Option<Entity> {
        let index = self.index(pos)?;
        let removed = self.cells[index].take();
        if let Some(entity) = &removed {
            trace!(%pos, kind = %entity.kind(), "Removing entity");
        }
        removed
    }

    /// Relocate the occupant of `from` into the empty cell `to`.
    ///
    /// Moving onto the entity's own cell succeeds without doing anything.
    pub fn move_entity(&mut self, from: Position, to: Position) -> bool {
        let (Some(src), Some(dst)) = (self.index(from), self.index(to)) else {
            debug!(%from, %to, "Invalid coordinates for move");
            return false;
        };
        if self.cells[src].is_none() {
            debug!(%from, "No entity to move");
            return false;
        }
        if src == dst {
            return true;
        }
        if self.cells[dst].is_some() {
            trace!(%from, %to, "Move destination is occupied");
            return false;
        }
        trace!(%from, %to, "Moving entity");
        self.cells[dst] = self.cells[src].take();
        self.turns[dst] = self.turns[src];
        true
    }

    fn moore_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .iter()
            .map(move |d| pos.step(d.to_offset()))
            .filter(move |p| self.is_valid_coordinate(*p))
    }

    /// In-bounds, unoccupied Moore neighbours in fixed scan order
    pub fn empty_neighbors(&self, pos: Position) -> Vec<Position> {
        self.moore_neighbors(pos)
            .filter(|p| self.get_entity(*p).is_none())
            .collect()
    }

    /// In-bounds Moore neighbours holding an entity of `kind`, in fixed scan order
    pub fn neighbors_of_kind(&self, pos: Position, kind: EntityKind) -> Vec<Position> {
        self.moore_neighbors(pos)
            .filter(|p| self.get_entity(*p).is_some_and(|e| e.kind() == kind))
            .collect()
    }

    /// Unit step toward the closest entity of `kind` within a square window of
    /// `radius` around `pos`, or [`Offset::ZERO`] if none is in range.
    ///
    /// Distance is squared Euclidean; ties go to the first cell in row-major
    /// order.
    pub fn nearest_of_kind_within_radius(
        &self,
        pos: Position,
        kind: EntityKind,
        radius: i32,
    ) -> Offset {
        let mut best: Option<(i32, Position)> = None;

        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let candidate = pos.add(dr, dc);
                let matches = self
                    .get_entity(candidate)
                    .is_some_and(|e| e.kind() == kind);
                if !matches {
                    continue;
                }
                let distance = pos.distance_squared(&candidate);
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, candidate));
                }
            }
        }

        best.map_or(Offset::ZERO, |(_, target)| Offset::toward(pos, target))
    }

    /// Row-major snapshot of every occupied cell
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(|(i, _)| self.index_to_pos(i))
            .collect()
    }

    /// Iterator over occupied cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Entity)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|e| (self.index_to_pos(i), e)))
    }

    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn census(&self) -> Census {
        self.iter().map(|(_, e)| e.kind()).collect()
    }

    /// Remove every entity whose death predicate holds; returns how many.
    pub fn remove_dead(&mut self) -> usize {
        let mut removed = 0;
        for index in 0..self.cells.len() {
            if self.cells[index].as_ref().is_some_and(Entity::is_dead) {
                let pos = self.index_to_pos(index);
                if let Some(entity) = self.cells[index].take() {
                    debug!(%pos, kind = %entity.kind(), "Removing dead entity");
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Open a new round of turns. Every current occupant becomes eligible.
    pub(crate) fn begin_turns(&mut self) {
        self.epoch += 1;
    }

    /// Claim the current round's turn for the occupant of `pos`.
    ///
    /// Returns false for empty cells and for occupants that already acted or
    /// were placed during this round.
    pub(crate) fn claim_turn(&mut self, pos: Position) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        if self.cells[index].is_none() || self.turns[index] == self.epoch {
            return false;
        }
        self.turns[index] = self.epoch;
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    f.write_str(" ")?;
                }
                let symbol = self
                    .get_entity(Position::new(row, col))
                    .map_or('.', Entity::symbol);
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
