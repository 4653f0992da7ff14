//! Ecosystem simulation engine.
//!
//! This crate implements the 2D board where algae, herbivores and predators
//! live, and the per-tick rules that make them eat, breed, move and die.

pub mod board;
pub mod entity;
pub mod behavior;
pub mod random;
pub mod simulation;

pub use board::Board;
pub use entity::{Creature, Entity};
pub use random::{FirstChoice, RandomSource, SeededRandom};
pub use simulation::Simulation;
