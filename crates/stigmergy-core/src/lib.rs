//! Stigmergic grid traversal core.
//!
//! Many independent agents move over a discrete grid and coordinate only
//! through a shared, evaporating pheromone field, optionally steered by a
//! static bias signal. A renderer or other driver advances the simulation
//! one tick at a time and reads the resulting state; nothing here draws,
//! blocks, or performs I/O.

pub mod agent;
pub mod bias;
pub mod config;
pub mod detection;
pub mod field;
pub mod spatial;
pub mod world;
