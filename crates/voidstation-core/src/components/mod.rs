//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no cross-entity behavior; that lives in systems.

mod operator;
mod station;

pub use operator::*;
pub use station::*;
