//! VoidStation Core: station survival simulation engine.
//!
//! An ECS-based simulation of a small orbital station kept alive by a single
//! operator: storage tanks drain, rooms contaminate, the work station turns
//! resources into credits, and an overseer AI grades every work shift with
//! ever-tightening standards.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System via `hecs`:
//! - **Entities**: rooms, the work station, the operator
//! - **Components**: pure data (StorageTank, ContaminationTimer, Health, ...)
//! - **Systems**: logic that queries and updates components each tick
//!
//! The [`engine::StationEngine`] owns the world plus the pieces that cross
//! entity boundaries: the shift lifecycle, the active metrics, the overseer,
//! and the credit balance.
//!
//! # Example
//!
//! ```rust,no_run
//! use voidstation_core::prelude::*;
//!
//! let mut engine = StationEngine::new(StationConfig::default());
//! engine.start_shift();
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS host loop
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{ShiftPhase, StationEngine};
    pub use crate::generation::{StationConfig, StationLayout};
}
