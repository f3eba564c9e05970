//! Simulation ordering via `SystemSet` phases.
//!
//! ```text
//! Simulation  →  PostSim
//! ```
//!
//! * **Simulation** – Systems that advance the grid (one generation per
//!   `FixedUpdate`).
//! * **PostSim** – Reporting that only *reads* simulation state: census logs,
//!   snapshot requests.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `SimulationPlugin`. Plugins use
/// `.in_set(SimulationSet::X)` when registering their systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advance the wildfire grid.
    Simulation,
    /// Read-only aggregation and reporting.
    PostSim,
}
