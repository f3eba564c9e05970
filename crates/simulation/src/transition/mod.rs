//! Per-cell state transition.
//!
//! [`transition`] maps a cell, its eight neighbors (clockwise from North) and
//! a lightning flag to the cell's next state. The work is an ordered pipeline
//! of steps over one working copy; every step sees what the earlier steps
//! wrote, so the order below is load-bearing.

mod error;
mod steps;

use rand::Rng;

use crate::cell::Cell;
use crate::config::NUM_NEIGHBORS;
use crate::fire_params::FireParams;

pub use error::TransitionError;
pub use steps::FireState;

use steps::{StepContext, Working};

/// Compute the next state of `cell`.
///
/// Water cells (`elevation == 0`) are returned unchanged. Randomness is drawn
/// only from `rng`.
pub fn transition<R: Rng + ?Sized>(
    cell: &Cell,
    neighbors: &[Cell; NUM_NEIGHBORS],
    lightning_strike: bool,
    params: &FireParams,
    rng: &mut R,
) -> Cell {
    transition_with_state(cell, neighbors, lightning_strike, params, rng).0
}

/// Like [`transition`], also returning the tick's [`FireState`].
pub fn transition_with_state<R: Rng + ?Sized>(
    cell: &Cell,
    neighbors: &[Cell; NUM_NEIGHBORS],
    lightning_strike: bool,
    params: &FireParams,
    rng: &mut R,
) -> (Cell, FireState) {
    if cell.is_water() {
        return (*cell, FireState::Normal);
    }

    let mut ctx = StepContext {
        neighbors,
        lightning_strike,
        params,
        rng,
    };

    let w = Working::start(*cell);
    let w = steps::ignite_from_neighbors(w, &mut ctx);
    let w = steps::ignite_from_self(w, &mut ctx);
    let w = steps::classify_fire_change(w);
    let w = steps::update_burn(w, params);
    let w = steps::detect_recovery(w);
    let w = steps::soil_from_neighbors(w, &mut ctx);
    let w = steps::spread_foliage(w, &mut ctx);
    let w = steps::soil_from_self(w, params);
    let w = steps::foliage_from_self(w, &mut ctx);

    (w.cell, w.fire_state)
}

/// Slice-accepting entry point for callers that cannot prove the neighbor
/// count statically. Anything but exactly eight neighbors is rejected.
pub fn transition_checked<R: Rng + ?Sized>(
    cell: &Cell,
    neighbors: &[Cell],
    lightning_strike: bool,
    params: &FireParams,
    rng: &mut R,
) -> Result<Cell, TransitionError> {
    let neighbors: &[Cell; NUM_NEIGHBORS] =
        neighbors
            .try_into()
            .map_err(|_| TransitionError::NeighborCount {
                expected: NUM_NEIGHBORS,
                found: neighbors.len(),
            })?;
    Ok(transition(cell, neighbors, lightning_strike, params, rng))
}
