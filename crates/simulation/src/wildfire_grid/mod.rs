mod engine;
mod resources;
mod systems;

pub use resources::{GridCensus, GridError, TickOutcome, WildfireGrid, WildfireStats};
pub use systems::{
    advance_wildfire, log_census, FoliageExhausted, LightningStrike, WildfireGridPlugin,
};

use bevy::prelude::*;

use crate::cell::Cell;

// =============================================================================
// Saveable implementation
// =============================================================================

#[derive(bitcode::Encode, bitcode::Decode)]
struct GridSnapshot {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl crate::Saveable for WildfireGrid {
    const SAVE_KEY: &'static str = "wildfire_grid";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        let snapshot = GridSnapshot {
            width: self.width() as u32,
            height: self.height() as u32,
            cells: self.cells().to_vec(),
        };
        Some(bitcode::encode(&snapshot))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        Self::try_load_from_bytes(bytes).unwrap_or_default()
    }

    fn try_load_from_bytes(bytes: &[u8]) -> Option<Self> {
        let snapshot = crate::try_decode::<GridSnapshot>(Self::SAVE_KEY, bytes)?;
        match Self::from_cells(
            snapshot.width as usize,
            snapshot.height as usize,
            snapshot.cells,
        ) {
            Ok(grid) => Some(grid),
            Err(e) => {
                warn!("WildfireGrid: inconsistent saved grid: {}", e);
                None
            }
        }
    }
}
