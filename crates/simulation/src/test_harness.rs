//! # TestWorld: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so tests can build a grid,
//! tick the `FixedUpdate` schedule directly and assert on the resulting
//! resources without a window or a schedule runner.

use bevy::app::App;
use bevy::prelude::*;

use crate::cell::Cell;
use crate::fire_params::FireParams;
use crate::sim_rng::SimRng;
use crate::terrain::{SkipTerrainInit, TerrainConfig};
use crate::wildfire_grid::{FoliageExhausted, LightningStrike, WildfireGrid, WildfireStats};
use crate::{SimulationPlugin, TickCounter};

pub struct TestWorld {
    app: App,
}

impl TestWorld {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A `width` x `height` grid filled with `fill`, terrain generation skipped.
    pub fn with_grid(width: usize, height: usize, fill: Cell) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // Insert the marker BEFORE SimulationPlugin so init_terrain skips.
        app.insert_resource(SkipTerrainInit);
        app.add_plugins(SimulationPlugin);
        app.insert_resource(
            WildfireGrid::new(width, height, fill).expect("test grid dimensions are non-zero"),
        );
        app.update();
        Self { app }
    }

    /// A world whose grid comes from the terrain generator.
    pub fn with_terrain(config: TerrainConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    pub fn with_params(mut self, params: FireParams) -> Self {
        self.app.insert_resource(params);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.insert_resource(SimRng::from_seed_u64(seed));
        self
    }

    pub fn with_cell(mut self, x: usize, y: usize, cell: Cell) -> Self {
        self.grid_mut()
            .set(x, y, cell)
            .expect("test cell inside the grid");
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run `n` simulation ticks by invoking the `FixedUpdate` schedule directly.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn grid(&self) -> &WildfireGrid {
        self.app.world().resource::<WildfireGrid>()
    }

    pub fn grid_mut(&mut self) -> Mut<'_, WildfireGrid> {
        self.app.world_mut().resource_mut::<WildfireGrid>()
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        *self.grid().get(x, y)
    }

    pub fn stats(&self) -> &WildfireStats {
        self.app.world().resource::<WildfireStats>()
    }

    pub fn ticks(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    /// All `FoliageExhausted` events still in the event buffer.
    pub fn exhausted_events(&self) -> Vec<FoliageExhausted> {
        let events = self.app.world().resource::<Events<FoliageExhausted>>();
        events.iter_current_update_events().copied().collect()
    }

    pub fn lightning_events(&self) -> Vec<LightningStrike> {
        let events = self.app.world().resource::<Events<LightningStrike>>();
        events.iter_current_update_events().copied().collect()
    }
}
