//! Systems the headless driver adds on top of the simulation.

use bevy::prelude::*;
use save::SaveSnapshotEvent;
use simulation::wildfire_grid::LightningStrike;
use simulation::{SimulationHalted, SimulationSet, TickCounter};

use crate::settings::DriverSettings;

/// Log every strike so runs can be followed from the console.
pub fn log_lightning(mut strikes: EventReader<LightningStrike>, tick: Res<TickCounter>) {
    for strike in strikes.read() {
        info!("Lightning at ({}, {}) on tick {}", strike.x, strike.y, tick.0);
    }
}

/// Halt the grid, request the exit snapshot and stop once the tick budget is
/// spent. Halting keeps any further fixed steps of the current frame from
/// ticking past the limit before the exit takes effect.
pub fn stop_after_max_ticks(
    mut commands: Commands,
    tick: Res<TickCounter>,
    settings: Res<DriverSettings>,
    halted: Option<Res<SimulationHalted>>,
    mut saves: EventWriter<SaveSnapshotEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(max) = settings.max_ticks else {
        return;
    };
    if halted.is_some() || tick.0 < max {
        return;
    }
    commands.insert_resource(SimulationHalted);
    info!("Reached {} ticks, stopping", tick.0);
    if let Some(path) = &settings.snapshot_path {
        saves.send(SaveSnapshotEvent { path: path.clone() });
    }
    exit.send(AppExit::Success);
}

pub struct DriverPlugin;

impl Plugin for DriverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DriverSettings>().add_systems(
            FixedUpdate,
            (log_lightning, stop_after_max_ticks).in_set(SimulationSet::PostSim),
        );
    }
}
