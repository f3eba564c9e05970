use bevy::prelude::*;

use crate::fire_params::FireParams;
use crate::sim_rng::SimRng;
use crate::TickCounter;

use super::resources::{WildfireGrid, WildfireStats};

/// Ticks between census log lines.
const CENSUS_LOG_INTERVAL: u64 = 500;

// =============================================================================
// Events
// =============================================================================

/// Sent once, on the tick the grid first runs out of foliage.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoliageExhausted {
    pub tick: u64,
}

/// Sent whenever lightning strikes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightningStrike {
    pub x: usize,
    pub y: usize,
}

// =============================================================================
// Systems
// =============================================================================

/// Advances the wildfire grid by one generation.
pub fn advance_wildfire(
    mut tick: ResMut<TickCounter>,
    mut grid: ResMut<WildfireGrid>,
    mut rng: ResMut<SimRng>,
    params: Res<FireParams>,
    mut stats: ResMut<WildfireStats>,
    mut strikes: EventWriter<LightningStrike>,
    mut exhausted: EventWriter<FoliageExhausted>,
) {
    let outcome = grid.tick(&params, &mut rng.0);
    tick.0 += 1;

    if let Some((x, y)) = outcome.lightning {
        debug!("Lightning struck ({}, {}) on tick {}", x, y, tick.0);
        strikes.send(LightningStrike { x, y });
    }

    let was_exhausted = stats.exhausted_at.is_some();
    stats.record(&outcome);

    if outcome.exhausted && !was_exhausted {
        warn!(
            "Ran out of foliage on tick {}; the simulation needs a restart",
            tick.0
        );
        exhausted.send(FoliageExhausted { tick: tick.0 });
    }
}

/// Periodic one-line summary of the grid.
pub fn log_census(tick: Res<TickCounter>, stats: Res<WildfireStats>) {
    if tick.0 == 0 || !tick.0.is_multiple_of(CENSUS_LOG_INTERVAL) {
        return;
    }
    let census = stats.last.census;
    info!(
        "tick {}: {} burning, {} scarred, {} vegetated, {} strikes so far",
        tick.0, census.burning, census.scarred, census.vegetated, stats.lightning_strikes
    );
}

// =============================================================================
// Plugin
// =============================================================================

pub struct WildfireGridPlugin;

impl Plugin for WildfireGridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WildfireGrid>()
            .init_resource::<WildfireStats>()
            .add_event::<FoliageExhausted>()
            .add_event::<LightningStrike>()
            .add_systems(
                FixedUpdate,
                (
                    advance_wildfire
                        .in_set(crate::SimulationSet::Simulation)
                        .run_if(not(resource_exists::<crate::SimulationHalted>)),
                    log_census.in_set(crate::SimulationSet::PostSim),
                ),
            );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<WildfireGrid>();
    }
}
