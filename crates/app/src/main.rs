mod driver;
mod settings;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::config::TICK_INTERVAL_MS;
use simulation::sim_rng::SimRng;
use simulation::terrain::TerrainConfig;

use crate::driver::DriverPlugin;
use crate::settings::DriverSettings;

fn main() {
    let tick = Duration::from_millis(TICK_INTERVAL_MS);
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)),
        LogPlugin::default(),
    ))
    .insert_resource(Time::<Fixed>::from_duration(tick));

    // Read after LogPlugin so bad settings are reported through the logger.
    let settings = DriverSettings::from_env();
    info!(
        "Starting {}x{} wildfire, seed {}, {}",
        settings.width,
        settings.height,
        settings.seed,
        match settings.max_ticks {
            Some(n) => format!("stopping after {n} ticks"),
            None => "running until interrupted".to_string(),
        }
    );

    app.insert_resource(TerrainConfig::new(settings.width, settings.height, settings.seed))
        .insert_resource(SimRng::from_seed_u64(settings.seed))
        .add_plugins((simulation::SimulationPlugin, save::SavePlugin, DriverPlugin))
        .insert_resource(settings.params.clone())
        .insert_resource(settings);

    app.run();
}
