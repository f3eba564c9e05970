use std::path::{Path, PathBuf};

use bevy::prelude::*;
use simulation::SaveableRegistry;

use crate::atomic_write::atomic_write;
use crate::save_error::SaveError;
use crate::snapshot::{encode_snapshot, restore_snapshot};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Request a snapshot of the current world at `path`.
#[derive(Event, Debug, Clone)]
pub struct SaveSnapshotEvent {
    pub path: PathBuf,
}

/// Request that the world be restored from the snapshot at `path`.
#[derive(Event, Debug, Clone)]
pub struct LoadSnapshotEvent {
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Encode `world` and write it to `path`. Returns the number of bytes written.
pub fn write_snapshot_file(world: &World, path: &Path) -> Result<usize, SaveError> {
    let bytes = encode_snapshot(world)?;
    atomic_write(path, &bytes)?;
    Ok(bytes.len())
}

/// Read `path` and restore it into `world`. Returns the snapshot's tick.
pub fn read_snapshot_file(world: &mut World, path: &Path) -> Result<u64, SaveError> {
    let bytes = std::fs::read(path)?;
    restore_snapshot(world, &bytes)
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveSnapshotEvent>()
            .add_event::<LoadSnapshotEvent>()
            .init_resource::<SaveableRegistry>()
            .add_systems(PostUpdate, handle_snapshot_events);
    }
}

/// Exclusive system: saves first, then loads, so a save and a load requested
/// in the same frame capture the pre-load state.
fn handle_snapshot_events(world: &mut World) {
    let saves: Vec<SaveSnapshotEvent> = world
        .resource_mut::<Events<SaveSnapshotEvent>>()
        .drain()
        .collect();
    for event in saves {
        match write_snapshot_file(world, &event.path) {
            Ok(len) => info!("Saved snapshot to {} ({} bytes)", event.path.display(), len),
            Err(e) => error!("Save to {} failed: {}", event.path.display(), e),
        }
    }

    let loads: Vec<LoadSnapshotEvent> = world
        .resource_mut::<Events<LoadSnapshotEvent>>()
        .drain()
        .collect();
    for event in loads {
        match read_snapshot_file(world, &event.path) {
            Ok(tick) => info!(
                "Restored snapshot from {} at tick {}",
                event.path.display(),
                tick
            ),
            Err(e) => error!("Load from {} failed: {}", event.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::cell::Cell;
    use simulation::terrain::SkipTerrainInit;
    use simulation::wildfire_grid::WildfireGrid;
    use simulation::{SimulationPlugin, TickCounter};

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SkipTerrainInit);
        app.add_plugins((SimulationPlugin, SavePlugin));
        app
    }

    #[test]
    fn test_save_and_load_events_roundtrip_through_disk() {
        let dir = std::env::temp_dir().join("wildfire_save_plugin_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("snapshot.bin");

        let mut source = app();
        source.insert_resource(
            WildfireGrid::new(6, 4, Cell::new(0.3, 0.5, 0.6, false, 0.0)).unwrap(),
        );
        for _ in 0..12 {
            source.world_mut().run_schedule(FixedUpdate);
        }
        source.world_mut().send_event(SaveSnapshotEvent { path: path.clone() });
        source.update();
        assert!(path.exists());

        let mut target = app();
        target.world_mut().send_event(LoadSnapshotEvent { path: path.clone() });
        target.update();

        assert_eq!(target.world().resource::<TickCounter>().0, 12);
        assert_eq!(
            target.world().resource::<WildfireGrid>().cells(),
            source.world().resource::<WildfireGrid>().cells()
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let mut world = World::new();
        let err = read_snapshot_file(
            &mut world,
            Path::new("/definitely/not/a/wildfire/snapshot.bin"),
        )
        .expect_err("missing file");
        assert!(matches!(err, SaveError::Io(_)));
    }
}
