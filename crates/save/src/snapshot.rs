// ---------------------------------------------------------------------------
// Snapshot encode/restore over the SaveableRegistry extension map
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;

use bevy::prelude::*;
use simulation::sim_rng::SimRng;
use simulation::wildfire_grid::WildfireGrid;
use simulation::{Saveable, SaveableRegistry, TickCounter};

use crate::file_header::{unwrap_header, wrap_with_header};
use crate::save_error::SaveError;

/// Keys a snapshot must carry to be restorable. Everything else is optional
/// and falls back to whatever the world already holds.
pub const REQUIRED_KEYS: [&str; 3] = [
    WildfireGrid::SAVE_KEY,
    SimRng::SAVE_KEY,
    TickCounter::SAVE_KEY,
];

/// Bitcode payload behind the file header.
#[derive(bitcode::Encode, bitcode::Decode, Debug, Default, PartialEq)]
pub struct SnapshotData {
    /// Tick the snapshot was taken on, duplicated for quick inspection.
    pub tick: u64,
    pub extensions: BTreeMap<String, Vec<u8>>,
}

/// Collect every registered resource into a headered, checksummed snapshot.
pub fn encode_snapshot(world: &World) -> Result<Vec<u8>, SaveError> {
    let registry = world
        .get_resource::<SaveableRegistry>()
        .ok_or_else(|| SaveError::MissingResource("SaveableRegistry".to_string()))?;
    let tick = world
        .get_resource::<TickCounter>()
        .map(|t| t.0)
        .ok_or_else(|| SaveError::MissingResource("TickCounter".to_string()))?;

    let data = SnapshotData {
        tick,
        extensions: registry.save_all(world),
    };
    for key in REQUIRED_KEYS {
        if !data.extensions.contains_key(key) {
            return Err(SaveError::MissingResource(key.to_string()));
        }
    }
    wrap_with_header(&bitcode::encode(&data))
}

/// Validate and decode a snapshot without touching any world.
pub fn decode_snapshot(bytes: &[u8]) -> Result<SnapshotData, SaveError> {
    let (_header, payload) = unwrap_header(bytes)?;
    let data: SnapshotData = bitcode::decode(payload)?;
    for key in REQUIRED_KEYS {
        if !data.extensions.contains_key(key) {
            return Err(SaveError::MissingResource(key.to_string()));
        }
    }
    Ok(data)
}

/// Strictly decode one required resource from a validated snapshot.
fn decode_required<T: Saveable>(data: &SnapshotData) -> Result<T, SaveError> {
    let bytes = data
        .extensions
        .get(T::SAVE_KEY)
        .ok_or_else(|| SaveError::MissingResource(T::SAVE_KEY.to_string()))?;
    T::try_load_from_bytes(bytes).ok_or_else(|| {
        SaveError::Decode(format!("'{}' does not hold a valid value", T::SAVE_KEY))
    })
}

/// Overwrite the registered resources in `world` with a snapshot's contents.
///
/// The required resources are decoded up front, so nothing is modified
/// unless the header, the payload and every required entry are valid.
/// Optional entries that fail to decode fall back to their defaults.
pub fn restore_snapshot(world: &mut World, bytes: &[u8]) -> Result<u64, SaveError> {
    let data = decode_snapshot(bytes)?;
    let grid = decode_required::<WildfireGrid>(&data)?;
    let rng = decode_required::<SimRng>(&data)?;
    let tick = decode_required::<TickCounter>(&data)?;

    let registry = world
        .remove_resource::<SaveableRegistry>()
        .ok_or_else(|| SaveError::MissingResource("SaveableRegistry".to_string()))?;
    let optional: BTreeMap<String, Vec<u8>> = data
        .extensions
        .into_iter()
        .filter(|(key, _)| !REQUIRED_KEYS.contains(&key.as_str()))
        .collect();
    registry.load_all(world, &optional);
    world.insert_resource(registry);

    world.insert_resource(grid);
    world.insert_resource(rng);
    world.insert_resource(tick);
    Ok(data.tick)
}
