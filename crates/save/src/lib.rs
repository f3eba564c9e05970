//! Snapshot persistence for the wildfire simulation.
//!
//! A snapshot is the `SaveableRegistry` extension map (grid, RNG stream,
//! fire params, terrain config, tick) encoded with bitcode behind a
//! checksummed file header.

mod atomic_write;
pub mod file_header;
pub mod save_error;
mod save_plugin;
pub mod snapshot;

pub use save_error::SaveError;
pub use save_plugin::{
    read_snapshot_file, write_snapshot_file, LoadSnapshotEvent, SavePlugin, SaveSnapshotEvent,
};
pub use snapshot::{decode_snapshot, encode_snapshot, restore_snapshot, SnapshotData};
