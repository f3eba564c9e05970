use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod cell;
pub mod config;
pub mod fire_params;
pub mod sim_rng;
pub mod simulation_sets;
pub mod terrain;
pub mod transition;
pub mod wildfire_grid;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Saveable trait + registry for the extension map save pattern
// ---------------------------------------------------------------------------

/// Trait for resources that can be saved/loaded via the snapshot extension map.
///
/// Each implementing resource provides its own serialization logic; plugins
/// register their resources with `SaveableRegistry::register` in `build()`
/// and the save crate never needs to know the concrete types.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Unique key for this resource in the extension map.
    /// Must be stable across versions (used for deserialization lookup).
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes.
    /// Return `None` to skip saving (e.g. when the resource is at its default state).
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Deserialize from bytes, returning the restored resource.
    fn load_from_bytes(bytes: &[u8]) -> Self;

    /// Strict form of [`Saveable::load_from_bytes`]: `None` when the bytes do
    /// not hold a valid value, instead of falling back to a default.
    fn try_load_from_bytes(bytes: &[u8]) -> Option<Self> {
        Some(Self::load_from_bytes(bytes))
    }
}

/// Decode bytes via `bitcode::decode`, logging a warning on failure.
pub fn try_decode<T: bitcode::DecodeOwned>(key: &str, bytes: &[u8]) -> Option<T> {
    match bitcode::decode(bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes: {}",
                key,
                bytes.len(),
                e
            );
            None
        }
    }
}

/// Like [`try_decode`], but returns `Default` on failure.
/// Use this in `Saveable::load_from_bytes` implementations to surface decode errors.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    try_decode(key, bytes).unwrap_or_default()
}

/// Type alias for the save function stored in a `SaveableEntry`.
pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
/// Type alias for the load function stored in a `SaveableEntry`.
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
/// Type alias for the reset function stored in a `SaveableEntry`.
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for a single registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Registry of all saveable resources, populated during plugin setup.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type that implements `Saveable`.
    ///
    /// Panics in debug builds if a resource with the same `SAVE_KEY` is already
    /// registered.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!(
                "SaveableRegistry: duplicate key '{}', ignoring second registration",
                key
            );
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                let value = T::load_from_bytes(bytes);
                world.insert_resource(value);
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Save all registered resources into an extension map.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Load registered resources from an extension map.
    /// Resources whose key is absent are left unchanged.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    /// Reset all registered resources to their defaults.
    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Number of wildfire generations computed so far.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCounter(pub u64);

impl Saveable for TickCounter {
    const SAVE_KEY: &'static str = "tick_counter";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(self.0.to_le_bytes().to_vec())
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        Self::try_load_from_bytes(bytes).unwrap_or_default()
    }

    fn try_load_from_bytes(bytes: &[u8]) -> Option<Self> {
        match <[u8; 8]>::try_from(bytes) {
            Ok(raw) => Some(TickCounter(u64::from_le_bytes(raw))),
            Err(_) => {
                warn!(
                    "Saveable {}: expected 8 bytes, got {}",
                    Self::SAVE_KEY,
                    bytes.len()
                );
                None
            }
        }
    }
}

/// While present, the grid stops advancing. Drivers insert it once their
/// tick budget is spent so catch-up fixed steps in the same frame do nothing.
#[derive(Resource, Debug, Default)]
pub struct SimulationHalted;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (SimulationSet::Simulation, SimulationSet::PostSim).chain(),
        );

        app.init_resource::<TickCounter>()
            .init_resource::<SaveableRegistry>();
        app.world_mut()
            .resource_mut::<SaveableRegistry>()
            .register::<TickCounter>();

        app.add_plugins((
            sim_rng::SimRngPlugin,
            fire_params::FireParamsPlugin,
            wildfire_grid::WildfireGridPlugin,
            terrain::TerrainPlugin,
        ));
    }
}
