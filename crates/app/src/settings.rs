//! Driver settings read from the environment.
//!
//! | Variable             | Meaning                                  |
//! |----------------------|------------------------------------------|
//! | `WILDFIRE_PARAMS`    | JSON file of `FireParams` overrides      |
//! | `WILDFIRE_SEED`      | u64 seed for terrain and the RNG stream  |
//! | `WILDFIRE_MAX_TICKS` | exit after this many ticks               |
//! | `WILDFIRE_SNAPSHOT`  | write a snapshot here on exit            |
//! | `WILDFIRE_WIDTH`     | grid width in cells                      |
//! | `WILDFIRE_HEIGHT`    | grid height in cells                     |

use std::path::PathBuf;

use bevy::prelude::*;
use simulation::config::{GRID_HEIGHT, GRID_WIDTH};
use simulation::fire_params::FireParams;
use simulation::sim_rng::DEFAULT_SEED;

pub const PARAMS_VAR: &str = "WILDFIRE_PARAMS";
pub const SEED_VAR: &str = "WILDFIRE_SEED";
pub const MAX_TICKS_VAR: &str = "WILDFIRE_MAX_TICKS";
pub const SNAPSHOT_VAR: &str = "WILDFIRE_SNAPSHOT";
pub const WIDTH_VAR: &str = "WILDFIRE_WIDTH";
pub const HEIGHT_VAR: &str = "WILDFIRE_HEIGHT";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct DriverSettings {
    pub params: FireParams,
    pub seed: u64,
    pub max_ticks: Option<u64>,
    pub snapshot_path: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            params: FireParams::default(),
            seed: DEFAULT_SEED,
            max_ticks: None,
            snapshot_path: None,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }
}

impl DriverSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any variable source. Bad values are logged and
    /// replaced by their defaults; the driver always starts.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(path) = lookup(PARAMS_VAR) {
            match FireParams::load_json(&path) {
                Ok(params) => {
                    info!("Loaded fire params from {}", path);
                    settings.params = params;
                }
                Err(e) => error!("{}={}: {}; using defaults", PARAMS_VAR, path, e),
            }
        }

        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => settings.seed = seed,
                Err(e) => warn!(
                    "{}={:?} is not a u64 ({}); using {}",
                    SEED_VAR, raw, e, DEFAULT_SEED
                ),
            }
        }

        if let Some(raw) = lookup(MAX_TICKS_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(n) => settings.max_ticks = Some(n),
                Err(e) => warn!(
                    "{}={:?} is not a u64 ({}); running forever",
                    MAX_TICKS_VAR, raw, e
                ),
            }
        }

        if let Some(width) = dimension(&lookup, WIDTH_VAR, GRID_WIDTH) {
            settings.width = width;
        }
        if let Some(height) = dimension(&lookup, HEIGHT_VAR, GRID_HEIGHT) {
            settings.height = height;
        }

        settings.snapshot_path = lookup(SNAPSHOT_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        settings
    }
}

/// A positive grid dimension from `var`, or `None` (logged) when it is
/// unset, malformed or zero.
fn dimension(
    lookup: impl Fn(&str) -> Option<String>,
    var: &str,
    default: usize,
) -> Option<usize> {
    let raw = lookup(var)?;
    match raw.trim().parse::<usize>() {
        Ok(0) => {
            warn!("{}=0 would leave an empty grid; using {}", var, default);
            None
        }
        Ok(n) => Some(n),
        Err(e) => {
            warn!("{}={:?} is not a size ({}); using {}", var, raw, e, default);
            None
        }
    }
}
