//! Tunable constants for the wildfire automaton.
//!
//! Every threshold and rate the transition and grid engines use lives in the
//! [`FireParams`] resource. Defaults are the hand-tuned values the automaton
//! was calibrated with; overrides can be loaded from JSON so small test
//! grids and experiments can change behavior without recompilation. The
//! resource is registered via the `Saveable` trait so overrides travel with
//! snapshots.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ignition parameters
// ---------------------------------------------------------------------------

/// How burning neighbors set a cell alight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct IgnitionParams {
    /// Fire intensity contributed by each burning neighbor.
    pub catch_chance_per_fire: f64,
    /// Numerator of the catch-chance ratio. Larger means harder to ignite.
    pub catch_chance: f64,
    /// Minimum foliage density a cell needs before neighbors can ignite it.
    pub catch_min_foliage: f64,
}

impl Default for IgnitionParams {
    fn default() -> Self {
        Self {
            catch_chance_per_fire: 1.0,
            catch_chance: 10.0,
            catch_min_foliage: 0.2,
        }
    }
}

// ---------------------------------------------------------------------------
// Burn parameters
// ---------------------------------------------------------------------------

/// Fuel consumption while burning and scar recovery afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct BurnParams {
    /// Foliage consumed per tick while on fire.
    pub burn_rate: f64,
    /// Burn amount healed per tick.
    pub recovery_rate: f64,
    /// Soil boost on full recovery, scaled by the foliage lost to the fire.
    pub max_soil_boost: f64,
}

impl Default for BurnParams {
    fn default() -> Self {
        Self {
            burn_rate: 0.05,
            recovery_rate: 0.005,
            max_soil_boost: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Soil parameters
// ---------------------------------------------------------------------------

/// Soil fertility drift driven by nearby plant cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct SoilParams {
    /// Foliage below this decays the soil.
    pub decay_below_foliage: f64,
    /// Soil lost per tick when decaying.
    pub decay: f64,
    /// Foliage at or above this restores the soil.
    pub restore_at_foliage: f64,
    /// Soil gained per tick when restoring.
    pub restore: f64,
}

impl Default for SoilParams {
    fn default() -> Self {
        Self {
            decay_below_foliage: 0.1,
            decay: 0.0001,
            restore_at_foliage: 0.2,
            restore: 0.02,
        }
    }
}

// ---------------------------------------------------------------------------
// Foliage parameters
// ---------------------------------------------------------------------------

/// Plant spread into bare cells and growth/die-off of existing cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct FoliageParams {
    /// Bare cells at or above this elevation never get seeded.
    pub max_growth_elevation: f64,
    /// Mean neighbor foliage must exceed this to seed a bare cell.
    pub spread_min_neighbor_foliage: f64,
    /// Soil quality pivot: above it foliage grows, below it foliage dies off.
    pub growth_soil_threshold: f64,
    /// Largest per-tick growth step.
    pub max_growth: f64,
    /// Fraction of the mean neighbor foliage planted into a bare cell.
    pub start_growth_ratio: f64,
}

impl Default for FoliageParams {
    fn default() -> Self {
        Self {
            max_growth_elevation: 0.7,
            spread_min_neighbor_foliage: 0.1,
            growth_soil_threshold: 0.5,
            max_growth: 0.05,
            start_growth_ratio: 0.1,
        }
    }
}

// ---------------------------------------------------------------------------
// Lightning parameters
// ---------------------------------------------------------------------------

/// Random lightning strikes, at most one per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
#[serde(default)]
pub struct LightningParams {
    pub enabled: bool,
    /// One-in-`chance` odds of a strike each tick.
    pub chance: u32,
}

impl Default for LightningParams {
    fn default() -> Self {
        Self {
            enabled: true,
            chance: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level FireParams resource
// ---------------------------------------------------------------------------

/// Central resource holding every wildfire tunable.
#[derive(
    Resource,
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
    Default,
)]
#[serde(default)]
pub struct FireParams {
    pub ignition: IgnitionParams,
    pub burn: BurnParams,
    pub soil: SoilParams,
    pub foliage: FoliageParams,
    pub lightning: LightningParams,
}

impl FireParams {
    /// Parse overrides from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ParamsError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| ParamsError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Read and parse a JSON override file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ParamsError> {
        serde_json::to_string_pretty(self).map_err(|e| ParamsError::Parse(e.to_string()))
    }

    /// Reject values the engines cannot run with.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.lightning.chance == 0 {
            return Err(ParamsError::Invalid(
                "lightning.chance must be at least 1".to_string(),
            ));
        }

        let fields = [
            ("ignition.catch_chance_per_fire", self.ignition.catch_chance_per_fire),
            ("ignition.catch_chance", self.ignition.catch_chance),
            ("ignition.catch_min_foliage", self.ignition.catch_min_foliage),
            ("burn.burn_rate", self.burn.burn_rate),
            ("burn.recovery_rate", self.burn.recovery_rate),
            ("burn.max_soil_boost", self.burn.max_soil_boost),
            ("soil.decay_below_foliage", self.soil.decay_below_foliage),
            ("soil.decay", self.soil.decay),
            ("soil.restore_at_foliage", self.soil.restore_at_foliage),
            ("soil.restore", self.soil.restore),
            ("foliage.max_growth_elevation", self.foliage.max_growth_elevation),
            (
                "foliage.spread_min_neighbor_foliage",
                self.foliage.spread_min_neighbor_foliage,
            ),
            ("foliage.growth_soil_threshold", self.foliage.growth_soil_threshold),
            ("foliage.max_growth", self.foliage.max_growth),
            ("foliage.start_growth_ratio", self.foliage.start_growth_ratio),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ParamsError
// ---------------------------------------------------------------------------

/// Errors raised while loading or validating [`FireParams`].
#[derive(Debug)]
pub enum ParamsError {
    Io(std::io::Error),
    /// The JSON was malformed or had the wrong shape.
    Parse(String),
    /// The values parsed but cannot drive the simulation.
    Invalid(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "I/O error reading fire params: {e}"),
            ParamsError::Parse(msg) => write!(f, "Malformed fire params: {msg}"),
            ParamsError::Invalid(msg) => write!(f, "Invalid fire params: {msg}"),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Saveable implementation
// ---------------------------------------------------------------------------

impl crate::Saveable for FireParams {
    const SAVE_KEY: &'static str = "fire_params";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Always save so a snapshot taken under overrides restores them.
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct FireParamsPlugin;

impl Plugin for FireParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FireParams>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<FireParams>();
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
