//! Initial terrain for the wildfire grid.
//!
//! Elevation comes from a single OpenSimplex2S noise layer sampled across the
//! unit square, so one seed yields one broad landscape rather than small
//! repeating features. Cells that come out barely above sea level start fully
//! vegetated; everything else starts bare and is colonized by spread.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::config::{GRID_HEIGHT, GRID_WIDTH, MIN_ELEVATION_BEFORE_FOLIAGE_START};
use crate::sim_rng::DEFAULT_SEED;
use crate::wildfire_grid::{GridError, WildfireGrid};

// ---------------------------------------------------------------------------
// Terrain configuration resource
// ---------------------------------------------------------------------------

/// Parameters of the initial landscape.
///
/// Saved with snapshots so a restored run knows which terrain it started from.
#[derive(
    Resource, Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
#[serde(default)]
pub struct TerrainConfig {
    pub width: usize,
    pub height: usize,
    /// Noise seed. Only the low 32 bits reach the noise generator.
    pub seed: u64,
    /// Divisor applied to `x` before sampling noise.
    pub noise_scale_x: f64,
    /// Divisor applied to `y` before sampling noise.
    pub noise_scale_y: f64,
    /// Added to the raw noise value before clamping at sea level.
    pub elevation_offset: f64,
    /// Land strictly below this elevation starts with full foliage.
    pub foliage_start_max_elevation: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT, DEFAULT_SEED)
    }
}

impl TerrainConfig {
    /// A config whose noise spans the grid exactly once in each direction.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            seed,
            noise_scale_x: width as f64,
            noise_scale_y: height as f64,
            elevation_offset: 0.0,
            foliage_start_max_elevation: MIN_ELEVATION_BEFORE_FOLIAGE_START,
        }
    }
}

impl crate::Saveable for TerrainConfig {
    const SAVE_KEY: &'static str = "terrain_config";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

/// Marker resource that, when present, stops `init_terrain` from replacing
/// the grid. Tests insert it to start from a hand-built grid.
#[derive(Resource)]
pub struct SkipTerrainInit;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

fn elevation_noise(seed: u64) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed as i32);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2S));
    noise.set_frequency(Some(1.0));
    noise
}

/// Sample the elevation field at `(x, y)`.
pub fn elevation_at(noise: &FastNoiseLite, config: &TerrainConfig, x: usize, y: usize) -> f64 {
    let nx = x as f64 / config.noise_scale_x;
    let ny = y as f64 / config.noise_scale_y;
    let raw = noise.get_noise_2d(nx as f32, ny as f32) as f64;
    (raw + config.elevation_offset).max(0.0)
}

/// The starting cell for a given elevation.
pub fn initial_cell(elevation: f64, config: &TerrainConfig) -> Cell {
    let foliage = if elevation > 0.0 && elevation < config.foliage_start_max_elevation {
        1.0
    } else {
        0.0
    };
    Cell::new(elevation, foliage, 1.0, false, 0.0)
}

/// Build a fresh grid from `config`.
pub fn generate_grid(config: &TerrainConfig) -> Result<WildfireGrid, GridError> {
    if config.width == 0 || config.height == 0 {
        return Err(GridError::EmptyDimensions {
            width: config.width,
            height: config.height,
        });
    }
    let noise = elevation_noise(config.seed);
    let mut cells = Vec::with_capacity(config.width * config.height);
    for y in 0..config.height {
        for x in 0..config.width {
            cells.push(initial_cell(elevation_at(&noise, config, x, y), config));
        }
    }
    WildfireGrid::from_cells(config.width, config.height, cells)
}

// ---------------------------------------------------------------------------
// Startup system
// ---------------------------------------------------------------------------

pub fn init_terrain(
    config: Res<TerrainConfig>,
    mut grid: ResMut<WildfireGrid>,
    skip: Option<Res<SkipTerrainInit>>,
) {
    if skip.is_some() {
        return;
    }
    match generate_grid(&config) {
        Ok(generated) => {
            let census = generated.census();
            info!(
                "Generated {}x{} terrain from seed {}: {} water, {} vegetated",
                config.width, config.height, config.seed, census.water, census.vegetated
            );
            *grid = generated;
        }
        Err(e) => error!("Terrain generation failed, keeping current grid: {}", e),
    }
}

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainConfig>()
            .add_systems(Startup, init_terrain);

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<TerrainConfig>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Saveable;

    #[test]
    fn test_default_config_spans_grid() {
        let config = TerrainConfig::default();
        assert_eq!(config.width, GRID_WIDTH);
        assert_eq!(config.noise_scale_x, GRID_WIDTH as f64);
        assert_eq!(config.noise_scale_y, GRID_HEIGHT as f64);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.foliage_start_max_elevation, 0.01);
    }

    #[test]
    fn test_initial_cell_rules() {
        let config = TerrainConfig::default();

        let water = initial_cell(0.0, &config);
        assert!(water.is_water());
        assert_eq!(water.foliage_density(), 0.0);

        let shore = initial_cell(0.005, &config);
        assert_eq!(shore.foliage_density(), 1.0);
        assert_eq!(shore.soil_quality(), 1.0);
        assert!(!shore.on_fire());

        let hill = initial_cell(0.4, &config);
        assert_eq!(hill.foliage_density(), 0.0);
        assert_eq!(hill.soil_quality(), 1.0);
        assert_eq!(hill.burn_amount(), 0.0);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = TerrainConfig::new(40, 30, 7);
        let a = generate_grid(&config).expect("valid config");
        let b = generate_grid(&config).expect("valid config");
        assert_eq!(a.width(), 40);
        assert_eq!(a.height(), 30);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_generated_cells_in_range() {
        let grid = generate_grid(&TerrainConfig::new(50, 50, 3)).expect("valid config");
        for cell in grid.cells() {
            assert!((0.0..=1.0).contains(&cell.elevation()));
            assert!(cell.foliage_density() == 0.0 || cell.foliage_density() == 1.0);
            assert_eq!(cell.soil_quality(), 1.0);
            assert!(!cell.on_fire());
        }
    }

    #[test]
    fn test_offset_raises_everything_above_water() {
        let mut config = TerrainConfig::new(20, 20, 11);
        config.elevation_offset = 2.0;
        let grid = generate_grid(&config).expect("valid config");
        assert_eq!(grid.census().water, 0);
        // Nothing can sit below the foliage threshold any more.
        assert_eq!(grid.census().vegetated, 0);
    }

    #[test]
    fn test_negative_offset_floods_everything() {
        let mut config = TerrainConfig::new(20, 20, 11);
        config.elevation_offset = -1.5;
        let grid = generate_grid(&config).expect("valid config");
        assert_eq!(grid.census().water, 400);
        assert_eq!(grid.census().vegetated, 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = TerrainConfig::new(0, 10, 1);
        assert!(matches!(
            generate_grid(&config),
            Err(GridError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn test_config_saveable_roundtrip() {
        let config = TerrainConfig::new(64, 32, 99);
        let bytes = config.save_to_bytes().expect("always saves");
        assert_eq!(TerrainConfig::load_from_bytes(&bytes), config);
    }

    #[test]
    fn test_config_json_missing_fields_take_defaults() {
        let config: TerrainConfig =
            serde_json::from_str(r#"{ "seed": 5 }"#).expect("valid json");
        assert_eq!(config.seed, 5);
        assert_eq!(config.width, GRID_WIDTH);
    }
}
