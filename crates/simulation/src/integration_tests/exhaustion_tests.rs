//! Foliage exhaustion: the grid keeps ticking, but the event fires only once.

use crate::cell::Cell;
use crate::fire_params::FireParams;
use crate::terrain::TerrainConfig;
use crate::test_harness::TestWorld;
use crate::wildfire_grid::FoliageExhausted;

#[test]
fn test_bare_grid_exhausts_on_first_tick() {
    let mut world = TestWorld::with_grid(6, 6, Cell::new(0.5, 0.0, 0.3, false, 0.0));
    world.tick(1);
    assert_eq!(world.exhausted_events(), vec![FoliageExhausted { tick: 1 }]);
    assert_eq!(world.stats().exhausted_at, Some(1));
    assert!(world.stats().last.exhausted);
}

#[test]
fn test_exhaustion_reported_once_and_ticks_continue() {
    let mut world = TestWorld::with_grid(6, 6, Cell::new(0.5, 0.0, 0.3, false, 0.0));
    world.tick(25);
    assert_eq!(world.exhausted_events().len(), 1);
    assert_eq!(world.ticks(), 25);
    assert_eq!(world.stats().ticks, 25);
    assert!(world.grid().is_exhausted());
}

#[test]
fn test_vegetated_grid_is_not_exhausted() {
    let mut params = FireParams::default();
    params.lightning.enabled = false;
    let mut world =
        TestWorld::with_grid(6, 6, Cell::new(0.5, 0.5, 0.8, false, 0.0)).with_params(params);
    world.tick(50);
    assert!(world.exhausted_events().is_empty());
    assert_eq!(world.stats().exhausted_at, None);
}

#[test]
fn test_a_burnt_out_forest_reports_exhaustion() {
    // Everything burns, nothing regrows on the scars.
    let mut params = FireParams::default();
    params.lightning.enabled = false;
    params.ignition.catch_chance_per_fire = 100.0;
    let mut world = TestWorld::with_grid(7, 7, Cell::new(0.5, 0.3, 0.6, false, 0.0))
        .with_params(params)
        .with_cell(3, 3, Cell::new(0.5, 0.3, 0.6, true, 0.0));

    world.tick(40);
    let events = world.exhausted_events();
    assert_eq!(events.len(), 1, "got {events:?}");
    assert!(events[0].tick > 1);
    assert_eq!(world.grid().census().vegetated, 0);
}

#[test]
fn test_flooded_terrain_starts_exhausted() {
    let mut config = TerrainConfig::new(16, 16, 5);
    config.elevation_offset = -1.5;
    let mut world = TestWorld::with_terrain(config);
    assert_eq!(world.grid().census().vegetated, 0);
    world.tick(1);
    assert_eq!(world.exhausted_events(), vec![FoliageExhausted { tick: 1 }]);
}
