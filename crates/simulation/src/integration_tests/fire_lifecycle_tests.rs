//! Fire lifecycle through the plugin: lightning ignites, fuel burns away, the
//! fire goes out, the scar heals and the soil gets its boost.

use crate::cell::Cell;
use crate::fire_params::FireParams;
use crate::test_harness::TestWorld;
use crate::wildfire_grid::LightningStrike;
use crate::SimulationHalted;

// ====================================================================
// Helpers
// ====================================================================

/// Lightning every tick.
fn constant_lightning() -> FireParams {
    let mut params = FireParams::default();
    params.lightning.chance = 1;
    params
}

fn no_lightning() -> FireParams {
    let mut params = FireParams::default();
    params.lightning.enabled = false;
    params
}

/// Tick until `done` holds, returning how many ticks it took.
fn tick_until(world: &mut TestWorld, limit: u32, done: impl Fn(&TestWorld) -> bool) -> u32 {
    for n in 1..=limit {
        world.tick(1);
        if done(world) {
            return n;
        }
    }
    panic!("condition not reached within {limit} ticks");
}

// ====================================================================
// Tests
// ====================================================================

#[test]
fn test_lightning_strike_ignites_and_is_reported() {
    // On a 1x1 grid every strike lands on (0, 0).
    let mut world = TestWorld::with_grid(1, 1, Cell::new(0.5, 0.6, 0.5, false, 0.0))
        .with_params(constant_lightning());
    world.tick(1);

    let cell = world.cell(0, 0);
    assert!(cell.on_fire());
    assert_eq!(cell.foliage_before_fire(), 0.6);
    assert!((cell.foliage_density() - 0.55).abs() < 1e-12);
    assert_eq!(world.lightning_events(), vec![LightningStrike { x: 0, y: 0 }]);
    assert_eq!(world.stats().lightning_strikes, 1);
    assert_eq!(world.stats().total_ignitions, 1);
}

#[test]
fn test_single_cell_full_lifecycle() {
    let mut world = TestWorld::with_grid(1, 1, Cell::new(0.5, 0.2, 0.5, false, 0.0))
        .with_params(constant_lightning());

    // Ignite.
    world.tick(1);
    assert!(world.cell(0, 0).on_fire());

    // Burn through the fuel; lightning keeps striking but cannot relight bare ground.
    tick_until(&mut world, 20, |w| !w.cell(0, 0).on_fire());
    let scarred = world.cell(0, 0);
    assert_eq!(scarred.foliage_density(), 0.0);
    assert!((scarred.burn_amount() - 0.2).abs() < 1e-12);

    // Scar decays by the recovery rate each tick.
    world.tick(1);
    assert!((world.cell(0, 0).burn_amount() - 0.195).abs() < 1e-9);

    // Heal, and check the soil boost on the tick the scar reaches zero.
    let mut soil_before = world.cell(0, 0).soil_quality();
    loop {
        world.tick(1);
        let cell = world.cell(0, 0);
        if cell.burn_amount() == 0.0 {
            // Neighbors are void (decay), then the boost replaces self-drift.
            let expected = soil_before - 0.0001 + 0.5 * 0.2;
            assert!((cell.soil_quality() - expected).abs() < 1e-9);
            break;
        }
        soil_before = cell.soil_quality();
        assert!(world.ticks() < 200, "scar never healed");
    }
    assert_eq!(world.stats().total_recoveries, 1);
    assert!(!world.cell(0, 0).on_fire());
}

#[test]
fn test_fire_spreads_one_ring_per_tick() {
    let mut params = no_lightning();
    params.ignition.catch_chance_per_fire = 100.0;
    let mut world = TestWorld::with_grid(11, 11, Cell::new(0.5, 1.0, 0.6, false, 0.0))
        .with_params(params)
        .with_cell(5, 5, Cell::new(0.5, 1.0, 0.6, true, 0.0));

    world.tick(1);
    assert_eq!(world.grid().census().burning, 9);
    world.tick(1);
    assert_eq!(world.grid().census().burning, 25);
    assert!(!world.cell(2, 5).on_fire());
}

#[test]
fn test_water_blocks_fire() {
    let mut params = no_lightning();
    params.ignition.catch_chance_per_fire = 100.0;
    let mut world = TestWorld::with_grid(9, 9, Cell::new(0.5, 1.0, 0.6, false, 0.0))
        .with_params(params)
        .with_cell(2, 4, Cell::new(0.5, 1.0, 0.6, true, 0.0));
    // A river along x = 4.
    for y in 0..9 {
        world = world.with_cell(4, y, Cell::new(0.0, 0.0, 0.0, false, 0.0));
    }

    world.tick(10);
    for y in 0..9 {
        for x in 5..9 {
            let cell = world.cell(x, y);
            assert!(!cell.on_fire(), "fire crossed the river at ({x}, {y})");
            assert_eq!(cell.burn_amount(), 0.0);
        }
    }
}

#[test]
fn test_no_lightning_no_fire() {
    let mut world = TestWorld::with_grid(8, 8, Cell::new(0.5, 0.8, 0.9, false, 0.0))
        .with_params(no_lightning());
    world.tick(200);
    assert_eq!(world.stats().total_ignitions, 0);
    assert!(world.lightning_events().is_empty());
    assert_eq!(world.grid().census().burning, 0);
}

#[test]
fn test_halted_simulation_does_not_advance() {
    let mut world = TestWorld::with_grid(6, 6, Cell::new(0.5, 0.6, 0.7, false, 0.0))
        .with_params(constant_lightning());
    world.tick(3);
    let cells = world.grid().cells().to_vec();

    world.world_mut().insert_resource(SimulationHalted);
    world.tick(10);
    assert_eq!(world.ticks(), 3);
    assert_eq!(world.grid().cells(), cells.as_slice());
    assert_eq!(world.stats().lightning_strikes, 3);

    world.world_mut().remove_resource::<SimulationHalted>();
    world.tick(1);
    assert_eq!(world.ticks(), 4);
}
