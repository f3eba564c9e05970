use rand::Rng;

use crate::cell::Cell;
use crate::config::NUM_NEIGHBORS;
use crate::fire_params::FireParams;

// =============================================================================
// Fire state
// =============================================================================

/// Per-tick classification of what happened to a cell's fire.
///
/// Recomputed on every transition and never stored on the cell. Later steps
/// of the pipeline branch on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FireState {
    #[default]
    Normal,
    /// The cell ignited this tick.
    FireStarted,
    /// The cell's fire went out this tick.
    FireEnded,
    /// The cell's burn scar fully healed this tick.
    BoostSoil,
}

// =============================================================================
// Pipeline state
// =============================================================================

/// The cell being rewritten plus the bookkeeping the steps share.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Working {
    pub cell: Cell,
    pub fire_state: FireState,
    before_fire: bool,
    before_burn: f64,
}

impl Working {
    pub fn start(cell: Cell) -> Self {
        Self {
            cell,
            fire_state: FireState::Normal,
            before_fire: cell.on_fire(),
            before_burn: cell.burn_amount(),
        }
    }
}

/// Read-only inputs for one transition plus the random source.
pub(crate) struct StepContext<'a, R: Rng + ?Sized> {
    pub neighbors: &'a [Cell; NUM_NEIGHBORS],
    pub lightning_strike: bool,
    pub params: &'a FireParams,
    pub rng: &'a mut R,
}

/// Mean foliage density over all eight neighbors, void cells included.
#[inline]
pub(crate) fn mean_neighbor_foliage(neighbors: &[Cell; NUM_NEIGHBORS]) -> f64 {
    let total: f64 = neighbors.iter().map(Cell::foliage_density).sum();
    total / NUM_NEIGHBORS as f64
}

// =============================================================================
// Steps, in pipeline order
// =============================================================================

/// Burning neighbors may set this cell alight.
///
/// The odds come from rounding: `round(catch_chance) == 0` ignites outright,
/// otherwise one uniform draw `u` ignites when `round(u * catch_chance) == 0`.
/// The draw is only taken when the first test fails.
pub(crate) fn ignite_from_neighbors<R: Rng + ?Sized>(
    mut w: Working,
    ctx: &mut StepContext<'_, R>,
) -> Working {
    if w.cell.on_fire() {
        return w;
    }
    let foliage = w.cell.foliage_density();
    if foliage < ctx.params.ignition.catch_min_foliage {
        return w;
    }

    let burning = ctx.neighbors.iter().filter(|n| n.on_fire()).count();
    let fire_intensity = burning as f64 * ctx.params.ignition.catch_chance_per_fire;
    if fire_intensity <= 0.0 || foliage == 0.0 {
        return w;
    }

    let catch_chance = ctx.params.ignition.catch_chance / (fire_intensity * foliage);
    let ignites = catch_chance.round() == 0.0
        || (ctx.rng.gen::<f64>() * catch_chance).round() == 0.0;
    w.cell.set_on_fire(ignites);
    w
}

/// Lightning forces ignition; a fire with no fuel left goes out.
pub(crate) fn ignite_from_self<R: Rng + ?Sized>(
    mut w: Working,
    ctx: &mut StepContext<'_, R>,
) -> Working {
    let foliage = w.cell.foliage_density();
    let on_fire = if ctx.lightning_strike && foliage != 0.0 {
        true
    } else {
        w.cell.on_fire() && foliage != 0.0
    };
    w.cell.set_on_fire(on_fire);
    w
}

pub(crate) fn classify_fire_change(mut w: Working) -> Working {
    if w.cell.on_fire() == w.before_fire {
        return w;
    }
    if w.cell.on_fire() {
        w.fire_state = FireState::FireStarted;
        let foliage = w.cell.foliage_density();
        w.cell.set_foliage_before_fire(foliage);
    } else {
        w.fire_state = FireState::FireEnded;
    }
    w
}

/// Heal an existing scar, or open one sized by the foliage the fire consumed.
pub(crate) fn update_burn(mut w: Working, params: &FireParams) -> Working {
    let burn = w.cell.burn_amount();
    let next = if burn > 0.0 {
        burn - params.burn.recovery_rate
    } else if w.fire_state == FireState::FireEnded {
        w.cell.foliage_before_fire()
    } else {
        0.0
    };
    w.cell.set_burn_amount(next);
    w
}

pub(crate) fn detect_recovery(mut w: Working) -> Working {
    let burn = w.cell.burn_amount();
    if burn != w.before_burn && burn == 0.0 {
        w.fire_state = FireState::BoostSoil;
    }
    w
}

/// Soil drifts with the plant cover around the cell.
pub(crate) fn soil_from_neighbors<R: Rng + ?Sized>(
    mut w: Working,
    ctx: &mut StepContext<'_, R>,
) -> Working {
    let mean = mean_neighbor_foliage(ctx.neighbors);
    let soil = soil_drift(w.cell.soil_quality(), mean, ctx.params);
    w.cell.set_soil_quality(soil);
    w
}

/// Seed a bare, healthy, low-lying cell from well-vegetated neighbors.
pub(crate) fn spread_foliage<R: Rng + ?Sized>(
    mut w: Working,
    ctx: &mut StepContext<'_, R>,
) -> Working {
    let foliage = &ctx.params.foliage;
    let mean = mean_neighbor_foliage(ctx.neighbors);
    let cell = &w.cell;
    if cell.foliage_density() == 0.0
        && cell.elevation() < foliage.max_growth_elevation
        && cell.soil_quality() > foliage.growth_soil_threshold
        && cell.burn_amount() == 0.0
        && mean > foliage.spread_min_neighbor_foliage
    {
        w.cell.set_foliage_density(mean * foliage.start_growth_ratio);
    }
    w
}

/// Soil boost after recovery, otherwise drift with the cell's own cover.
pub(crate) fn soil_from_self(mut w: Working, params: &FireParams) -> Working {
    let soil = w.cell.soil_quality();
    let next = if w.fire_state == FireState::BoostSoil {
        soil + params.burn.max_soil_boost * w.cell.foliage_before_fire()
    } else {
        soil_drift(soil, w.cell.foliage_density(), params)
    };
    w.cell.set_soil_quality(next);
    w
}

/// Burn, grow, die off, or stay bare.
pub(crate) fn foliage_from_self<R: Rng + ?Sized>(
    mut w: Working,
    ctx: &mut StepContext<'_, R>,
) -> Working {
    let cell = &w.cell;
    let foliage = cell.foliage_density();
    let next = if foliage == 0.0 {
        0.0
    } else if cell.on_fire() {
        foliage - ctx.params.burn.burn_rate
    } else if cell.burn_amount() == 0.0 {
        let growth = &ctx.params.foliage;
        foliage
            + (cell.soil_quality() - growth.growth_soil_threshold)
                * ctx.rng.gen::<f64>()
                * growth.max_growth
    } else {
        0.0
    };
    w.cell.set_foliage_density(next);
    w
}

/// Shared decay/restore rule keyed on a foliage level.
#[inline]
fn soil_drift(soil: f64, foliage: f64, params: &FireParams) -> f64 {
    if foliage < params.soil.decay_below_foliage {
        soil - params.soil.decay
    } else if foliage >= params.soil.restore_at_foliage {
        soil + params.soil.restore
    } else {
        soil
    }
}
