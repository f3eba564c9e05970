/// One square of terrain.
///
/// All bounded fields live in `[0, 1]` and are clamped on every write, so an
/// out-of-range state can never be stored. An elevation of exactly `0` marks
/// water: such a cell is frozen and never evolves.
#[derive(Debug, Clone, Copy, Default, bitcode::Encode, bitcode::Decode)]
pub struct Cell {
    elevation: f64,
    foliage_density: f64,
    soil_quality: f64,
    on_fire: bool,
    burn_amount: f64,
    /// Foliage density at the moment the current/last fire ignited.
    foliage_before_fire: f64,
}

impl Cell {
    /// All-zero water cell substituted for neighbors beyond the grid border.
    pub const VOID: Cell = Cell {
        elevation: 0.0,
        foliage_density: 0.0,
        soil_quality: 0.0,
        on_fire: false,
        burn_amount: 0.0,
        foliage_before_fire: 0.0,
    };

    pub fn new(
        elevation: f64,
        foliage_density: f64,
        soil_quality: f64,
        on_fire: bool,
        burn_amount: f64,
    ) -> Self {
        let mut cell = Self::VOID;
        cell.set_elevation(elevation);
        cell.set_foliage_density(foliage_density);
        cell.set_soil_quality(soil_quality);
        cell.set_on_fire(on_fire);
        cell.set_burn_amount(burn_amount);
        cell
    }

    /// A bare cell at the given elevation with no foliage or soil.
    pub fn with_elevation(elevation: f64) -> Self {
        Self::new(elevation, 0.0, 0.0, false, 0.0)
    }

    #[inline]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    #[inline]
    pub fn foliage_density(&self) -> f64 {
        self.foliage_density
    }

    #[inline]
    pub fn soil_quality(&self) -> f64 {
        self.soil_quality
    }

    #[inline]
    pub fn on_fire(&self) -> bool {
        self.on_fire
    }

    #[inline]
    pub fn burn_amount(&self) -> f64 {
        self.burn_amount
    }

    #[inline]
    pub fn foliage_before_fire(&self) -> f64 {
        self.foliage_before_fire
    }

    #[inline]
    pub fn is_water(&self) -> bool {
        self.elevation == 0.0
    }

    pub fn set_elevation(&mut self, value: f64) {
        self.elevation = clamp_unit(value);
    }

    pub fn set_foliage_density(&mut self, value: f64) {
        self.foliage_density = clamp_unit(value);
    }

    pub fn set_soil_quality(&mut self, value: f64) {
        self.soil_quality = clamp_unit(value);
    }

    pub fn set_on_fire(&mut self, value: bool) {
        self.on_fire = value;
    }

    pub fn set_burn_amount(&mut self, value: f64) {
        self.burn_amount = clamp_unit(value);
    }

    pub(crate) fn set_foliage_before_fire(&mut self, value: f64) {
        self.foliage_before_fire = value;
    }
}

/// Equality covers the observable state only; `foliage_before_fire` is
/// bookkeeping and does not participate.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.elevation == other.elevation
            && self.foliage_density == other.foliage_density
            && self.soil_quality == other.soil_quality
            && self.on_fire == other.on_fire
            && self.burn_amount == other.burn_amount
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (elevation {:.3}, soil {:.3}, foliage {:.3}, burn {:.3})",
            if self.on_fire { "burning" } else { "not burning" },
            self.elevation,
            self.soil_quality,
            self.foliage_density,
            self.burn_amount
        )
    }
}

/// Clamp into `[0, 1]`. NaN collapses to `0`.
#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
