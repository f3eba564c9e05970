use std::fmt;

use bevy::prelude::*;

use crate::cell::Cell;
use crate::config::{GRID_HEIGHT, GRID_WIDTH};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height was zero.
    EmptyDimensions { width: usize, height: usize },
    /// The supplied cell buffer does not hold `width * height` cells.
    CellCountMismatch { expected: usize, found: usize },
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyDimensions { width, height } => {
                write!(f, "grid dimensions must be non-zero (got {width}x{height})")
            }
            GridError::CellCountMismatch { expected, found } => {
                write!(f, "expected {expected} cells, got {found}")
            }
            GridError::OutOfBounds { x, y } => write!(f, "cell ({x}, {y}) is outside the grid"),
        }
    }
}

impl std::error::Error for GridError {}

// =============================================================================
// Grid resource
// =============================================================================

/// Double-buffered terrain matrix, stored row-major.
///
/// `cells` is the current generation. `back` is scratch space the tick sweep
/// writes into before the two are swapped; its contents between ticks are
/// meaningless.
#[derive(Resource, Debug, Clone)]
pub struct WildfireGrid {
    pub(super) cells: Vec<Cell>,
    pub(super) back: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Default for WildfireGrid {
    fn default() -> Self {
        Self {
            cells: vec![Cell::VOID; GRID_WIDTH * GRID_HEIGHT],
            back: vec![Cell::VOID; GRID_WIDTH * GRID_HEIGHT],
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }
}

impl WildfireGrid {
    /// A `width` x `height` grid with every slot set to `fill`.
    pub fn new(width: usize, height: usize, fill: Cell) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        Ok(Self {
            cells: vec![fill; width * height],
            back: vec![Cell::VOID; width * height],
            width,
            height,
        })
    }

    /// Wrap an existing row-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            cells,
            back: vec![Cell::VOID; expected],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub(super) fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Current-generation cell. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub fn try_get(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        if !self.in_bounds(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        Ok(self.get(x, y))
    }

    /// Replace a cell between ticks (seeding fires, editing terrain).
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), GridError> {
        if !self.in_bounds(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Current generation, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn census(&self) -> GridCensus {
        GridCensus::of(&self.cells)
    }

    /// True when no cell has any foliage left.
    pub fn is_exhausted(&self) -> bool {
        self.cells.iter().all(|c| c.foliage_density() == 0.0)
    }
}

// =============================================================================
// Tick results
// =============================================================================

/// Cell counts over one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCensus {
    pub burning: usize,
    /// Cells carrying a burn scar.
    pub scarred: usize,
    /// Cells with any foliage.
    pub vegetated: usize,
    pub water: usize,
}

impl GridCensus {
    pub fn of(cells: &[Cell]) -> Self {
        let mut census = Self::default();
        for cell in cells {
            census.record(cell);
        }
        census
    }

    #[inline]
    pub(super) fn record(&mut self, cell: &Cell) {
        if cell.is_water() {
            self.water += 1;
        }
        if cell.on_fire() {
            self.burning += 1;
        }
        if cell.burn_amount() > 0.0 {
            self.scarred += 1;
        }
        if cell.foliage_density() > 0.0 {
            self.vegetated += 1;
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Every cell ended the tick with zero foliage.
    pub exhausted: bool,
    /// Where lightning struck, if it did.
    pub lightning: Option<(usize, usize)>,
    pub ignitions: usize,
    pub extinguished: usize,
    /// Burn scars that fully healed.
    pub recoveries: usize,
    pub census: GridCensus,
}

// =============================================================================
// Stats resource
// =============================================================================

/// Running totals across ticks, maintained by the tick system.
#[derive(Resource, Debug, Clone, Default)]
pub struct WildfireStats {
    pub ticks: u64,
    pub lightning_strikes: u64,
    pub total_ignitions: u64,
    pub total_recoveries: u64,
    /// Counts from the most recent tick.
    pub last: TickOutcome,
    /// Tick on which the grid first ran out of foliage.
    pub exhausted_at: Option<u64>,
}

impl WildfireStats {
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        if outcome.lightning.is_some() {
            self.lightning_strikes += 1;
        }
        self.total_ignitions += outcome.ignitions as u64;
        self.total_recoveries += outcome.recoveries as u64;
        self.last = *outcome;
        if outcome.exhausted && self.exhausted_at.is_none() {
            self.exhausted_at = Some(self.ticks);
        }
    }
}
