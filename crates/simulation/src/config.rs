pub const GRID_WIDTH: usize = 200;
pub const GRID_HEIGHT: usize = 200;

/// Number of cells in a Moore neighborhood.
pub const NUM_NEIGHBORS: usize = 8;

/// Neighbor offsets, clockwise from North: N, NE, E, SE, S, SW, W, NW.
pub const NEIGHBOR_OFFSETS: [(i32, i32); NUM_NEIGHBORS] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Indices into a neighbor array.
pub const NORTH: usize = 0;
pub const EAST: usize = 2;
pub const SOUTH: usize = 4;
pub const WEST: usize = 6;

/// Cells whose initial elevation is below this (and above sea level) start
/// fully vegetated.
pub const MIN_ELEVATION_BEFORE_FOLIAGE_START: f64 = 0.01;

/// Fixed timestep of the driver loop in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1;
