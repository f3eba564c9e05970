use rand::Rng;

use crate::cell::Cell;
use crate::config::{NEIGHBOR_OFFSETS, NUM_NEIGHBORS};
use crate::fire_params::FireParams;
use crate::transition::{transition_with_state, FireState};

use super::resources::{GridCensus, TickOutcome, WildfireGrid};

impl WildfireGrid {
    /// The eight neighbors of `(x, y)`, clockwise from North.
    ///
    /// Only the interior `[1, W-2] x [1, H-2]` is ever visible as a
    /// neighbor: any coordinate outside it, including the outermost ring of
    /// real cells, reads as [`Cell::VOID`].
    pub fn neighbors(&self, x: usize, y: usize) -> [Cell; NUM_NEIGHBORS] {
        let mut out = [Cell::VOID; NUM_NEIGHBORS];
        for (slot, (dx, dy)) in out.iter_mut().zip(NEIGHBOR_OFFSETS) {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if self.is_visible_neighbor(nx, ny) {
                *slot = self.cells[self.index(nx as usize, ny as usize)];
            }
        }
        out
    }

    #[inline]
    fn is_visible_neighbor(&self, nx: i64, ny: i64) -> bool {
        nx > 0 && ny > 0 && nx < self.width() as i64 - 1 && ny < self.height() as i64 - 1
    }

    /// Advance every cell by one generation.
    ///
    /// Three draws happen before the sweep, every tick, in this order: the
    /// one-in-`chance` lightning trial, the strike column, the strike row.
    /// Cells are then visited column by column (`x` outer, `y` inner), each
    /// reading only the current generation and writing the back buffer,
    /// which becomes current once the sweep is done.
    pub fn tick<R: Rng + ?Sized>(&mut self, params: &FireParams, rng: &mut R) -> TickOutcome {
        let trial = rng.gen_range(0..params.lightning.chance.max(1)) == 0;
        let lx = rng.gen_range(0..self.width());
        let ly = rng.gen_range(0..self.height());
        let strike = params.lightning.enabled && trial;

        let mut outcome = TickOutcome {
            lightning: strike.then_some((lx, ly)),
            ..Default::default()
        };
        let mut census = GridCensus::default();

        for x in 0..self.width() {
            for y in 0..self.height() {
                let idx = self.index(x, y);
                let neighbors = self.neighbors(x, y);
                let hit = strike && x == lx && y == ly;
                let (next, state) =
                    transition_with_state(&self.cells[idx], &neighbors, hit, params, rng);
                match state {
                    FireState::FireStarted => outcome.ignitions += 1,
                    FireState::FireEnded => outcome.extinguished += 1,
                    FireState::BoostSoil => outcome.recoveries += 1,
                    FireState::Normal => {}
                }
                census.record(&next);
                self.back[idx] = next;
            }
        }

        std::mem::swap(&mut self.cells, &mut self.back);

        outcome.census = census;
        outcome.exhausted = census.vegetated == 0;
        outcome
    }
}
