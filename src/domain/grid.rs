use super::{Cell, GridError};
use rand::Rng;
use rayon::prelude::*;

/// LifeGrid owns one generation of a finite, toroidally-wrapped grid.
/// Evolution is double-buffered: the next generation is computed into a
/// fresh buffer from an immutable view of the current one, then swapped
/// in wholesale. Cells are never updated in place mid-step, so a cell's
/// new state can never leak into a neighbor count of the same step.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl LifeGrid {
    /// Create a new grid with all cells initially dead.
    /// Zero-sized grids are valid degenerate grids with no cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Build a grid from explicit rows of cells.
    /// Every row must have the same length as the first; a ragged seed is
    /// rejected rather than clamped.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::InvalidDimension {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Seed a grid from a caller-supplied random source.
    /// Each cell is independently alive with probability 0.5.
    pub fn random_with<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        Self {
            width,
            height,
            cells: (0..width * height)
                .map(|_| Cell::from(rng.random_bool(0.5)))
                .collect(),
        }
    }

    /// Seed a grid from the ambient thread-local random source
    pub fn random(width: usize, height: usize) -> Self {
        Self::random_with(width, height, &mut rand::rng())
    }

    /// Get grid dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Convert 2D coordinates to 1D index
    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Set cell at position; out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Checked cell access for callers that need the failure surfaced
    pub fn try_get(&self, x: usize, y: usize) -> Result<Cell, GridError> {
        self.get(x, y).ok_or(GridError::CoordinateOutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Checked cell write for callers that need the failure surfaced
    pub fn try_set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), GridError> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
            Ok(())
        } else {
            Err(GridError::CoordinateOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Count live cells in the Moore neighborhood of (x, y), wrapping
    /// toroidally at the edges: the top row is adjacent to the bottom row
    /// and the left column to the right column. Each of the 8 offsets is
    /// wrapped independently with `(coord + offset + dim) % dim`; the `+ dim`
    /// term keeps the result non-negative for the -1 offsets.
    ///
    /// A wrapped neighbor that lands on (x, y) itself is skipped, so a cell
    /// never counts itself: on a 1x1 grid all 8 offsets collapse onto the
    /// center and the count is 0. On 1-wide or 1-tall grids distinct offsets
    /// can collapse onto the same neighbor and count it twice. Both are
    /// inherent to the torus topology, not special-cased away.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        let w = self.width as i64;
        let h = self.height as i64;

        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(|(dx, dy)| {
                // Toroidal wrapping
                let nx = ((x as i64 + dx + w) % w) as usize;
                let ny = ((y as i64 + dy + h) % h) as usize;
                (nx, ny)
            })
            .filter(|&(nx, ny)| (nx, ny) != (x, y))
            .filter(|&(nx, ny)| self.cells[self.index(nx, ny)].is_alive())
            .count() as u8
    }

    /// Advance the grid one generation (serial).
    /// Every cell's next state is computed against the pre-transition
    /// generation only, then the buffers are swapped. Deterministic, cannot
    /// fail; a zero-sized grid is a no-op.
    pub fn advance(&mut self) {
        let next: Vec<Cell> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| {
                let current = self.cells[self.index(x, y)];
                current.evolve(self.live_neighbors(x, y))
            })
            .collect();
        self.cells = next;
    }

    /// Advance one generation with the per-cell loop parallelized by rayon.
    /// Each cell reads only the immutable current generation, so no
    /// synchronization is needed beyond the final buffer swap on the calling
    /// thread. Produces results identical to [`advance`](Self::advance).
    pub fn advance_parallel(&mut self) {
        let grid = &*self;
        let next: Vec<Cell> = (0..grid.height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..grid.width).map(move |x| {
                    let current = grid.cells[grid.index(x, y)];
                    current.evolve(grid.live_neighbors(x, y))
                })
            })
            .collect();
        self.cells = next;
    }

    /// Count of live cells in the current generation
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Clear all cells to dead state
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.cells[self.index(x, y)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> LifeGrid {
        let mut grid = LifeGrid::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive);
        }
        grid
    }

    fn alive_cells(grid: &LifeGrid) -> Vec<(usize, usize)> {
        grid.iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_new_grid_is_all_dead() {
        let grid = LifeGrid::new(4, 3);
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_from_rows_rejects_ragged_seed() {
        let rows = vec![
            vec![Cell::Dead, Cell::Alive],
            vec![Cell::Dead],
        ];
        assert_eq!(
            LifeGrid::from_rows(rows),
            Err(GridError::InvalidDimension {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_from_rows_preserves_layout() {
        let grid = LifeGrid::from_rows(vec![
            vec![Cell::Alive, Cell::Dead],
            vec![Cell::Dead, Cell::Alive],
        ])
        .unwrap();
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
        assert_eq!(grid.get(1, 0), Some(Cell::Dead));
        assert_eq!(grid.get(1, 1), Some(Cell::Alive));
    }

    #[test]
    fn test_try_get_out_of_range() {
        let grid = LifeGrid::new(2, 2);
        assert_eq!(
            grid.try_get(2, 0),
            Err(GridError::CoordinateOutOfRange {
                x: 2,
                y: 0,
                width: 2,
                height: 2,
            })
        );
        assert_eq!(grid.try_get(1, 1), Ok(Cell::Dead));
    }

    #[test]
    fn test_neighbor_count_interior() {
        // Full 3x3 ring around the center
        let grid = grid_with_alive(
            5,
            5,
            &[
                (1, 1), (2, 1), (3, 1),
                (1, 2),         (3, 2),
                (1, 3), (2, 3), (3, 3),
            ],
        );
        assert_eq!(grid.live_neighbors(2, 2), 8);
    }

    #[test]
    fn test_neighbor_count_wraps_across_edges() {
        // Corner cell sees the three opposite corners through the torus
        let grid = grid_with_alive(5, 5, &[(4, 4), (4, 0), (0, 4)]);
        assert_eq!(grid.live_neighbors(0, 0), 3);
    }

    #[test]
    fn test_one_by_one_grid_has_zero_neighbors() {
        // All 8 offsets wrap onto the cell itself, which is excluded
        let grid = grid_with_alive(1, 1, &[(0, 0)]);
        assert_eq!(grid.live_neighbors(0, 0), 0);
    }

    #[test]
    fn test_one_wide_grid_double_counts_wrapped_neighbors() {
        // Width 1: left, center and right offsets all wrap onto the single
        // column, so the rows above and below are each counted three times
        let grid = grid_with_alive(1, 3, &[(0, 0), (0, 2)]);
        assert_eq!(grid.live_neighbors(0, 1), 6);
    }

    #[test]
    fn test_lone_cell_dies() {
        let mut grid = grid_with_alive(3, 3, &[(1, 1)]);
        grid.advance();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_block_is_still_life() {
        let grid = grid_with_alive(5, 5, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let mut next = grid.clone();
        next.advance();
        assert_eq!(next, grid);
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let horizontal = grid_with_alive(5, 5, &[(0, 1), (1, 1), (2, 1)]);

        let mut grid = horizontal.clone();
        grid.advance();
        assert_eq!(alive_cells(&grid), vec![(1, 0), (1, 1), (1, 2)]);

        grid.advance();
        assert_eq!(grid, horizontal);
    }

    #[test]
    fn test_advance_is_deterministic() {
        let seed = LifeGrid::random(16, 16);
        let mut a = seed.clone();
        let mut b = seed;
        a.advance();
        b.advance();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let seed = LifeGrid::random(32, 24);
        let mut serial = seed.clone();
        let mut parallel = seed;
        for _ in 0..5 {
            serial.advance();
            parallel.advance_parallel();
        }
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_population_growth_is_bounded() {
        // Coarse sanity bound: births need 3 live neighbors, so the
        // population can grow by at most 8x in one generation
        for _ in 0..10 {
            let mut grid = LifeGrid::random(12, 12);
            let before = grid.population();
            grid.advance();
            assert!(grid.population() <= 8 * before.max(1));
            if before == 0 {
                assert_eq!(grid.population(), 0);
            }
        }
    }

    #[test]
    fn test_empty_grid_advance_is_noop() {
        let mut grid = LifeGrid::new(0, 0);
        grid.advance();
        assert_eq!(grid.dimensions(), (0, 0));
        assert_eq!(grid.population(), 0);

        let mut flat = LifeGrid::new(5, 0);
        flat.advance();
        assert_eq!(flat.population(), 0);
    }

    #[test]
    fn test_random_seed_has_requested_shape() {
        let grid = LifeGrid::random(7, 4);
        assert_eq!(grid.dimensions(), (7, 4));
        assert_eq!(grid.iter_cells().count(), 28);
        for (_, _, cell) in grid.iter_cells() {
            assert!(matches!(cell, Cell::Alive | Cell::Dead));
        }
    }

    #[test]
    fn test_random_with_uses_supplied_rng() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            LifeGrid::random_with(10, 10, &mut a),
            LifeGrid::random_with(10, 10, &mut b)
        );
    }

    #[test]
    fn test_clear_resets_population() {
        let mut grid = LifeGrid::random(8, 8);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }
}
