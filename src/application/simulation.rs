use crate::domain::{Cell, GridError, LifeGrid};
use rand::Rng;

/// Simulation is the driver-facing contract of the engine: it owns the
/// current generation and a step counter. A display layer constructs one,
/// calls [`step`](Self::step) at whatever cadence it likes, and renders the
/// snapshot returned by [`grid`](Self::grid). The engine knows nothing
/// about timers, frames, or rendering.
pub struct Simulation {
    grid: LifeGrid,
    generation: u64,
}

impl Simulation {
    /// Start from an explicit seed grid
    pub fn from_grid(seed: LifeGrid) -> Self {
        Self { grid: seed, generation: 0 }
    }

    /// Start from explicit rows of cells
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        Ok(Self::from_grid(LifeGrid::from_rows(rows)?))
    }

    /// Start from a randomly seeded grid using the ambient random source
    pub fn random(width: usize, height: usize) -> Self {
        Self::from_grid(LifeGrid::random(width, height))
    }

    /// Start from a randomly seeded grid using a caller-supplied random source
    pub fn random_with<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        Self::from_grid(LifeGrid::random_with(width, height, rng))
    }

    /// Advance the simulation one generation
    pub fn step(&mut self) {
        self.grid.advance();
        self.generation += 1;
    }

    /// Advance one generation using the parallel evolution path
    pub fn step_parallel(&mut self) {
        self.grid.advance_parallel();
        self.generation += 1;
    }

    /// Number of generations advanced since the seed
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Read-only snapshot of the current generation
    pub const fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    /// Mutable access for drivers that paint cells or stamp patterns
    /// before (or between) runs
    pub fn grid_mut(&mut self) -> &mut LifeGrid {
        &mut self.grid
    }
}
