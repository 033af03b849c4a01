use thiserror::Error;
use tracing::debug;

use crate::Coord;

/// State of a single grid position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {height}x{width}")]
    InvalidDimension { height: usize, width: usize },

    #[error("Cell density must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// The simulation state: a fixed `height x width` buffer of [`Cell`]s evolved
/// by the life rule of Conway's Game of Life (B3/S23).
///
/// Dimensions never change once constructed. The buffer is replaced wholesale
/// by [`GridEngine::step`], [`GridEngine::reset`] and [`GridEngine::clear`],
/// and mutated one cell at a time by [`GridEngine::toggle`].
#[derive(Debug)]
pub struct GridEngine {
    cells: Vec<Cell>,

    height: usize,
    width: usize,

    /// Number of generations stepped since the last reset/clear.
    generation: u64,
}

impl GridEngine {
    /// Create a `height x width` grid where each cell is independently alive
    /// with probability `density`.
    pub fn new(
        height: usize,
        width: usize,
        density: f64,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::InvalidDimension { height, width });
        }

        let mut engine = Self {
            cells: vec![Cell::Dead; height * width],
            height,
            width,
            generation: 0,
        };

        engine.fill_random(density, rng)?;

        Ok(engine)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the cell at `(row, col)` is alive. Out-of-range coordinates
    /// (including negative ones) count as dead.
    pub fn is_alive(&self, row: Coord, col: Coord) -> bool {
        self.index(row, col)
            .is_some_and(|i| self.cells[i].is_alive())
    }

    /// Flip the state of a single cell.
    ///
    /// Out-of-range coordinates are silently ignored: the pointer may
    /// legitimately report a position past the grid's edge, and a stray
    /// coordinate must not fail the whole frame.
    pub fn toggle(&mut self, row: Coord, col: Coord) {
        let Some(i) = self.index(row, col) else {
            return;
        };

        self.cells[i] = self.cells[i].toggled();
    }

    /// Kill every cell and reset the generation counter. Dimensions are
    /// unchanged.
    pub fn clear(&mut self) {
        debug!("clearing {}x{} grid", self.height, self.width);

        self.cells.fill(Cell::Dead);
        self.generation = 0;
    }

    /// Re-draw the grid at the current dimensions, each cell independently
    /// alive with probability `density`, and reset the generation counter.
    pub fn reset(&mut self, density: f64, rng: &mut fastrand::Rng) -> Result<(), GridError> {
        debug!("resetting {}x{} grid at density {density}", self.height, self.width);

        self.fill_random(density, rng)?;
        self.generation = 0;

        Ok(())
    }

    /// Advance the grid by exactly one generation.
    ///
    /// Each cell's fate is decided by its live neighbor count in the Moore
    /// neighborhood: an alive cell survives with 2 or 3 live neighbors, a
    /// dead cell is born with exactly 3. Cells past the boundary count as
    /// dead (no wraparound).
    ///
    /// The next generation is computed into a fresh buffer so that every
    /// neighbor count reflects generation N. Mutating in place would corrupt
    /// counts mid-pass.
    pub fn step(&mut self) {
        let mut next = vec![Cell::Dead; self.cells.len()];

        for row in 0..self.height {
            for col in 0..self.width {
                let i = row * self.width + col;
                let n = self.live_neighbors(row, col);

                next[i] = match (self.cells[i], n) {
                    (Cell::Alive, 2 | 3) => Cell::Alive,
                    (Cell::Dead, 3) => Cell::Alive,
                    _ => Cell::Dead,
                };
            }
        }

        self.cells = next;
        self.generation += 1;
    }

    /// Count the live cells among the 8 neighbors of `(row, col)`. Edge and
    /// corner cells simply have fewer neighbors to count.
    fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut n = 0;

        for dr in [-1i64, 0, 1] {
            for dc in [-1i64, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let (r, c) = (row as i64 + dr, col as i64 + dc);

                if r < 0 || c < 0 || r >= self.height as i64 || c >= self.width as i64 {
                    continue;
                }

                if self.cells[r as usize * self.width + c as usize].is_alive() {
                    n += 1;
                }
            }
        }

        n
    }

    fn fill_random(&mut self, density: f64, rng: &mut fastrand::Rng) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidProbability(density));
        }

        for cell in &mut self.cells {
            *cell = if rng.f64() < density {
                Cell::Alive
            } else {
                Cell::Dead
            };
        }

        Ok(())
    }

    fn index(&self, row: Coord, col: Coord) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }

        let (row, col) = (row as usize, col as usize);

        (row < self.height && col < self.width).then(|| row * self.width + col)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn empty(height: usize, width: usize) -> GridEngine {
        let mut rng = fastrand::Rng::with_seed(0);
        GridEngine::new(height, width, 0.0, &mut rng).unwrap()
    }

    fn alive_cells(engine: &GridEngine) -> Vec<(Coord, Coord)> {
        let mut cells = Vec::new();

        for row in 0..engine.height() as Coord {
            for col in 0..engine.width() as Coord {
                if engine.is_alive(row, col) {
                    cells.push((row, col));
                }
            }
        }

        cells
    }

    #[test]
    fn rejects_zero_dimensions() {
        let mut rng = fastrand::Rng::with_seed(0);

        assert_eq!(
            GridEngine::new(0, 10, 0.5, &mut rng).unwrap_err(),
            GridError::InvalidDimension { height: 0, width: 10 }
        );
        assert_eq!(
            GridEngine::new(10, 0, 0.5, &mut rng).unwrap_err(),
            GridError::InvalidDimension { height: 10, width: 0 }
        );
    }

    #[test]
    fn rejects_bad_density() {
        let mut rng = fastrand::Rng::with_seed(0);

        assert_eq!(
            GridEngine::new(4, 4, -0.1, &mut rng).unwrap_err(),
            GridError::InvalidProbability(-0.1)
        );
        assert_eq!(
            GridEngine::new(4, 4, 1.5, &mut rng).unwrap_err(),
            GridError::InvalidProbability(1.5)
        );
    }

    #[test]
    fn density_extremes() {
        let mut rng = fastrand::Rng::with_seed(42);

        let dead = GridEngine::new(8, 8, 0.0, &mut rng).unwrap();
        assert!(alive_cells(&dead).is_empty());

        let alive = GridEngine::new(8, 8, 1.0, &mut rng).unwrap();
        assert_eq!(alive_cells(&alive).len(), 64);
    }

    #[test]
    fn seeded_fill_is_deterministic() {
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);

        let x = GridEngine::new(16, 16, 0.3, &mut a).unwrap();
        let y = GridEngine::new(16, 16, 0.3, &mut b).unwrap();

        assert_eq!(alive_cells(&x), alive_cells(&y));
    }

    #[test]
    fn no_spontaneous_life() {
        let mut engine = empty(10, 10);

        engine.step();

        assert!(alive_cells(&engine).is_empty());
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn lonely_cell_dies() {
        let mut engine = empty(5, 5);
        engine.toggle(2, 2);

        engine.step();

        assert!(alive_cells(&engine).is_empty());
    }

    #[test]
    fn block_is_stable() {
        let mut engine = empty(6, 6);
        for (row, col) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            engine.toggle(row, col);
        }

        for _ in 0..5 {
            engine.step();
        }

        assert_eq!(alive_cells(&engine), vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(engine.generation(), 5);
    }

    #[test]
    fn block_in_corner_is_stable() {
        // Exercises neighbor counting where fewer than 8 neighbors exist
        let mut engine = empty(2, 2);
        for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            engine.toggle(row, col);
        }

        engine.step();

        assert_eq!(alive_cells(&engine).len(), 4);
    }

    #[test]
    fn blinker_oscillates() {
        let mut engine = empty(5, 5);
        for col in 1..=3 {
            engine.toggle(2, col);
        }

        engine.step();
        assert_eq!(alive_cells(&engine), vec![(1, 2), (2, 2), (3, 2)]);

        engine.step();
        assert_eq!(alive_cells(&engine), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut engine = empty(4, 4);

        engine.toggle(1, 1);
        assert!(engine.is_alive(1, 1));

        engine.toggle(1, 1);
        assert!(!engine.is_alive(1, 1));
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let mut engine = empty(4, 4);

        engine.toggle(-1, 0);
        engine.toggle(0, -3);
        engine.toggle(4, 0);
        engine.toggle(0, 100);

        assert!(alive_cells(&engine).is_empty());
    }

    #[test]
    fn clear_kills_everything_and_resets_generation() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut engine = GridEngine::new(6, 6, 1.0, &mut rng).unwrap();
        engine.step();

        engine.clear();

        assert!(alive_cells(&engine).is_empty());
        assert_eq!(engine.generation(), 0);
        assert_eq!((engine.height(), engine.width()), (6, 6));
    }

    #[test]
    fn reset_redraws_and_resets_generation() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut engine = GridEngine::new(6, 6, 0.0, &mut rng).unwrap();
        engine.step();
        engine.step();

        engine.reset(1.0, &mut rng).unwrap();

        assert_eq!(alive_cells(&engine).len(), 36);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn reset_rejects_bad_density() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut engine = GridEngine::new(4, 4, 0.0, &mut rng).unwrap();
        engine.step();

        assert_eq!(
            engine.reset(2.0, &mut rng).unwrap_err(),
            GridError::InvalidProbability(2.0)
        );

        // the failed reset left the state alone
        assert_eq!(engine.generation(), 1);
    }
}
