//! Perfect maze generation by randomized depth-first carving.
//!
//! The grid is treated as a lattice of odd-indexed cells separated by one-cell walls. Starting
//! from `(1, 1)`, the carver repeatedly picks an unvisited lattice cell two steps away (in a
//! shuffled direction order per cell), knocks out the wall in between and continues from there,
//! backtracking when a cell has no unvisited lattice neighbours left. The carved cells form a
//! spanning tree over the lattice, so every pair of floor cells is joined by exactly one simple
//! path.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::{Coordinate, Direction, MazeError, MazeGrid, Tile, MIN_DIMENSION};

/// A generated maze together with its three distinguished cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: MazeGrid,
    pub start: Coordinate,
    pub key: Coordinate,
    pub exit: Coordinate,
}

impl Maze {
    /// Splits the maze into `(grid, start, key, exit)`.
    pub fn into_parts(self) -> (MazeGrid, Coordinate, Coordinate, Coordinate) {
        (self.grid, self.start, self.key, self.exit)
    }
}

/// Generates mazes, optionally from a fixed seed. Holds no state between calls: with a seed,
/// every call to [generate](Self::generate) returns the same maze for the same dimensions.
#[derive(Clone, Debug, Default)]
pub struct MazeGenerator {
    pub seed: Option<u64>,
}

impl MazeGenerator {
    pub fn new() -> MazeGenerator {
        MazeGenerator { seed: None }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> MazeGenerator {
        self.seed = Some(seed);
        self
    }

    /// Generates a `rows` x `cols` maze.
    ///
    /// # Errors
    ///
    /// [MazeError::InvalidDimensions] unless both dimensions are odd and at least
    /// [MIN_DIMENSION].
    pub fn generate(&self, rows: usize, cols: usize) -> Result<Maze, MazeError> {
        let mut rng = match self.seed {
            Some(seed) => {
                debug!("Seeding maze generator with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        generate_with_rng(rows, cols, &mut rng)
    }
}

/// Carving works on a lattice anchored at `(1, 1)` with a wall border, which requires odd sizes.
/// The cell count must also fit in a `usize`.
pub fn check_dimensions(rows: usize, cols: usize) -> Result<(), MazeError> {
    let valid = |n: usize| n >= MIN_DIMENSION && n % 2 == 1;
    if valid(rows) && valid(cols) && rows.checked_mul(cols).is_some() {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { rows, cols })
    }
}

/// Generates a maze drawing all randomness from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Maze, MazeError> {
    check_dimensions(rows, cols)?;
    let mut grid = MazeGrid::new(rows, cols, Tile::Wall);
    let origin = Coordinate::new(1, 1);
    grid.set(&origin, Tile::Floor)?;
    carve_passages(&mut grid, origin, rng)?;

    let floor = grid.cells_with(Tile::Floor);
    if floor.len() < 3 {
        return Err(MazeError::InsufficientFloorCells { found: floor.len() });
    }
    let picks = index::sample(rng, floor.len(), 3);
    let start = floor[picks.index(0)];
    let key = floor[picks.index(1)];
    let exit = floor[picks.index(2)];
    grid.set(&start, Tile::Start)?;
    grid.set(&key, Tile::Key)?;
    grid.set(&exit, Tile::Exit)?;
    info!(
        "Generated {}x{} maze with {} open cells; start {}, key {}, exit {}",
        rows,
        cols,
        floor.len(),
        start,
        key,
        exit
    );
    Ok(Maze {
        grid,
        start,
        key,
        exit,
    })
}

/// A lattice cell on the carving stack along with the directions it has yet to try.
struct Frame {
    cell: Coordinate,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new<R: Rng + ?Sized>(cell: Coordinate, rng: &mut R) -> Frame {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Frame {
            cell,
            directions,
            next: 0,
        }
    }
}

/// Depth-first carving from `origin`, which must already be floor. Uses an explicit stack so
/// the depth is not limited by the call stack; the visiting order is the same as the recursive
/// formulation where each cell shuffles its directions once on entry.
fn carve_passages<R: Rng + ?Sized>(
    grid: &mut MazeGrid,
    origin: Coordinate,
    rng: &mut R,
) -> Result<(), MazeError> {
    let mut stack = vec![Frame::new(origin, rng)];
    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let cell = frame.cell;
        let target = match cell.offset(direction, 2) {
            Some(target) if grid.get(&target) == Some(Tile::Wall) => target,
            _ => continue,
        };
        if let Some(between) = cell.step(direction) {
            grid.set(&between, Tile::Floor)?;
        }
        grid.set(&target, Tile::Floor)?;
        stack.push(Frame::new(target, rng));
    }
    Ok(())
}
