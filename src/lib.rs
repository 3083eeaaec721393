//! # maze_escape
//!
//! Maze generation and pathfinding for a grid-based escape-room puzzle. Mazes are carved with
//! a randomized [depth-first backtracker](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search)
//! and are therefore perfect: every pair of open cells is joined by exactly one simple path.
//! Paths are found with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! Manhattan distance, which is exact enough to be optimal on a uniform-cost 4-connected grid.
//!
//! Everything here is synchronous and free of global state; the host owns the grid and calls in
//! with it.
//!
//! ```
//! use maze_escape::{find_path, MazeGenerator};
//!
//! let maze = MazeGenerator::new().with_seed(5).generate(11, 11).unwrap();
//! let path = find_path(&maze.grid, maze.start, maze.exit).unwrap();
//! assert_eq!(path.last(), Some(&maze.exit));
//! ```
mod astar;
pub mod coordinate;
pub mod error;
pub mod generator;
pub mod maze_grid;
pub mod session;
pub mod solver;

pub use coordinate::{Coordinate, Direction};
pub use error::MazeError;
pub use generator::{generate_with_rng, Maze, MazeGenerator};
pub use maze_grid::{Components, MazeGrid, Tile};
pub use session::{EscapeRoom, MoveOutcome};
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};

/// Steps from (but excluding) a start cell up to and including the goal.
pub type Path = Vec<Coordinate>;

/// The pathfinder used by the escape room.
pub type PathFinder = AstarSolver;

/// Smallest odd size for which carving leaves room for a wall border around the lattice.
pub const MIN_DIMENSION: usize = 5;

/// Inline capacity of neighbour lists, the size of a 4-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Generates a maze with fresh randomness. See [MazeGenerator] for seeded generation.
pub fn generate(rows: usize, cols: usize) -> Result<Maze, MazeError> {
    MazeGenerator::new().generate(rows, cols)
}

/// Shortest path from `start` to `goal` with the default [PathFinder].
pub fn find_path(grid: &MazeGrid, start: Coordinate, goal: Coordinate) -> Result<Path, MazeError> {
    PathFinder::new().find_path(grid, start, goal)
}
