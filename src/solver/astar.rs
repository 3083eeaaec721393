use crate::{solver::GridSolver, Coordinate};

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as
/// heuristic, which is admissible and consistent on a 4-connected unit-cost grid.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Scales the heuristic. Values above 1.0 expand fewer nodes but may return longer paths.
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }
}

impl GridSolver for AstarSolver {
    /// Just the distance times a heuristic factor.
    fn heuristic(&self, p1: &Coordinate, p2: &Coordinate) -> usize {
        (p1.manhattan_distance(p2) as f32 * self.heuristic_factor) as usize
    }
}
