use crate::{solver::GridSolver, Coordinate};

/// Uniform-cost search. Expands more nodes than [AstarSolver](super::astar::AstarSolver) but
/// does not depend on the heuristic being admissible, which makes it a handy reference.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Coordinate, _: &Coordinate) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use crate::{solver::astar::AstarSolver, MazeGrid, Tile};

    use super::*;

    #[test]
    fn agrees_with_astar() {
        let pathing_grid: MazeGrid = "
            .....X...
            .XXX.X.X.
            ...X...X.
            XX.XXXXX.
            ........."
            .parse()
            .unwrap();
        let start = Coordinate::new(0, 0);
        for goal in pathing_grid.cells_with(Tile::Floor) {
            let dijkstra = DijkstraSolver
                .find_path(&pathing_grid, start, goal)
                .unwrap();
            let astar = AstarSolver::new()
                .find_path(&pathing_grid, start, goal)
                .unwrap();
            assert_eq!(dijkstra.len(), astar.len(), "goal {}", goal);
            assert!(pathing_grid.is_valid_path(&start, &dijkstra));
        }
    }
}
