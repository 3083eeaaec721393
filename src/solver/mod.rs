use log::debug;
use smallvec::SmallVec;

use crate::{astar::astar, Components, Coordinate, MazeError, MazeGrid, Path, N_SMALLVEC_SIZE};

pub mod astar;
pub mod dijkstra;

/// Shortest-path search on a 4-connected [MazeGrid] with unit step costs. Implementors only pick
/// the heuristic; the search itself is shared.
pub trait GridSolver {
    /// Estimate of the remaining cost from `p1` to `p2`.
    fn heuristic(&self, p1: &Coordinate, p2: &Coordinate) -> usize;

    fn successors(
        &self,
        grid: &MazeGrid,
        node: &Coordinate,
    ) -> SmallVec<[(Coordinate, usize); N_SMALLVEC_SIZE]> {
        grid.neighbourhood_and_cost(node)
    }

    /// Cost of following `path` from its implicit start, one unit per step.
    fn path_cost(&self, path: &[Coordinate]) -> usize {
        path.len()
    }

    /// Computes the shortest path from `start` to `goal`. The returned path excludes `start`
    /// and ends at `goal`; it is empty when the goal cannot be reached or equals the start.
    ///
    /// # Errors
    ///
    /// [MazeError::OutOfBounds] if either endpoint lies outside the grid.
    fn find_path(
        &self,
        grid: &MazeGrid,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Path, MazeError> {
        grid.check_bounds(&start)?;
        grid.check_bounds(&goal)?;
        let path = astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
        .map(|(v, _c)| v.into_iter().skip(1).collect::<Path>())
        .unwrap_or_default();
        debug!(
            "Path from {} to {} has {} steps",
            start,
            goal,
            self.path_cost(&path)
        );
        Ok(path)
    }

    /// Same as [find_path](Self::find_path), but first checks whether `start` and `goal` share
    /// a connected component and skips the search if they do not. `components` must have been
    /// generated from a grid with the same walls as `grid`.
    fn find_path_with_components(
        &self,
        grid: &MazeGrid,
        components: &Components,
        start: Coordinate,
        goal: Coordinate,
    ) -> Result<Path, MazeError> {
        grid.check_bounds(&start)?;
        grid.check_bounds(&goal)?;
        if !components.reachable(&start, &goal) {
            debug!("{} is not reachable from {}", goal, start);
            return Ok(Path::new());
        }
        self.find_path(grid, start, goal)
    }
}
