use core::fmt;
use std::str::FromStr;

use itertools::{iproduct, Itertools};
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{Coordinate, MazeError, N_SMALLVEC_SIZE};

/// Content of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    Start,
    Key,
    Exit,
}

impl Tile {
    /// Everything except [Tile::Wall] can be stepped on.
    pub fn is_walkable(self) -> bool {
        self != Tile::Wall
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Wall => 'X',
            Tile::Floor => '.',
            Tile::Start => 'S',
            Tile::Key => 'K',
            Tile::Exit => 'E',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            'X' => Some(Tile::Wall),
            '.' => Some(Tile::Floor),
            'S' => Some(Tile::Start),
            'K' => Some(Tile::Key),
            'E' => Some(Tile::Exit),
            _ => None,
        }
    }
}

/// Rectangular grid of [Tile]s stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

/// Connected components of the walkable cells of a [MazeGrid] under 4-adjacency.
///
/// Only [Tile::Wall] placement affects the partition, so the components stay valid for as long
/// as the grid topology is left alone (relabelling a key as floor is fine).
#[derive(Clone, Debug)]
pub struct Components {
    cols: usize,
    components: UnionFind<usize>,
}

impl Components {
    fn ix(&self, point: &Coordinate) -> usize {
        point.row * self.cols + point.col
    }

    /// Retrieves the component id a given [Coordinate] belongs to.
    pub fn get_component(&self, point: &Coordinate) -> usize {
        self.components.find(self.ix(point))
    }

    /// Checks if start and goal are on the same component. Points are assumed to be in bounds
    /// of the grid the components were generated from.
    pub fn reachable(&self, start: &Coordinate, goal: &Coordinate) -> bool {
        self.components.equiv(self.ix(start), self.ix(goal))
    }
}

impl MazeGrid {
    pub fn new(rows: usize, cols: usize, fill: Tile) -> MazeGrid {
        MazeGrid {
            rows,
            cols,
            tiles: vec![fill; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, point: &Coordinate) -> bool {
        point.row < self.rows && point.col < self.cols
    }

    /// Like [in_bounds](Self::in_bounds) but reports the failure as an error.
    pub fn check_bounds(&self, point: &Coordinate) -> Result<(), MazeError> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                coordinate: *point,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn ix(&self, point: &Coordinate) -> usize {
        point.row * self.cols + point.col
    }

    /// Tile at `point`, or [None] if out of bounds.
    pub fn get(&self, point: &Coordinate) -> Option<Tile> {
        if self.in_bounds(point) {
            self.tiles.get(self.ix(point)).copied()
        } else {
            None
        }
    }

    /// Overwrites the tile at `point`, returning the previous tile.
    pub fn set(&mut self, point: &Coordinate, tile: Tile) -> Result<Tile, MazeError> {
        self.check_bounds(point)?;
        let ix = self.ix(point);
        Ok(std::mem::replace(&mut self.tiles[ix], tile))
    }

    pub fn is_walkable(&self, point: &Coordinate) -> bool {
        self.get(point).is_some_and(Tile::is_walkable)
    }

    /// In-bounds, non-wall 4-neighbours of `point`.
    pub fn walkable_neighbours(&self, point: &Coordinate) -> SmallVec<[Coordinate; 4]> {
        point
            .neumann_neighborhood()
            .into_iter()
            .filter(|p| self.is_walkable(p))
            .collect()
    }

    /// Walkable neighbours paired with the unit step cost.
    pub fn neighbourhood_and_cost(
        &self,
        point: &Coordinate,
    ) -> SmallVec<[(Coordinate, usize); N_SMALLVEC_SIZE]> {
        self.walkable_neighbours(point)
            .into_iter()
            .map(|p| (p, 1))
            .collect()
    }

    /// All coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        iproduct!(0..self.rows, 0..self.cols).map(Coordinate::from)
    }

    /// Coordinates holding `tile`, in row-major order.
    pub fn cells_with(&self, tile: Tile) -> Vec<Coordinate> {
        self.coordinates()
            .zip(self.tiles.iter())
            .filter(|&(_, &t)| t == tile)
            .map(|(p, _)| p)
            .collect()
    }

    /// First coordinate holding `tile` in row-major order.
    pub fn find(&self, tile: Tile) -> Option<Coordinate> {
        self.coordinates()
            .zip(self.tiles.iter())
            .find(|&(_, &t)| t == tile)
            .map(|(p, _)| p)
    }

    /// Turns the key at `point` into floor. Returns [false] and leaves the grid untouched if
    /// there is no key at `point`; this is the only relabelling hosts are expected to perform.
    pub fn pick_up_key(&mut self, point: &Coordinate) -> bool {
        if self.get(point) == Some(Tile::Key) {
            let ix = self.ix(point);
            self.tiles[ix] = Tile::Floor;
            true
        } else {
            false
        }
    }

    /// Checks that `path` is a walk from `start`: every step lands on a walkable cell adjacent
    /// to the previous one.
    pub fn is_valid_path(&self, start: &Coordinate, path: &[Coordinate]) -> bool {
        std::iter::once(start)
            .chain(path.iter())
            .tuple_windows()
            .all(|(a, b)| a.is_adjacent(b) && self.is_walkable(b))
    }

    /// Links up 4-adjacent walkable cells, returning the union-find structure together with the
    /// number of links that closed a cycle.
    fn link_components(&self) -> (UnionFind<usize>, usize) {
        let mut components = UnionFind::new(self.rows * self.cols);
        let mut cycles = 0;
        for point in self.coordinates().filter(|p| self.is_walkable(p)) {
            let parent_ix = self.ix(&point);
            // Right and down only, so every edge is visited once.
            let right = Coordinate::new(point.row, point.col + 1);
            let down = Coordinate::new(point.row + 1, point.col);
            for n in [right, down] {
                if self.is_walkable(&n) && !components.union(parent_ix, self.ix(&n)) {
                    cycles += 1;
                }
            }
        }
        (components, cycles)
    }

    /// Generates the connected components of the walkable cells.
    pub fn generate_components(&self) -> Components {
        let (components, _) = self.link_components();
        Components {
            cols: self.cols,
            components,
        }
    }

    /// A perfect maze has a single component of walkable cells and no loops, i.e. exactly one
    /// simple path between any two walkable cells.
    pub fn is_perfect(&self) -> bool {
        let (components, cycles) = self.link_components();
        if cycles > 0 {
            debug!("Grid has {} loops", cycles);
            return false;
        }
        let mut walkable = self.coordinates().filter(|p| self.is_walkable(p));
        match walkable.next() {
            Some(first) => {
                let root = self.ix(&first);
                walkable.all(|p| components.equiv(root, self.ix(&p)))
            }
            None => false,
        }
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.chunks(self.cols.max(1)) {
            let line: String = row.iter().map(|t| t.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for MazeGrid {
    type Err = MazeError;

    /// Parses the format produced by [Display](fmt::Display): one line per row using the
    /// symbols of [Tile::symbol]. Surrounding blank lines and indentation are ignored.
    fn from_str(s: &str) -> Result<MazeGrid, MazeError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if cols == 0 {
            return Err(MazeError::MalformedGrid {
                line: 0,
                reason: "grid is empty".to_owned(),
            });
        }
        let mut tiles = Vec::with_capacity(lines.len() * cols);
        for (line, text) in lines.iter().enumerate() {
            let found = text.chars().count();
            if found != cols {
                return Err(MazeError::MalformedGrid {
                    line,
                    reason: format!("expected {} cells, found {}", cols, found),
                });
            }
            for symbol in text.chars() {
                let tile = Tile::from_symbol(symbol).ok_or_else(|| MazeError::MalformedGrid {
                    line,
                    reason: format!("unknown symbol {:?}", symbol),
                })?;
                tiles.push(tile);
            }
        }
        Ok(MazeGrid {
            rows: lines.len(),
            cols,
            tiles,
        })
    }
}
