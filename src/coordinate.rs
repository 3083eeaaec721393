use core::fmt;

use smallvec::SmallVec;

/// A cell position on a grid, addressed as `(row, col)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

/// The four orthogonal moves available on a 4-connected grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order neighbours are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Row and column offsets of a single step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Coordinate {
        Coordinate { row, col }
    }

    pub fn manhattan_distance(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Moves `distance` cells in `direction`. Returns [None] when the move would leave the
    /// non-negative quadrant; upper bounds are the grid's concern.
    pub fn offset(&self, direction: Direction, distance: usize) -> Option<Coordinate> {
        let (d_row, d_col) = direction.delta();
        let row = self
            .row
            .checked_add_signed(d_row.checked_mul(distance as isize)?)?;
        let col = self
            .col
            .checked_add_signed(d_col.checked_mul(distance as isize)?)?;
        Some(Coordinate { row, col })
    }

    /// Single step in `direction`.
    pub fn step(&self, direction: Direction) -> Option<Coordinate> {
        self.offset(direction, 1)
    }

    /// Von Neumann neighbourhood, skipping positions with a negative index.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coordinate; 4]> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.step(dir))
            .collect()
    }

    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Coordinate {
        Coordinate { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbourhood_at_origin_is_clipped() {
        let origin = Coordinate::new(0, 0);
        let neighbours = origin.neumann_neighborhood();
        assert_eq!(
            neighbours.as_slice(),
            &[Coordinate::new(0, 1), Coordinate::new(1, 0)]
        );
    }

    #[test]
    fn offset_moves_in_steps() {
        let c = Coordinate::new(3, 3);
        assert_eq!(c.offset(Direction::Up, 2), Some(Coordinate::new(1, 3)));
        assert_eq!(c.offset(Direction::Right, 2), Some(Coordinate::new(3, 5)));
        assert_eq!(c.offset(Direction::Left, 4), None);
    }

    #[test]
    fn manhattan_and_adjacency() {
        let a = Coordinate::new(2, 5);
        let b = Coordinate::new(4, 1);
        assert_eq!(a.manhattan_distance(&b), 6);
        assert!(a.is_adjacent(&Coordinate::new(2, 4)));
        assert!(!a.is_adjacent(&Coordinate::new(3, 4)));
        assert!(!a.is_adjacent(&a));
    }
}
