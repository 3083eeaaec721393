//! Escape-room rules on top of a generated maze: the player walks around, picks up the key and
//! then has to reach the exit, with the shortest remaining route recomputed after every move
//! once the key is held. Drawing, input and sound are left to the host.

use log::{debug, info};

use crate::{
    solver::{astar::AstarSolver, GridSolver},
    Components, Coordinate, Direction, Maze, MazeError, MazeGrid, Path,
};

/// What happened in response to a move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The target cell is a wall or off the grid; nothing changed.
    Blocked,
    Moved,
    /// The player stepped on the key and now holds it.
    KeyCollected,
    /// The player reached the exit holding the key. Further moves are ignored.
    Escaped,
}

#[derive(Clone, Debug)]
pub struct EscapeRoom {
    grid: MazeGrid,
    components: Components,
    solver: AstarSolver,
    player: Coordinate,
    key: Coordinate,
    exit: Coordinate,
    has_key: bool,
    escaped: bool,
    path_to_exit: Path,
}

impl EscapeRoom {
    pub fn new(maze: Maze) -> EscapeRoom {
        let components = maze.grid.generate_components();
        EscapeRoom {
            grid: maze.grid,
            components,
            solver: AstarSolver::new(),
            player: maze.start,
            key: maze.key,
            exit: maze.exit,
            has_key: false,
            escaped: false,
            path_to_exit: Path::new(),
        }
    }

    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn player(&self) -> Coordinate {
        self.player
    }

    pub fn key(&self) -> Coordinate {
        self.key
    }

    pub fn exit(&self) -> Coordinate {
        self.exit
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Shortest route from the player to the exit, excluding the player's cell. Empty until the
    /// key has been picked up.
    pub fn path_to_exit(&self) -> &[Coordinate] {
        &self.path_to_exit
    }

    /// Attempts to move the player one cell in `direction`.
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveOutcome, MazeError> {
        if self.escaped {
            return Ok(MoveOutcome::Escaped);
        }
        let target = match self.player.step(direction) {
            Some(target) if self.grid.is_walkable(&target) => target,
            _ => return Ok(MoveOutcome::Blocked),
        };
        let collects_key = !self.has_key && target == self.key;
        // The route is computed up front so a failing query leaves the room untouched.
        let path_to_exit = if self.has_key || collects_key {
            let path = self.solver.find_path_with_components(
                &self.grid,
                &self.components,
                target,
                self.exit,
            )?;
            debug!("{} steps left to the exit", path.len());
            path
        } else {
            Path::new()
        };
        self.player = target;
        self.path_to_exit = path_to_exit;

        let mut outcome = MoveOutcome::Moved;
        if collects_key {
            self.has_key = true;
            self.grid.pick_up_key(&self.key);
            info!("Key collected at {}", self.key);
            outcome = MoveOutcome::KeyCollected;
        }
        if self.has_key && self.player == self.exit {
            self.escaped = true;
            info!("Escaped through {}", self.exit);
            outcome = MoveOutcome::Escaped;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::{MazeGenerator, Tile};

    use super::*;

    /// XXXXXXX
    /// XS.X.EX
    /// X.XX.XX
    /// X..K..X
    /// XXXXXXX
    fn small_room() -> EscapeRoom {
        let grid: MazeGrid = "
            XXXXXXX
            XS.X.EX
            X.XX.XX
            X..K..X
            XXXXXXX"
            .parse()
            .unwrap();
        EscapeRoom::new(Maze {
            start: grid.find(Tile::Start).unwrap(),
            key: grid.find(Tile::Key).unwrap(),
            exit: grid.find(Tile::Exit).unwrap(),
            grid,
        })
    }

    #[test]
    fn walls_block_moves() {
        let mut room = small_room();
        let start = room.player();
        assert_eq!(room.try_move(Direction::Up), Ok(MoveOutcome::Blocked));
        assert_eq!(room.try_move(Direction::Left), Ok(MoveOutcome::Blocked));
        assert_eq!(room.player(), start);
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::Moved));
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::Blocked));
        assert_eq!(room.player(), Coordinate::new(1, 2));
    }

    #[test]
    fn key_then_exit() {
        let mut room = small_room();
        for dir in [Direction::Down, Direction::Down, Direction::Right] {
            assert_eq!(room.try_move(dir), Ok(MoveOutcome::Moved));
            assert!(room.path_to_exit().is_empty());
        }
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::KeyCollected));
        assert!(room.has_key());
        assert_eq!(room.grid().get(&room.key()), Some(Tile::Floor));
        assert_eq!(
            room.path_to_exit(),
            &[
                Coordinate::new(3, 4),
                Coordinate::new(2, 4),
                Coordinate::new(1, 4),
                Coordinate::new(1, 5)
            ]
        );

        // Walking away lengthens the route.
        assert_eq!(room.try_move(Direction::Left), Ok(MoveOutcome::Moved));
        assert_eq!(room.path_to_exit().len(), 5);
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::Moved));
        assert_eq!(room.path_to_exit().len(), 4);

        for dir in [Direction::Right, Direction::Up, Direction::Up] {
            assert_eq!(room.try_move(dir), Ok(MoveOutcome::Moved));
        }
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::Escaped));
        assert!(room.is_escaped());
        assert!(room.path_to_exit().is_empty());
        assert_eq!(room.try_move(Direction::Left), Ok(MoveOutcome::Escaped));
        assert_eq!(room.player(), room.exit());
    }

    #[test]
    fn exit_without_key_is_an_ordinary_cell() {
        let grid: MazeGrid = "XXXXX\nXSEKX\nXXXXX".parse().unwrap();
        let mut room = EscapeRoom::new(Maze {
            start: Coordinate::new(1, 1),
            exit: Coordinate::new(1, 2),
            key: Coordinate::new(1, 3),
            grid,
        });
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::Moved));
        assert!(!room.is_escaped());
        assert_eq!(room.try_move(Direction::Right), Ok(MoveOutcome::KeyCollected));
        assert_eq!(room.path_to_exit(), &[Coordinate::new(1, 2)]);
        assert_eq!(room.try_move(Direction::Left), Ok(MoveOutcome::Escaped));
    }

    #[test]
    fn failed_route_query_leaves_room_unchanged() {
        let grid: MazeGrid = "XXXXX\nXSK.X\nXXXXX".parse().unwrap();
        let mut room = EscapeRoom::new(Maze {
            start: Coordinate::new(1, 1),
            key: Coordinate::new(1, 2),
            exit: Coordinate::new(9, 9),
            grid,
        });
        assert_eq!(
            room.try_move(Direction::Right),
            Err(MazeError::OutOfBounds {
                coordinate: Coordinate::new(9, 9),
                rows: 3,
                cols: 5
            })
        );
        assert_eq!(room.player(), Coordinate::new(1, 1));
        assert!(!room.has_key());
        assert_eq!(room.grid().get(&room.key()), Some(Tile::Key));
        assert!(room.path_to_exit().is_empty());
    }

    #[test]
    fn generated_room_is_escapable() {
        let maze = MazeGenerator::new().with_seed(11).generate(11, 11).unwrap();
        let mut room = EscapeRoom::new(maze.clone());
        // Walk to the key along the solver's path, then follow the exit path.
        let to_key = AstarSolver::new()
            .find_path(&maze.grid, maze.start, maze.key)
            .unwrap();
        let mut steps = to_key;
        let mut outcome = MoveOutcome::Moved;
        while !room.is_escaped() {
            if steps.is_empty() {
                steps = room.path_to_exit().to_vec();
            }
            let next = steps.remove(0);
            let dir = Direction::ALL
                .into_iter()
                .find(|d| room.player().step(*d) == Some(next))
                .unwrap();
            outcome = room.try_move(dir).unwrap();
            assert_ne!(outcome, MoveOutcome::Blocked);
        }
        assert_eq!(outcome, MoveOutcome::Escaped);
        assert!(room.has_key());
    }
}
