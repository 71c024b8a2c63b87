#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic maze generation system.
//!
//! Carves a perfect maze (spanning tree, exactly one path between any two
//! cells) out of a fully walled grid using an iterative randomized
//! depth-first search. The system never mutates the world directly; it emits
//! `SetWall` and `SetCeiling` clear commands for the world to execute.
//!
//! The carvable region excludes the grid's padding column and row, so the
//! outer boundary of the playfield always stays closed.

use maze_race_core::{Command, Direction, GridCoord};
use maze_race_world::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// Pure system that proposes wall removals forming a perfect maze.
#[derive(Debug)]
pub struct MazeGeneration {
    rng: ChaCha8Rng,
}

impl MazeGeneration {
    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits the edge-clearing commands for one maze over the grid's
    /// carvable region.
    ///
    /// A region of `n` cells produces exactly `n - 1` commands. Degenerate
    /// grids without any carvable cell produce none.
    pub fn carve(&mut self, grid: &Grid, out: &mut Vec<Command>) {
        let columns = i64::from(grid.columns()) - 1;
        let rows = i64::from(grid.rows()) - 1;
        if columns <= 0 || rows <= 0 {
            return;
        }
        let columns = columns as i32;
        let rows = rows as i32;

        let start = GridCoord::new(
            self.rng.gen_range(0..columns),
            self.rng.gen_range(0..rows),
        );

        // Visitation is generator-local scratch, not world state.
        let mut visited = vec![false; columns as usize * rows as usize];
        visited[cell_index(start, columns)] = true;
        let mut stack = vec![start];

        while let Some(current) = stack.last().copied() {
            let mut candidates = [Direction::Left; 4];
            let mut candidate_count = 0;
            for direction in DIRECTIONS {
                let next = current.neighbor(direction);
                if in_region(next, columns, rows) && !visited[cell_index(next, columns)] {
                    candidates[candidate_count] = direction;
                    candidate_count += 1;
                }
            }

            if candidate_count == 0 {
                let _ = stack.pop();
                continue;
            }

            let direction = candidates[self.rng.gen_range(0..candidate_count)];
            let next = current.neighbor(direction);
            visited[cell_index(next, columns)] = true;
            stack.push(next);
            out.push(open_passage(current, direction));
        }
    }
}

fn in_region(cell: GridCoord, columns: i32, rows: i32) -> bool {
    cell.column() >= 0 && cell.column() < columns && cell.row() >= 0 && cell.row() < rows
}

fn cell_index(cell: GridCoord, columns: i32) -> usize {
    cell.row() as usize * columns as usize + cell.column() as usize
}

/// Maps a carved step to the single cell edge that must open.
///
/// Left and up passages clear an edge owned by the current cell; right and
/// down passages clear the same physical edge through the neighbor that owns
/// it.
#[must_use]
pub fn open_passage(cell: GridCoord, direction: Direction) -> Command {
    match direction {
        Direction::Left => Command::SetWall {
            cell,
            present: false,
        },
        Direction::Up => Command::SetCeiling {
            cell,
            present: false,
        },
        Direction::Right => Command::SetWall {
            cell: cell.neighbor(Direction::Right),
            present: false,
        },
        Direction::Down => Command::SetCeiling {
            cell: cell.neighbor(Direction::Down),
            present: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{open_passage, MazeGeneration};
    use maze_race_core::{Command, Direction, GridCoord};

    #[test]
    fn passages_open_the_edge_owned_by_the_correct_cell() {
        let cell = GridCoord::new(2, 3);
        assert_eq!(
            open_passage(cell, Direction::Left),
            Command::SetWall {
                cell,
                present: false,
            }
        );
        assert_eq!(
            open_passage(cell, Direction::Up),
            Command::SetCeiling {
                cell,
                present: false,
            }
        );
        assert_eq!(
            open_passage(cell, Direction::Right),
            Command::SetWall {
                cell: GridCoord::new(3, 3),
                present: false,
            }
        );
        assert_eq!(
            open_passage(cell, Direction::Down),
            Command::SetCeiling {
                cell: GridCoord::new(2, 4),
                present: false,
            }
        );
    }

    #[test]
    fn same_seed_produces_identical_command_batches() {
        let grid = maze_race_world::Grid::with_dimensions(6, 6, 32.0);
        let mut first = Vec::new();
        MazeGeneration::new(42).carve(&grid, &mut first);
        let mut second = Vec::new();
        MazeGeneration::new(42).carve(&grid, &mut second);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
