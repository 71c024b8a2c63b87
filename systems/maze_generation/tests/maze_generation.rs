//! Integration coverage for maze carving against a live world.

use std::collections::VecDeque;

use maze_race_core::{Command, GridCoord};
use maze_race_system_maze_generation::MazeGeneration;
use maze_race_world::{apply, query, World};

fn carved_world(columns: u32, rows: u32, seed: u64) -> (World, Vec<Command>) {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureGrid {
            columns,
            rows,
            resolution: 32.0,
        },
        &mut events,
    );

    let mut commands = Vec::new();
    MazeGeneration::new(seed).carve(query::grid(&world), &mut commands);
    for command in commands.clone() {
        apply(&mut world, command, &mut events);
    }
    (world, commands)
}

/// Breadth-first traversal over the carvable region following open edges.
fn reachable_cells(world: &World, columns: i32, rows: i32) -> usize {
    let grid = query::grid(world);
    let mut seen = vec![false; (columns * rows) as usize];
    let mut queue = VecDeque::from([GridCoord::new(0, 0)]);
    seen[0] = true;
    let mut count = 0;

    while let Some(cell) = queue.pop_front() {
        count += 1;
        let mut visit = |next: GridCoord| {
            if next.column() >= 0 && next.column() < columns && next.row() >= 0 && next.row() < rows
            {
                let index = (next.row() * columns + next.column()) as usize;
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(next);
                }
            }
        };

        let (column, row) = (cell.column(), cell.row());
        if !grid.wall(GridCoord::new(column, row)) {
            visit(GridCoord::new(column - 1, row));
        }
        if !grid.wall(GridCoord::new(column + 1, row)) {
            visit(GridCoord::new(column + 1, row));
        }
        if !grid.ceiling(GridCoord::new(column, row)) {
            visit(GridCoord::new(column, row - 1));
        }
        if !grid.ceiling(GridCoord::new(column, row + 1)) {
            visit(GridCoord::new(column, row + 1));
        }
    }
    count
}

#[test]
fn carving_opens_exactly_cells_minus_one_edges() {
    let (_, commands) = carved_world(4, 4, 7);
    assert_eq!(commands.len(), 15);
}

#[test]
fn every_cell_is_reachable_from_the_origin() {
    for seed in [0, 1, 99] {
        let (world, _) = carved_world(4, 4, seed);
        assert_eq!(reachable_cells(&world, 4, 4), 16, "seed {seed}");
    }
}

#[test]
fn padding_row_and_column_stay_closed() {
    let (world, _) = carved_world(4, 4, 3);
    let grid = query::grid(&world);
    for row in 0..5 {
        assert!(grid.wall(GridCoord::new(4, row)));
        assert!(grid.ceiling(GridCoord::new(4, row)));
    }
    for column in 0..5 {
        assert!(grid.wall(GridCoord::new(column, 4)));
        assert!(grid.ceiling(GridCoord::new(column, 4)));
    }
}

#[test]
fn carving_commands_only_clear_edges() {
    let (_, commands) = carved_world(6, 5, 11);
    for command in &commands {
        match command {
            Command::SetWall { present, .. } | Command::SetCeiling { present, .. } => {
                assert!(!*present);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

#[test]
fn degenerate_grids_produce_no_commands() {
    let (_, commands) = carved_world(0, 0, 5);
    assert!(commands.is_empty());

    // A single carvable cell is already a complete maze.
    let (_, commands) = carved_world(1, 1, 5);
    assert!(commands.is_empty());
}
