#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session bootstrap system.
//!
//! Places the two racers in opposite corners of the playfield and drops the
//! goal body near the middle of the maze, then hands the resulting spawn
//! commands to the world. The goal comes last so the racers keep the lowest
//! body identifiers.

use maze_race_core::{BodyColor, BodyRole, Command};
use maze_race_world::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Edge length of a racer's square box in world units.
pub const RACER_SIZE: f64 = 24.0;
/// Inset from the playfield corner at which racers start.
const CORNER_INSET: f64 = 2.0;
/// Offset from the goal cell's top-left corner to the goal body.
const GOAL_INSET: f64 = 4.0;

const ORANGE: BodyColor = BodyColor::from_rgb(0xff, 0xa5, 0x00);
const GREEN: BodyColor = BodyColor::from_rgb(0x00, 0x80, 0x00);
const RED: BodyColor = BodyColor::from_rgb(0xff, 0x00, 0x00);

/// Pure system that proposes the initial body spawns for a race.
#[derive(Debug)]
pub struct Bootstrap {
    rng: ChaCha8Rng,
}

impl Bootstrap {
    /// Creates a bootstrap whose goal placement is fully determined by
    /// `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits spawn commands for both racers and the goal body.
    pub fn spawn_commands(&mut self, grid: &Grid, out: &mut Vec<Command>) {
        out.push(Command::SpawnBody {
            x: CORNER_INSET,
            y: CORNER_INSET,
            width: RACER_SIZE,
            height: RACER_SIZE,
            color: ORANGE,
            role: BodyRole::Racer,
        });
        out.push(Command::SpawnBody {
            x: grid.playfield_width() - RACER_SIZE - CORNER_INSET,
            y: grid.playfield_height() - RACER_SIZE - CORNER_INSET,
            width: RACER_SIZE,
            height: RACER_SIZE,
            color: GREEN,
            role: BodyRole::Racer,
        });

        let goal_column = self.middle_index(grid.columns().saturating_sub(1));
        let goal_row = self.middle_index(grid.rows().saturating_sub(1));
        let resolution = grid.resolution();
        out.push(Command::SpawnBody {
            x: f64::from(goal_column) * resolution + GOAL_INSET,
            y: f64::from(goal_row) * resolution + GOAL_INSET,
            width: RACER_SIZE + 2.0,
            height: RACER_SIZE,
            color: RED,
            role: BodyRole::Goal,
        });
    }

    /// Picks the middle cell index of a span. Even spans have two middle
    /// candidates; one is chosen at random so repeated races vary slightly.
    fn middle_index(&mut self, span: u32) -> u32 {
        let middle = span / 2;
        if span % 2 == 0 && middle > 0 {
            self.rng.gen_range(middle - 1..=middle)
        } else {
            middle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bootstrap, GREEN, ORANGE, RED};
    use maze_race_core::{BodyRole, Command};
    use maze_race_world::Grid;

    fn spawns(seed: u64) -> Vec<Command> {
        let grid = Grid::with_dimensions(20, 15, 32.0);
        let mut out = Vec::new();
        Bootstrap::new(seed).spawn_commands(&grid, &mut out);
        out
    }

    #[test]
    fn racers_start_in_opposite_corners() {
        let commands = spawns(1);
        match &commands[0] {
            Command::SpawnBody {
                x,
                y,
                color,
                role,
                ..
            } => {
                assert_eq!((*x, *y), (2.0, 2.0));
                assert_eq!(*color, ORANGE);
                assert_eq!(*role, BodyRole::Racer);
            }
            other => panic!("expected SpawnBody, got {other:?}"),
        }
        match &commands[1] {
            Command::SpawnBody {
                x,
                y,
                color,
                role,
                ..
            } => {
                assert_eq!((*x, *y), (614.0, 454.0));
                assert_eq!(*color, GREEN);
                assert_eq!(*role, BodyRole::Racer);
            }
            other => panic!("expected SpawnBody, got {other:?}"),
        }
    }

    #[test]
    fn goal_lands_on_a_middle_cell() {
        for seed in 0..16 {
            let commands = spawns(seed);
            match &commands[2] {
                Command::SpawnBody {
                    x,
                    y,
                    width,
                    height,
                    color,
                    role,
                } => {
                    // 20 playable columns: middle candidates are cells 9 and
                    // 10. 15 playable rows: the single middle cell is 7.
                    assert!(*x == 9.0 * 32.0 + 4.0 || *x == 10.0 * 32.0 + 4.0);
                    assert_eq!(*y, 7.0 * 32.0 + 4.0);
                    assert_eq!((*width, *height), (26.0, 24.0));
                    assert_eq!(*color, RED);
                    assert_eq!(*role, BodyRole::Goal);
                }
                other => panic!("expected SpawnBody, got {other:?}"),
            }
        }
    }

    #[test]
    fn same_seed_spawns_identically() {
        assert_eq!(spawns(9), spawns(9));
    }

    #[test]
    fn goal_spawns_after_both_racers() {
        let commands = spawns(3);
        assert_eq!(commands.len(), 3);
        let roles: Vec<BodyRole> = commands
            .iter()
            .map(|command| match command {
                Command::SpawnBody { role, .. } => *role,
                other => panic!("expected SpawnBody, got {other:?}"),
            })
            .collect();
        assert_eq!(roles, [BodyRole::Racer, BodyRole::Racer, BodyRole::Goal]);
    }
}
