#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Race engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for collaborators
//! to react to deterministically. Systems consume immutable views and respond
//! exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Configures the world's cell grid using the provided dimensions.
    ///
    /// One extra column and row of permanently walled padding is added on
    /// top of the requested size so swept collision lookups never need to
    /// special-case the last row or column.
    ConfigureGrid {
        /// Number of playable cell columns requested for the grid.
        columns: u32,
        /// Number of playable cell rows requested for the grid.
        rows: u32,
        /// Length of each square cell edge measured in world units.
        resolution: f64,
    },
    /// Replaces the motion tuning applied to every subsequent tick.
    ConfigureMotion {
        /// Tuning values the simulation should adopt.
        tuning: MotionTuning,
    },
    /// Sets or clears the left-hand wall of a single cell.
    ///
    /// Out-of-range coordinates are ignored. This is the surface a level
    /// editor uses to toggle one edge per interaction.
    SetWall {
        /// Cell whose left wall should change.
        cell: GridCoord,
        /// Whether the wall should be present after the command.
        present: bool,
    },
    /// Sets or clears the top ceiling of a single cell.
    ///
    /// Out-of-range coordinates are ignored.
    SetCeiling {
        /// Cell whose top ceiling should change.
        cell: GridCoord,
        /// Whether the ceiling should be present after the command.
        present: bool,
    },
    /// Adds a dynamic rectangular body to the session.
    SpawnBody {
        /// Horizontal world coordinate of the body's top-left corner.
        x: f64,
        /// Vertical world coordinate of the body's top-left corner.
        y: f64,
        /// Width of the body in world units.
        width: f64,
        /// Height of the body in world units.
        height: f64,
        /// Appearance assigned to the body.
        color: BodyColor,
        /// Whether the body races or marks the goal.
        role: BodyRole,
    },
    /// Toggles one directional movement intent on a body.
    SetIntent {
        /// Identifier of the body whose intent changes.
        body: BodyId,
        /// Direction the intent refers to.
        direction: Direction,
        /// Pressed state reported by the input collaborator.
        pressed: bool,
    },
    /// Assigns a body's velocity directly, without clamping.
    SetVelocity {
        /// Identifier of the body whose velocity changes.
        body: BodyId,
        /// New horizontal velocity in world units per second.
        velocity_x: f64,
        /// New vertical velocity in world units per second.
        velocity_y: f64,
    },
    /// Advances the simulation by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a body was added to the session.
    BodySpawned {
        /// Identifier assigned to the body by the world.
        body: BodyId,
        /// Role the body plays in the race.
        role: BodyRole,
        /// Appearance assigned to the body.
        color: BodyColor,
    },
    /// Reports that a body collided with a maze edge during a sweep.
    WallHit {
        /// Identifier of the body that hit the edge.
        body: BodyId,
        /// Side of the body that made contact.
        side: CollisionSide,
    },
    /// Reports that two racing bodies bounced off each other.
    BodyHit {
        /// First participant in collection order.
        first: BodyId,
        /// Second participant in collection order.
        second: BodyId,
    },
    /// Reports that a body left the playfield and was teleported back in.
    BodyWrapped {
        /// Identifier of the body that wrapped.
        body: BodyId,
    },
    /// Announces that a racer reached the goal, ending the race.
    ///
    /// Emitted exactly once per session; the win latch never resets.
    GoalReached {
        /// Identifier of the winning racer.
        winner: BodyId,
        /// Color of the winning racer.
        color: BodyColor,
    },
}

/// Unique identifier assigned to a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(u32);

impl BodyId {
    /// Creates a new body identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Visual appearance applied to a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl BodyColor {
    /// Creates a new body color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Role a body plays within the race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRole {
    /// Player-driven body subject to intents, friction and wall collision.
    Racer,
    /// Static body marking the finish; never moves, never collides with
    /// walls, and latches the win when a racer overlaps it.
    Goal,
}

impl BodyRole {
    /// Returns `true` for the goal marker role.
    #[must_use]
    pub const fn is_goal(self) -> bool {
        matches!(self, Self::Goal)
    }
}

/// Directional movement intents available to racers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing horizontal coordinates.
    Left,
    /// Movement toward increasing horizontal coordinates.
    Right,
    /// Movement toward decreasing vertical coordinates.
    Up,
    /// Movement toward increasing vertical coordinates.
    Down,
}

/// Side of a body that made contact during a collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionSide {
    /// The body's left edge hit a wall while moving left.
    Left,
    /// The body's right edge hit a wall while moving right.
    Right,
    /// The body's top edge hit a ceiling while moving up.
    Top,
    /// The body's bottom edge hit a ceiling while moving down.
    Bottom,
}

/// Location of a single grid cell expressed as signed column and row indices.
///
/// Coordinates are signed because swept-collision code probes one cell past a
/// body's footprint; such probes may land outside the grid (including at
/// negative indices) and must resolve to "no wall, no ceiling" rather than
/// fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    column: i32,
    row: i32,
}

impl GridCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Signed column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Signed row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the coordinate one cell away in the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::new(self.column - 1, self.row),
            Direction::Right => Self::new(self.column + 1, self.row),
            Direction::Up => Self::new(self.column, self.row - 1),
            Direction::Down => Self::new(self.column, self.row + 1),
        }
    }
}

/// Tuning knobs governing racer motion, resolved once per tick.
///
/// Defaults give an arcade feel: a walk that tops out quickly,
/// heavy friction so releasing a key stops the racer within a few frames, and
/// soft restitution so collisions read as bumps rather than bounces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTuning {
    /// Maximum speed a pressed intent accelerates toward, in world units per
    /// second; raising this makes racers faster in every direction.
    pub walk_speed: f64,
    /// Acceleration applied while an intent is pressed, in world units per
    /// second squared; larger values reach `walk_speed` sooner.
    pub acceleration: f64,
    /// Deceleration applied toward zero after the sweeps, in world units per
    /// second squared; velocity is clamped at the zero crossing and never
    /// oscillates past it.
    pub friction: f64,
    /// Fraction of incoming speed retained (and inverted) when a body hits a
    /// wall or ceiling.
    pub wall_restitution: f64,
    /// Fraction of each participant's speed retained (and inverted) when two
    /// racers overlap.
    pub bounce_restitution: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            walk_speed: 270.0,
            acceleration: 3500.0,
            friction: 1700.0,
            wall_restitution: 0.2,
            bounce_restitution: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BodyColor, BodyId, BodyRole, Direction, GridCoord};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn body_id_round_trips_through_bincode() {
        assert_round_trip(&BodyId::new(7));
    }

    #[test]
    fn body_color_round_trips_through_bincode() {
        assert_round_trip(&BodyColor::from_rgb(0xff, 0xa5, 0x00));
    }

    #[test]
    fn grid_coord_round_trips_through_bincode() {
        assert_round_trip(&GridCoord::new(-1, 12));
    }

    #[test]
    fn body_role_round_trips_through_bincode() {
        assert_round_trip(&BodyRole::Goal);
    }

    #[test]
    fn neighbor_moves_one_cell_in_each_direction() {
        let origin = GridCoord::new(3, 3);
        assert_eq!(origin.neighbor(Direction::Left), GridCoord::new(2, 3));
        assert_eq!(origin.neighbor(Direction::Right), GridCoord::new(4, 3));
        assert_eq!(origin.neighbor(Direction::Up), GridCoord::new(3, 2));
        assert_eq!(origin.neighbor(Direction::Down), GridCoord::new(3, 4));
    }

    #[test]
    fn neighbor_may_leave_the_grid() {
        let corner = GridCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::Left).column(), -1);
        assert_eq!(corner.neighbor(Direction::Up).row(), -1);
    }

    #[test]
    fn goal_role_is_goal() {
        assert!(BodyRole::Goal.is_goal());
        assert!(!BodyRole::Racer.is_goal());
    }
}
