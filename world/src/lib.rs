#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Race.
//!
//! The world owns the wall/ceiling grid, the ordered body collection and the
//! win latch. Adapters and systems mutate it exclusively through
//! [`apply`], which executes one [`Command`] and appends the resulting
//! [`Event`] values. The per-tick collision engine (swept per-axis motion,
//! friction, screen-edge wrap and pairwise overlap resolution) runs inside
//! `Command::Tick`.

use std::time::Duration;

use maze_race_core::{
    BodyColor, BodyId, BodyRole, CollisionSide, Command, Direction, Event, GridCoord, MotionTuning,
};

/// Inset subtracted from a body's far edges before cell-index computation so
/// a body resting exactly on a grid line is not considered to occupy the cell
/// on the far side of that line.
const EPSILON: f64 = 1e-7;

const DEFAULT_GRID_COLUMNS: u32 = 20;
const DEFAULT_GRID_ROWS: u32 = 15;
const DEFAULT_RESOLUTION: f64 = 32.0;

/// Dense grid of cells, each owning a left-wall and a top-ceiling flag.
///
/// Dimensions are the requested size plus one padding column and row; the
/// padding caps every swept-collision lookup without special-casing the last
/// row or column. Read accessors treat any out-of-range coordinate as "no
/// wall, no ceiling"; write accessors ignore out-of-range coordinates.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    resolution: f64,
    cells: Vec<Cell>,
}

#[derive(Clone, Copy, Debug)]
struct Cell {
    wall: bool,
    ceiling: bool,
}

impl Grid {
    /// Creates a fully walled grid of the requested playable size plus the
    /// padding column and row.
    #[must_use]
    pub fn with_dimensions(requested_columns: u32, requested_rows: u32, resolution: f64) -> Self {
        let columns = requested_columns.saturating_add(1);
        let rows = requested_rows.saturating_add(1);
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            resolution,
            cells: vec![
                Cell {
                    wall: true,
                    ceiling: true,
                };
                capacity
            ],
        }
    }

    /// Number of cell columns, including the padding column.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows, including the padding row.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Length of a single square cell edge in world units.
    #[must_use]
    pub const fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Width of the playable area in world units, excluding the padding
    /// column.
    #[must_use]
    pub fn playfield_width(&self) -> f64 {
        f64::from(self.columns.saturating_sub(1)) * self.resolution
    }

    /// Height of the playable area in world units, excluding the padding row.
    #[must_use]
    pub fn playfield_height(&self) -> f64 {
        f64::from(self.rows.saturating_sub(1)) * self.resolution
    }

    /// Reports whether the cell owns a left-hand wall.
    ///
    /// Out-of-range coordinates resolve to `false`.
    #[must_use]
    pub fn wall(&self, cell: GridCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells[index].wall)
    }

    /// Reports whether the cell owns a top ceiling.
    ///
    /// Out-of-range coordinates resolve to `false`.
    #[must_use]
    pub fn ceiling(&self, cell: GridCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells[index].ceiling)
    }

    fn set_wall(&mut self, cell: GridCoord, present: bool) {
        if let Some(index) = self.index(cell) {
            self.cells[index].wall = present;
        }
    }

    fn set_ceiling(&mut self, cell: GridCoord, present: bool) {
        if let Some(index) = self.index(cell) {
            self.cells[index].ceiling = present;
        }
    }

    fn index(&self, cell: GridCoord) -> Option<usize> {
        if cell.column() < 0 || cell.row() < 0 {
            return None;
        }
        let column = cell.column() as u32;
        let row = cell.row() as u32;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        Some(row as usize * width + column as usize)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Intents {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

#[derive(Clone, Debug)]
struct Body {
    id: BodyId,
    color: BodyColor,
    role: BodyRole,
    x: f64,
    y: f64,
    x_prev: f64,
    y_prev: f64,
    velocity_x: f64,
    velocity_y: f64,
    width: f64,
    height: f64,
    intents: Intents,
}

impl Body {
    fn new(
        id: BodyId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: BodyColor,
        role: BodyRole,
    ) -> Self {
        Self {
            id,
            color,
            role,
            x,
            y,
            x_prev: x,
            y_prev: y,
            velocity_x: 0.0,
            velocity_y: 0.0,
            width,
            height,
            intents: Intents::default(),
        }
    }

    fn set_intent(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.intents.left = pressed,
            Direction::Right => self.intents.right = pressed,
            Direction::Up => self.intents.up = pressed,
            Direction::Down => self.intents.down = pressed,
        }
    }

    fn cell_left(&self, x: f64, resolution: f64) -> i32 {
        ((x + EPSILON) / resolution).floor() as i32
    }

    fn cell_right(&self, x: f64, resolution: f64) -> i32 {
        ((x + self.width - EPSILON) / resolution).floor() as i32
    }

    fn cell_top(&self, y: f64, resolution: f64) -> i32 {
        ((y + EPSILON) / resolution).floor() as i32
    }

    fn cell_bottom(&self, y: f64, resolution: f64) -> i32 {
        ((y + self.height - EPSILON) / resolution).floor() as i32
    }

    fn column_span(&self, resolution: f64) -> (i32, i32) {
        (
            self.cell_left(self.x, resolution),
            self.cell_right(self.x, resolution),
        )
    }

    fn row_span(&self, resolution: f64) -> (i32, i32) {
        (
            self.cell_top(self.y, resolution),
            self.cell_bottom(self.y, resolution),
        )
    }

    /// Clamps the per-tick horizontal displacement to less than the body's
    /// own width so a single step can never tunnel through a one-cell wall.
    fn limit_horizontal_speed(&mut self, dt: f64) {
        if self.velocity_x * dt < -self.width + EPSILON {
            self.velocity_x = (-self.width + EPSILON) / dt;
        }
        if self.velocity_x * dt > self.width - EPSILON {
            self.velocity_x = (self.width - EPSILON) / dt;
        }
    }

    fn limit_vertical_speed(&mut self, dt: f64) {
        if self.velocity_y * dt < -self.height + EPSILON {
            self.velocity_y = (-self.height + EPSILON) / dt;
        }
        if self.velocity_y * dt > self.height - EPSILON {
            self.velocity_y = (self.height - EPSILON) / dt;
        }
    }
}

/// Represents the authoritative Maze Race session state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    bodies: Vec<Body>,
    tuning: MotionTuning,
    winner: Option<(BodyId, BodyColor)>,
    next_body_id: u32,
}

impl World {
    /// Creates a new session with a default, fully walled grid and no bodies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::with_dimensions(DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_RESOLUTION),
            bodies: Vec::new(),
            tuning: MotionTuning::default(),
            winner: None,
            next_body_id: 0,
        }
    }

    fn body_mut(&mut self, body_id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|body| body.id == body_id)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGrid {
            columns,
            rows,
            resolution,
        } => {
            // A new grid starts a new session: bodies and the win latch are
            // tied to the session lifetime.
            world.grid = Grid::with_dimensions(columns, rows, resolution);
            world.bodies.clear();
            world.winner = None;
            world.next_body_id = 0;
        }
        Command::ConfigureMotion { tuning } => {
            world.tuning = tuning;
        }
        Command::SetWall { cell, present } => {
            world.grid.set_wall(cell, present);
        }
        Command::SetCeiling { cell, present } => {
            world.grid.set_ceiling(cell, present);
        }
        Command::SpawnBody {
            x,
            y,
            width,
            height,
            color,
            role,
        } => {
            let id = BodyId::new(world.next_body_id);
            world.next_body_id = world.next_body_id.saturating_add(1);
            world.bodies.push(Body::new(id, x, y, width, height, color, role));
            out_events.push(Event::BodySpawned {
                body: id,
                role,
                color,
            });
        }
        Command::SetIntent {
            body,
            direction,
            pressed,
        } => {
            if let Some(body) = world.body_mut(body) {
                body.set_intent(direction, pressed);
            }
        }
        Command::SetVelocity {
            body,
            velocity_x,
            velocity_y,
        } => {
            if let Some(body) = world.body_mut(body) {
                body.velocity_x = velocity_x;
                body.velocity_y = velocity_y;
            }
        }
        Command::Tick { dt } => {
            step(world, dt, out_events);
        }
    }
}

fn step(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    out_events.push(Event::TimeAdvanced { dt });
    let seconds = dt.as_secs_f64();

    let tuning = world.tuning;
    let World { grid, bodies, .. } = world;
    for body in bodies.iter_mut() {
        if body.role.is_goal() {
            continue;
        }

        apply_intents(body, &tuning, seconds);
        if body.velocity_x != 0.0 {
            sweep_horizontal(grid, body, &tuning, seconds, out_events);
        }
        if body.velocity_y != 0.0 {
            sweep_vertical(grid, body, &tuning, seconds, out_events);
        }
        wrap_into_playfield(grid, body, out_events);
    }

    resolve_body_overlaps(world, out_events);
}

fn apply_intents(body: &mut Body, tuning: &MotionTuning, dt: f64) {
    if body.intents.right {
        body.velocity_x = (body.velocity_x + tuning.acceleration * dt).min(tuning.walk_speed);
    }
    if body.intents.left {
        body.velocity_x = (body.velocity_x - tuning.acceleration * dt).max(-tuning.walk_speed);
    }
    if body.intents.down {
        body.velocity_y = (body.velocity_y + tuning.acceleration * dt).min(tuning.walk_speed);
    }
    if body.intents.up {
        body.velocity_y = (body.velocity_y - tuning.acceleration * dt).max(-tuning.walk_speed);
    }
}

fn sweep_horizontal(
    grid: &Grid,
    body: &mut Body,
    tuning: &MotionTuning,
    dt: f64,
    out_events: &mut Vec<Event>,
) {
    body.limit_horizontal_speed(dt);
    body.x_prev = body.x;
    body.x += body.velocity_x * dt;

    let resolution = grid.resolution();
    if body.velocity_x > 0.0 {
        let entered = body.cell_right(body.x, resolution);
        if entered != body.cell_right(body.x_prev, resolution) {
            let (row_start, row_end) = body.row_span(resolution);
            for row in row_start..=row_end {
                // A ceiling blocks sideways entry for every spanned row past
                // the topmost one, because the body crosses that row's upper
                // boundary while entering the column.
                let wall = grid.wall(GridCoord::new(entered, row));
                let ceiling = row != row_start && grid.ceiling(GridCoord::new(entered, row));
                if wall || ceiling {
                    body.velocity_x = -body.velocity_x * tuning.wall_restitution;
                    body.x = f64::from(entered) * resolution - body.width;
                    out_events.push(Event::WallHit {
                        body: body.id,
                        side: CollisionSide::Right,
                    });
                    break;
                }
            }
        }
    } else {
        let entered = body.cell_left(body.x, resolution);
        let exited = body.cell_left(body.x_prev, resolution);
        if entered != exited {
            let (row_start, row_end) = body.row_span(resolution);
            for row in row_start..=row_end {
                // The crossed boundary is the left edge of the cell the body
                // came from; ceilings are probed on the entered column.
                let wall = grid.wall(GridCoord::new(exited, row));
                let ceiling = row != row_start && grid.ceiling(GridCoord::new(entered, row));
                if wall || ceiling {
                    body.velocity_x = -body.velocity_x * tuning.wall_restitution;
                    body.x = f64::from(exited) * resolution;
                    out_events.push(Event::WallHit {
                        body: body.id,
                        side: CollisionSide::Left,
                    });
                    break;
                }
            }
        }
    }

    apply_friction(&mut body.velocity_x, tuning.friction, dt);
}

fn sweep_vertical(
    grid: &Grid,
    body: &mut Body,
    tuning: &MotionTuning,
    dt: f64,
    out_events: &mut Vec<Event>,
) {
    body.limit_vertical_speed(dt);
    body.y_prev = body.y;
    body.y += body.velocity_y * dt;

    let resolution = grid.resolution();
    if body.velocity_y > 0.0 {
        let entered = body.cell_bottom(body.y, resolution);
        if entered != body.cell_bottom(body.y_prev, resolution) {
            let (column_start, column_end) = body.column_span(resolution);
            for column in column_start..=column_end {
                let ceiling = grid.ceiling(GridCoord::new(column, entered));
                let wall = column != column_start && grid.wall(GridCoord::new(column, entered));
                if ceiling || wall {
                    body.velocity_y = -body.velocity_y * tuning.wall_restitution;
                    body.y = f64::from(entered) * resolution - body.height;
                    out_events.push(Event::WallHit {
                        body: body.id,
                        side: CollisionSide::Bottom,
                    });
                    break;
                }
            }
        }
    } else {
        let entered = body.cell_top(body.y, resolution);
        let exited = body.cell_top(body.y_prev, resolution);
        if entered != exited {
            let (column_start, column_end) = body.column_span(resolution);
            for column in column_start..=column_end {
                let ceiling = grid.ceiling(GridCoord::new(column, exited));
                let wall = column != column_start && grid.wall(GridCoord::new(column, entered));
                if ceiling || wall {
                    body.velocity_y = -body.velocity_y * tuning.wall_restitution;
                    body.y = f64::from(exited) * resolution;
                    out_events.push(Event::WallHit {
                        body: body.id,
                        side: CollisionSide::Top,
                    });
                    break;
                }
            }
        }
    }

    apply_friction(&mut body.velocity_y, tuning.friction, dt);
}

fn apply_friction(velocity: &mut f64, friction: f64, dt: f64) {
    if *velocity > 0.0 {
        *velocity = (*velocity - friction * dt).max(0.0);
    } else if *velocity < 0.0 {
        *velocity = (*velocity + friction * dt).min(0.0);
    }
}

/// Recovers bodies that left the playfield entirely; independent of wall
/// collision and applied after both sweeps.
fn wrap_into_playfield(grid: &Grid, body: &mut Body, out_events: &mut Vec<Event>) {
    let width = grid.playfield_width();
    let height = grid.playfield_height();

    if body.x < -body.width {
        body.x = width - 1.0;
        body.y -= 1.0;
        out_events.push(Event::BodyWrapped { body: body.id });
    } else if body.x > width {
        body.x = -body.width;
        out_events.push(Event::BodyWrapped { body: body.id });
    } else if body.y > height {
        body.y = 0.0;
        out_events.push(Event::BodyWrapped { body: body.id });
    }
}

#[derive(Clone, Copy, Debug)]
struct CornerOverlap {
    top_left: bool,
    top_right: bool,
    bottom_left: bool,
    bottom_right: bool,
}

impl CornerOverlap {
    fn any(self) -> bool {
        self.top_left || self.top_right || self.bottom_left || self.bottom_right
    }

    fn left_corners(self) -> bool {
        self.top_left || self.bottom_left
    }

    fn right_corners(self) -> bool {
        self.top_right || self.bottom_right
    }
}

/// Tests each corner of `other`'s box against `node`'s bounds.
fn corner_overlap(node: &Body, other: &Body) -> CornerOverlap {
    let left_inside = other.x >= node.x && other.x <= node.x + node.width;
    let right_inside = other.x + other.width >= node.x && other.x + other.width <= node.x + node.width;
    let top_inside = other.y >= node.y && other.y <= node.y + node.height;
    let bottom_inside =
        other.y + other.height >= node.y && other.y + other.height <= node.y + node.height;

    CornerOverlap {
        top_left: left_inside && top_inside,
        top_right: right_inside && top_inside,
        bottom_left: left_inside && bottom_inside,
        bottom_right: right_inside && bottom_inside,
    }
}

fn resolve_body_overlaps(world: &mut World, out_events: &mut Vec<Event>) {
    let tuning = world.tuning;
    let World { bodies, winner, .. } = world;
    let count = bodies.len();

    for first in 0..count {
        for second in first + 1..count {
            let (head, tail) = bodies.split_at_mut(second);
            let node = &mut head[first];
            let other = &mut tail[0];

            let overlap = corner_overlap(node, other);
            if overlap.any() {
                if node.role.is_goal() || other.role.is_goal() {
                    if winner.is_none() {
                        let (id, color) = if node.role.is_goal() {
                            (other.id, other.color)
                        } else {
                            (node.id, node.color)
                        };
                        *winner = Some((id, color));
                        out_events.push(Event::GoalReached { winner: id, color });
                    }
                } else {
                    node.velocity_x = -node.velocity_x * tuning.bounce_restitution;
                    node.velocity_y = -node.velocity_y * tuning.bounce_restitution;
                    other.velocity_x = -other.velocity_x * tuning.bounce_restitution;
                    other.velocity_y = -other.velocity_y * tuning.bounce_restitution;
                    out_events.push(Event::BodyHit {
                        first: node.id,
                        second: other.id,
                    });
                }
            }

            // Positional separation along the horizontal axis only, applied
            // regardless of goal participation.
            if overlap.left_corners() {
                node.x = other.x - node.width - 1.0;
            } else if overlap.right_corners() {
                node.x = other.x + other.width + 1.0;
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use maze_race_core::{BodyColor, BodyId, BodyRole};

    /// Provides read-only access to the wall/ceiling grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Reports whether a racer has reached the goal. Once `true`, never
    /// resets within the session.
    #[must_use]
    pub fn finished(world: &World) -> bool {
        world.winner.is_some()
    }

    /// Color of the winning racer, if the race has finished.
    #[must_use]
    pub fn winner_color(world: &World) -> Option<BodyColor> {
        world.winner.map(|(_, color)| color)
    }

    /// Captures a read-only view of the bodies inhabiting the session.
    #[must_use]
    pub fn body_view(world: &World) -> BodyView {
        let mut snapshots: Vec<BodySnapshot> = world
            .bodies
            .iter()
            .map(|body| BodySnapshot {
                id: body.id,
                role: body.role,
                color: body.color,
                x: body.x,
                y: body.y,
                width: body.width,
                height: body.height,
                velocity_x: body.velocity_x,
                velocity_y: body.velocity_y,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        BodyView { snapshots }
    }

    /// Read-only snapshot describing all bodies within the session.
    #[derive(Clone, Debug)]
    pub struct BodyView {
        snapshots: Vec<BodySnapshot>,
    }

    impl BodyView {
        /// Iterator over the captured body snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &BodySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<BodySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single body's state used for queries.
    #[derive(Clone, Debug, PartialEq)]
    pub struct BodySnapshot {
        /// Unique identifier assigned to the body.
        pub id: BodyId,
        /// Role the body plays in the race.
        pub role: BodyRole,
        /// Appearance assigned to the body.
        pub color: BodyColor,
        /// Horizontal world coordinate of the top-left corner.
        pub x: f64,
        /// Vertical world coordinate of the top-left corner.
        pub y: f64,
        /// Width of the body in world units.
        pub width: f64,
        /// Height of the body in world units.
        pub height: f64,
        /// Horizontal velocity in world units per second.
        pub velocity_x: f64,
        /// Vertical velocity in world units per second.
        pub velocity_y: f64,
    }
}
