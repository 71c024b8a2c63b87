#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Race adapters.
//!
//! Everything here is a declarative description: adapters translate world
//! snapshots into a [`Scene`]; the drawing loop that presents it lives
//! outside this workspace.

use glam::Vec2;
use maze_race_core::{BodyColor, GridCoord};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts a body's appearance into a presentation color.
    #[must_use]
    pub const fn from_body(color: BodyColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Straight line between two world-space points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    /// Start of the segment in world units.
    pub from: Vec2,
    /// End of the segment in world units.
    pub to: Vec2,
}

impl LineSegment {
    /// Creates a new line segment descriptor.
    #[must_use]
    pub const fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }
}

/// Segment covering the left edge of the given cell.
#[must_use]
pub fn wall_segment(cell: GridCoord, resolution: f32) -> LineSegment {
    let x = cell.column() as f32 * resolution;
    let y = cell.row() as f32 * resolution;
    LineSegment::new(Vec2::new(x, y), Vec2::new(x, y + resolution))
}

/// Segment covering the top edge of the given cell.
#[must_use]
pub fn ceiling_segment(cell: GridCoord, resolution: f32) -> LineSegment {
    let x = cell.column() as f32 * resolution;
    let y = cell.row() as f32 * resolution;
    LineSegment::new(Vec2::new(x, y), Vec2::new(x + resolution, y))
}

/// Describes the maze playfield that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeGridPresentation {
    /// Number of cell columns contained in the playfield.
    pub columns: u32,
    /// Number of cell rows contained in the playfield.
    pub rows: u32,
    /// Side length of a single cell expressed in world units.
    pub resolution: f32,
    /// Color used when stroking the faint background grid.
    pub line_color: Color,
    /// Color used when stroking walls and ceilings.
    pub edge_color: Color,
}

impl MazeGridPresentation {
    /// Default color of the faint background grid.
    pub const DEFAULT_LINE_COLOR: Color = Color::from_rgb_u8(0xcc, 0xcc, 0xcc);

    /// Default color of maze walls and ceilings.
    pub const DEFAULT_EDGE_COLOR: Color = Color::from_rgb_u8(0x00, 0x00, 0xff);

    /// Creates a new maze playfield descriptor.
    ///
    /// Returns an error when `resolution` is not strictly positive.
    pub fn new(
        columns: u32,
        rows: u32,
        resolution: f32,
        line_color: Color,
        edge_color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if resolution <= 0.0 {
            return Err(RenderingError::InvalidResolution { resolution });
        }

        Ok(Self {
            columns,
            rows,
            resolution,
            line_color,
            edge_color,
        })
    }

    /// Calculates the total width of the playfield.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.resolution
    }

    /// Calculates the total height of the playfield.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.resolution
    }
}

/// Axis-aligned rectangle rendered for a single body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPresentation {
    /// Top-left corner of the body in world units.
    pub origin: Vec2,
    /// Width and height of the body in world units.
    pub size: Vec2,
    /// Fill color of the body.
    pub color: Color,
}

impl BodyPresentation {
    /// Creates a new body presentation descriptor.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            origin,
            size,
            color,
        }
    }
}

/// Banner shown over the playfield once a racer has won.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WinnerBanner {
    /// Color of the winning racer, used to tint the banner.
    pub color: Color,
}

impl WinnerBanner {
    /// Creates a new winner banner descriptor.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Scene description combining the playfield, maze edges and bodies.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playfield that composes the background.
    pub grid: MazeGridPresentation,
    /// Wall and ceiling segments currently present in the maze.
    pub edges: Vec<LineSegment>,
    /// Bodies inhabiting the maze, racers first, goal last.
    pub bodies: Vec<BodyPresentation>,
    /// Present once the race has been won.
    pub winner: Option<WinnerBanner>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        grid: MazeGridPresentation,
        edges: Vec<LineSegment>,
        bodies: Vec<BodyPresentation>,
        winner: Option<WinnerBanner>,
    ) -> Self {
        Self {
            grid,
            edges,
            bodies,
            winner,
        }
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell resolution must be positive to avoid a zero-sized playfield.
    InvalidResolution {
        /// Provided resolution that failed validation.
        resolution: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { resolution } => {
                write!(f, "resolution must be positive (received {resolution})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_creation_accepts_positive_resolution() {
        let grid = MazeGridPresentation::new(
            20,
            15,
            32.0,
            MazeGridPresentation::DEFAULT_LINE_COLOR,
            MazeGridPresentation::DEFAULT_EDGE_COLOR,
        )
        .expect("positive resolution should succeed");

        assert_eq!(grid.width(), 640.0);
        assert_eq!(grid.height(), 480.0);
    }

    #[test]
    fn grid_creation_rejects_zero_resolution_without_panicking() {
        let error = MazeGridPresentation::new(
            20,
            15,
            0.0,
            MazeGridPresentation::DEFAULT_LINE_COLOR,
            MazeGridPresentation::DEFAULT_EDGE_COLOR,
        )
        .expect_err("zero resolution must be rejected");

        assert!(matches!(
            error,
            RenderingError::InvalidResolution { resolution } if resolution == 0.0
        ));
    }

    #[test]
    fn wall_segment_covers_the_left_edge() {
        let segment = wall_segment(GridCoord::new(2, 1), 32.0);
        assert_eq!(segment.from, Vec2::new(64.0, 32.0));
        assert_eq!(segment.to, Vec2::new(64.0, 64.0));
    }

    #[test]
    fn ceiling_segment_covers_the_top_edge() {
        let segment = ceiling_segment(GridCoord::new(2, 1), 32.0);
        assert_eq!(segment.from, Vec2::new(64.0, 32.0));
        assert_eq!(segment.to, Vec2::new(96.0, 32.0));
    }

    #[test]
    fn body_color_converts_to_presentation_color() {
        let color = Color::from_body(BodyColor::from_rgb(0xff, 0x00, 0x00));
        assert_eq!(color, Color::from_rgb_u8(0xff, 0x00, 0x00));
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert!(color.red > 0.49 && color.red < 0.51);
        assert_eq!(color.alpha, 1.0);
    }

    #[test]
    fn scene_preserves_its_channels() {
        let grid = MazeGridPresentation::new(
            4,
            4,
            32.0,
            MazeGridPresentation::DEFAULT_LINE_COLOR,
            MazeGridPresentation::DEFAULT_EDGE_COLOR,
        )
        .expect("valid grid");
        let edges = vec![wall_segment(GridCoord::new(0, 0), 32.0)];
        let bodies = vec![BodyPresentation::new(
            Vec2::new(2.0, 2.0),
            Vec2::splat(24.0),
            Color::from_rgb_u8(0xff, 0xa5, 0x00),
        )];

        let scene = Scene::new(grid, edges.clone(), bodies.clone(), None);
        assert_eq!(scene.grid, grid);
        assert_eq!(scene.edges, edges);
        assert_eq!(scene.bodies, bodies);
        assert!(scene.winner.is_none());
    }
}
