//! Maps world snapshots onto the shared rendering contracts.

use glam::Vec2;
use maze_race_core::GridCoord;
use maze_race_rendering::{
    ceiling_segment, wall_segment, BodyPresentation, Color, LineSegment, MazeGridPresentation,
    RenderingError, Scene, WinnerBanner,
};
use maze_race_world::{query, World};

/// Builds a declarative scene from the current world state.
pub(crate) fn build(world: &World) -> Result<Scene, RenderingError> {
    let grid = query::grid(world);
    let presentation = MazeGridPresentation::new(
        grid.columns().saturating_sub(1),
        grid.rows().saturating_sub(1),
        grid.resolution() as f32,
        MazeGridPresentation::DEFAULT_LINE_COLOR,
        MazeGridPresentation::DEFAULT_EDGE_COLOR,
    )?;

    let resolution = grid.resolution() as f32;
    let mut edges: Vec<LineSegment> = Vec::new();
    for row in 0..grid.rows() as i32 {
        for column in 0..grid.columns() as i32 {
            let cell = GridCoord::new(column, row);
            if grid.wall(cell) {
                edges.push(wall_segment(cell, resolution));
            }
            if grid.ceiling(cell) {
                edges.push(ceiling_segment(cell, resolution));
            }
        }
    }

    let bodies = query::body_view(world)
        .iter()
        .map(|snapshot| {
            BodyPresentation::new(
                Vec2::new(snapshot.x as f32, snapshot.y as f32),
                Vec2::new(snapshot.width as f32, snapshot.height as f32),
                Color::from_body(snapshot.color),
            )
        })
        .collect();

    let winner = query::winner_color(world)
        .map(|color| WinnerBanner::new(Color::from_body(color)));

    Ok(Scene::new(presentation, edges, bodies, winner))
}

#[cfg(test)]
mod tests {
    use super::build;
    use maze_race_core::Command;
    use maze_race_world::{apply, World};

    fn configured_world() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureGrid {
                columns: 4,
                rows: 3,
                resolution: 32.0,
            },
            &mut events,
        );
        world
    }

    #[test]
    fn fresh_world_strokes_every_wall_and_ceiling() {
        let world = configured_world();
        let scene = build(&world).expect("valid scene");
        // Padded 5x4 grid, one wall and one ceiling per cell.
        assert_eq!(scene.edges.len(), 40);
        assert!(scene.bodies.is_empty());
        assert!(scene.winner.is_none());
    }

    #[test]
    fn playfield_excludes_the_padding_cells() {
        let world = configured_world();
        let scene = build(&world).expect("valid scene");
        assert_eq!(scene.grid.columns, 4);
        assert_eq!(scene.grid.rows, 3);
        assert_eq!(scene.grid.width(), 128.0);
    }
}
