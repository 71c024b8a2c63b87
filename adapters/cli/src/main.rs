#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Maze Race session.
//!
//! Carves a maze, drops both racers and the goal into it, scripts each racer
//! towards the opposite corner and ticks the world until one of them reaches
//! the goal or the tick budget runs out. The final scene and an event tally
//! are printed at the end so a run can be inspected without a window.

mod scene;

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use maze_race_core::{BodyColor, BodyId, BodyRole, Command, Direction, Event};
use maze_race_system_bootstrap::Bootstrap;
use maze_race_system_maze_generation::MazeGeneration;
use maze_race_world::{apply, query, World};

#[derive(Debug, Parser)]
#[command(name = "maze-race", about = "Headless maze race simulation")]
struct Args {
    /// Number of playable cell columns in the maze.
    #[arg(long, default_value_t = 20)]
    columns: u32,

    /// Number of playable cell rows in the maze.
    #[arg(long, default_value_t = 15)]
    rows: u32,

    /// Side length of a single cell in world units.
    #[arg(long, default_value_t = 32.0)]
    resolution: f64,

    /// Seed shared by maze carving and goal placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

#[derive(Debug, Default)]
struct EventTally {
    wall_hits: u32,
    body_hits: u32,
    wraps: u32,
    winner: Option<(BodyId, BodyColor)>,
}

impl EventTally {
    fn absorb(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::WallHit { .. } => self.wall_hits += 1,
                Event::BodyHit { .. } => self.body_hits += 1,
                Event::BodyWrapped { .. } => self.wraps += 1,
                Event::GoalReached { winner, color } => {
                    self.winner = Some((*winner, *color));
                }
                Event::TimeAdvanced { .. } | Event::BodySpawned { .. } => {}
            }
        }
    }
}

/// Entry point for the Maze Race command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    if args.resolution <= 0.0 {
        bail!("resolution must be positive (received {})", args.resolution);
    }
    if args.tick_ms == 0 {
        bail!("tick-ms must be positive");
    }

    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureGrid {
            columns: args.columns,
            rows: args.rows,
            resolution: args.resolution,
        },
        &mut events,
    );

    let mut commands = Vec::new();
    MazeGeneration::new(args.seed).carve(query::grid(&world), &mut commands);
    Bootstrap::new(args.seed).spawn_commands(query::grid(&world), &mut commands);
    for command in commands {
        apply(&mut world, command, &mut events);
    }

    let racers: Vec<BodyId> = events
        .iter()
        .filter_map(|event| match event {
            Event::BodySpawned {
                body,
                role: BodyRole::Racer,
                ..
            } => Some(*body),
            _ => None,
        })
        .collect();
    script_intents(&mut world, &racers, &mut events);

    let mut tally = EventTally::default();
    tally.absorb(&events);

    let dt = Duration::from_millis(args.tick_ms);
    let mut ticks_run = 0;
    for _ in 0..args.ticks {
        let mut tick_events = Vec::new();
        apply(&mut world, Command::Tick { dt }, &mut tick_events);
        tally.absorb(&tick_events);
        ticks_run += 1;
        if query::finished(&world) {
            break;
        }
    }

    let scene = scene::build(&world)?;
    println!(
        "simulated {ticks_run} ticks over a {}x{} maze ({} stroked edges)",
        args.columns,
        args.rows,
        scene.edges.len()
    );
    println!(
        "wall hits: {}, body hits: {}, wraps: {}",
        tally.wall_hits, tally.body_hits, tally.wraps
    );
    match tally.winner {
        Some((body, color)) => println!(
            "winner: body {} (rgb {}, {}, {})",
            body.get(),
            color.red(),
            color.green(),
            color.blue()
        ),
        None => println!("no winner within the tick budget"),
    }

    Ok(())
}

/// Sends the first racer towards the far corner and the second towards the
/// near corner, mirroring how a player would hold both key pairs down.
fn script_intents(world: &mut World, racers: &[BodyId], events: &mut Vec<Event>) {
    let plans = [
        [Direction::Right, Direction::Down],
        [Direction::Left, Direction::Up],
    ];
    for (racer, plan) in racers.iter().zip(plans) {
        for direction in plan {
            apply(
                world,
                Command::SetIntent {
                    body: *racer,
                    direction,
                    pressed: true,
                },
                events,
            );
        }
    }
}
