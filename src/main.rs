//! Gooey Defence headless runner.
//!
//! Builds the defence world the way a host would, places the towers of a
//! scenario, activates the field and runs a fixed number of ticks, logging a
//! summary at the end. Useful for eyeballing balance changes without the
//! engine.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --ticks 900 --scenario towers.json
//! cargo run -- --generate   # also rasterize the dome and report block counts
//! ```

use std::path::PathBuf;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::IVec3;
use log::{error, info, warn};

use gooeydefence::components::enemy::Enemy;
use gooeydefence::components::health::Health;
use gooeydefence::components::shrine::Shrine;
use gooeydefence::error::DefenceError;
use gooeydefence::events::field::ActivateFieldEvent;
use gooeydefence::events::health::EntityDiedEvent;
use gooeydefence::game::{DEFAULT_SCENARIO, Scenario, build_schedule, build_world, spawn_tower, tick};
use gooeydefence::resources::defenceconfig::DefenceConfig;
use gooeydefence::resources::defencefield::DefenceField;
use gooeydefence::resources::wavestate::WaveState;
use gooeydefence::resources::worldtime::WorldTime;
use gooeydefence::worldgen::{BlockKind, MemoryChunk, Region, WorldGenerator};

/// Gooey Defence headless runner
#[derive(Parser)]
#[command(version, about = "Runs the tower defence field without an engine")]
struct Cli {
    /// INI file with field, world and wave settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON tower layout. Defaults to a built-in three-tower layout.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,

    /// Simulation speed; 2.0 runs the game twice as fast per tick.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Override the world seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Rasterize the dome and report block counts before simulating.
    #[arg(long)]
    generate: bool,
}

#[derive(Resource, Debug, Default)]
struct RunStats {
    enemies_killed: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), DefenceError> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = DefenceConfig::with_path(path);
            config.load_from_file()?;
            config
        }
        None => DefenceConfig::new(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::from_json(DEFAULT_SCENARIO)?,
    };

    let mut world = build_world(&config)?;
    world.insert_resource(WorldTime::default().with_time_scale(cli.time_scale));
    world.insert_resource(RunStats::default());
    world.add_observer(
        |trigger: On<EntityDiedEvent>, enemies: Query<(), With<Enemy>>, mut stats: ResMut<RunStats>| {
            if enemies.contains(trigger.event().entity) {
                stats.enemies_killed += 1;
            }
        },
    );

    if cli.generate {
        report_generation(world.resource::<DefenceField>(), &config);
    }

    for spec in &scenario.towers {
        spawn_tower(&mut world, spec);
    }
    info!("Placed {} towers", scenario.towers.len());

    world.trigger(ActivateFieldEvent {});

    let mut schedule = build_schedule();
    for _ in 0..cli.ticks {
        tick(&mut world, &mut schedule, cli.dt);
    }

    let spawned = world.resource::<WaveState>().spawned;
    let killed = world.resource::<RunStats>().enemies_killed;
    let alive = world
        .query_filtered::<(), With<Enemy>>()
        .iter(&world)
        .count();
    let shrine_health = world
        .query_filtered::<&Health, With<Shrine>>()
        .iter(&world)
        .next()
        .map(|h| h.health);

    info!(
        "After {} ticks: spawned {}, killed {}, alive {}, shrine health {:?}",
        cli.ticks, spawned, killed, alive, shrine_health
    );
    if shrine_health == Some(0) {
        warn!("The shrine fell");
    }
    Ok(())
}

/// Rasterize the whole dome in 32-block chunks and log what was placed.
fn report_generation(field: &DefenceField, config: &DefenceConfig) {
    const CHUNK: IVec3 = IVec3::new(32, 32, 32);
    let generator = WorldGenerator::new(field, config.seed, config.fill_threshold);
    let reach = field.outer_ring_size() + 2 * field.entrance_ring_size() + 1;
    let chunks = reach.div_euclid(CHUNK.x) + 1;

    let mut counts = [0usize; 4];
    let kinds = [
        BlockKind::WorldBlock,
        BlockKind::AltWorldBlock,
        BlockKind::FillingBlock,
        BlockKind::ShrineBlock,
    ];
    for cx in -chunks..=chunks {
        for cz in -chunks..=chunks {
            for cy in 0..=(reach / CHUNK.y) {
                let mut chunk = MemoryChunk::new(Region::from_chunk(IVec3::new(cx, cy, cz), CHUNK));
                generator.generate_chunk(&mut chunk);
                for (count, kind) in counts.iter_mut().zip(kinds) {
                    *count += chunk.count(kind);
                }
            }
        }
    }
    for (count, kind) in counts.iter().zip(kinds) {
        info!("{}: {} blocks", kind.uri(), count);
    }
}
