use clap::{Parser, Subcommand};
use glam::Vec2;
use gridstream_lifecycle::{CellEvent, ObjectWorld, Streamer};
use gridstream_registry::{CellRegistry, RegistryConfig, SpawnDescriptor};
use gridstream_tools::StreamInspector;
use gridstream_window::WindowConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridstream-cli", about = "CLI demo for gridstream object streaming")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info for the workspace
    Info,
    /// Build a random registry and print its entries
    Registry {
        /// RNG seed for reproducible worlds
        #[arg(short, long, default_value = "0")]
        seed: u64,
        /// Number of random cells to attempt
        #[arg(short, long, default_value = "16")]
        count: usize,
        /// Cells are sampled from [-range, range) on both axes
        #[arg(short, long, default_value = "4")]
        range: i32,
    },
    /// Walk an observer east across a random world and stream objects
    Walk {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u32,
        /// Observer movement per tick, in world units
        #[arg(long, default_value = "1.5")]
        speed: f32,
        /// Window radius in cells
        #[arg(long, default_value = "2")]
        radius: i32,
        /// Cell size in world units
        #[arg(long, default_value = "4.0")]
        cell_size: f32,
        /// RNG seed for the registry
        #[arg(short, long, default_value = "0")]
        seed: u64,
        /// Number of random cells to attempt
        #[arg(short, long, default_value = "24")]
        count: usize,
        /// Cells are sampled from [-range, range) on both axes
        #[arg(short, long, default_value = "12")]
        range: i32,
    },
}

fn descriptors() -> Vec<SpawnDescriptor> {
    vec![
        SpawnDescriptor::new("tree"),
        SpawnDescriptor::new("rock"),
        SpawnDescriptor::new("shrub"),
    ]
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gridstream-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", gridstream_common::crate_info());
            println!("registry: {}", gridstream_registry::crate_info());
            println!("window: {}", gridstream_window::crate_info());
            println!("lifecycle: {}", gridstream_lifecycle::crate_info());
            println!("tools: {}", gridstream_tools::crate_info());
        }
        Commands::Registry { seed, count, range } => {
            let config = RegistryConfig {
                object_count: count,
                object_range: range,
                seed,
            };
            let registry = CellRegistry::build_random(&config, &descriptors())?;
            println!(
                "Registry: {} entries ({} attempted, seed={seed})",
                registry.len(),
                count
            );
            for (cell, descriptor) in registry.iter() {
                println!("  ({:>4}, {:>4}) -> {}", cell.x, cell.y, descriptor.template);
            }
        }
        Commands::Walk {
            ticks,
            speed,
            radius,
            cell_size,
            seed,
            count,
            range,
        } => {
            let registry = CellRegistry::build_random(
                &RegistryConfig {
                    object_count: count,
                    object_range: range,
                    seed,
                },
                &descriptors(),
            )?;
            println!(
                "Walking {ticks} ticks east at {speed}/tick (radius={radius}, cell_size={cell_size}, registry={} entries)",
                registry.len()
            );

            let mut streamer = Streamer::new(
                WindowConfig { radius, cell_size },
                registry,
                ObjectWorld::new(),
            )?;

            let start = Vec2::new(-(ticks as f32) * speed * 0.5, 0.0);
            for tick in 0..ticks {
                let observer = start + Vec2::new(tick as f32 * speed, 0.0);
                streamer.on_tick(observer);
                for event in streamer.drain_events() {
                    match event {
                        CellEvent::Added(cell) if streamer.is_live(cell) => {
                            println!("  tick {tick:>3}: spawned at ({}, {})", cell.x, cell.y);
                        }
                        CellEvent::Removed(cell) => {
                            // Spawned objects are already gone from the index
                            // by the time the event is drained; only report
                            // cells that had a descriptor.
                            if streamer.registry().contains(cell) {
                                println!("  tick {tick:>3}: despawned at ({}, {})", cell.x, cell.y);
                            }
                        }
                        _ => {}
                    }
                }
            }

            println!("\n{}", StreamInspector::summary(&streamer));
            println!(
                "objects: spawned={} destroyed={} live={}",
                streamer.factory().spawned_total(),
                streamer.factory().destroyed_total(),
                streamer.live_count()
            );
            println!("\n{}", StreamInspector::render_map(&streamer, radius + 2));
        }
    }

    Ok(())
}
