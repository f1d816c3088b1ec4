#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner for the Frontier Defence simulation.
//!
//! Configures a match, optionally builds towers next to the path whenever the
//! treasury allows, runs the requested number of frames and prints periodic
//! summaries of the published snapshot.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use frontier_defence_core::{
    tile_center, Biome, Event, GameSnapshot, MapConfig, TargetingMode, TileKind, TileMap,
    TowerKind,
};
use frontier_defence_engine::{EngineConfig, RunState, Simulation};
use frontier_defence_system_map_generation::WindingPathGenerator;
use frontier_defence_world::query;
use log::{debug, info};

const DEFAULT_LOADOUT: &str = "scout,soldier,sniper,farm,commander";

/// Command line arguments for the headless runner.
#[derive(Debug, Parser)]
#[command(name = "frontier-defence")]
#[command(about = "Runs the Frontier Defence simulation without a renderer")]
#[command(version)]
struct Args {
    /// Optional TOML file with engine settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the master seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 3_600)]
    frames: u64,

    /// Comma-separated list of five distinct tower kinds.
    #[arg(long, default_value = DEFAULT_LOADOUT)]
    loadout: String,

    /// Map size class from 1 to 5.
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// Map biome (grassland, desert, snow, volcanic, alien).
    #[arg(long, default_value = "grassland")]
    biome: String,

    /// Place towers beside the path whenever money allows.
    #[arg(long)]
    auto_build: bool,

    /// Targeting mode given to auto-built turrets (first, last, strongest,
    /// weakest, closest, random).
    #[arg(long, default_value = "first")]
    targeting: String,

    /// Frames between printed summaries.
    #[arg(long, default_value_t = 600)]
    summary_every: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Running totals gathered from the per-frame event stream.
#[derive(Debug, Default)]
struct Tally {
    kills: u64,
    breaches: u64,
    waves: u64,
    resets: u64,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemyKilled { .. } => self.kills += 1,
                Event::BaseBreached { .. } => self.breaches += 1,
                Event::WaveCompleted { .. } => self.waves += 1,
                Event::WorldReset => self.resets += 1,
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("failed to load engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.summary_every == 0 {
        bail!("--summary-every must be positive");
    }

    let loadout = parse_loadout(&args.loadout)?;
    let targeting = parse_targeting(&args.targeting)?;
    let map = MapConfig {
        scale: args.scale,
        biome: parse_biome(&args.biome)?,
    };

    let mut simulation =
        Simulation::with_default_maps(config).context("invalid engine config")?;
    simulation
        .configure_loadout(&loadout, map)
        .context("loadout rejected")?;
    simulation.start_game().context("match could not start")?;
    info!("running {} frames with seed {:#x}", args.frames, config.seed);

    let mut tally = Tally::default();
    for frame in 1..=args.frames {
        if args.auto_build {
            auto_build(&mut simulation, &loadout, targeting);
        }
        simulation.tick();
        tally.record(simulation.events());

        if simulation.run_state() == RunState::Halted {
            println!("base destroyed at frame {frame}");
            break;
        }
        if frame % args.summary_every == 0 {
            print_summary(&simulation.snapshot_now());
        }
    }

    print_summary(&simulation.snapshot_now());
    println!(
        "kills {} breaches {} waves cleared {} resets {}",
        tally.kills, tally.breaches, tally.waves, tally.resets
    );
    Ok(())
}

fn parse_loadout(list: &str) -> Result<Vec<TowerKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(parse_tower)
        .collect()
}

fn parse_tower(name: &str) -> Result<TowerKind> {
    let wanted = name.replace(|c: char| matches!(c, '-' | '_' | ' '), "");
    TowerKind::ALL
        .into_iter()
        .find(|kind| format!("{kind:?}").eq_ignore_ascii_case(&wanted))
        .with_context(|| format!("unknown tower kind `{name}`"))
}

fn parse_targeting(name: &str) -> Result<TargetingMode> {
    TargetingMode::ALL
        .into_iter()
        .find(|mode| format!("{mode:?}").eq_ignore_ascii_case(name.trim()))
        .with_context(|| format!("unknown targeting mode `{name}`"))
}

fn parse_biome(name: &str) -> Result<Biome> {
    match name.to_ascii_lowercase().as_str() {
        "grassland" => Ok(Biome::Grassland),
        "desert" => Ok(Biome::Desert),
        "snow" => Ok(Biome::Snow),
        "volcanic" => Ok(Biome::Volcanic),
        "alien" => Ok(Biome::Alien),
        _ => bail!("unknown biome `{name}`"),
    }
}

/// Places the cheapest affordable loadout tower on the first free tile that
/// borders the path, pointing turrets at `targeting`.
fn auto_build(
    simulation: &mut Simulation<WindingPathGenerator>,
    loadout: &[TowerKind],
    targeting: TargetingMode,
) {
    let money = query::money(simulation.world());
    let Some(kind) = loadout
        .iter()
        .copied()
        .filter(|kind| kind.base_stats().cost <= money)
        .min_by_key(|kind| kind.base_stats().cost)
    else {
        return;
    };

    let tiles = query::tiles(simulation.world());
    let required = if kind.base_stats().cliff_only {
        TileKind::Cliff
    } else {
        TileKind::Grass
    };
    let mut spots = Vec::new();
    for row in 0..tiles.rows() {
        for column in 0..tiles.columns() {
            if tiles.get(column, row) == Some(required) && borders_path(tiles, column, row) {
                spots.push(tile_center(column, row));
            }
        }
    }

    for spot in spots {
        if let Ok(tower) = simulation.place_tower(kind, spot) {
            debug!("auto-built {} {} at {spot}", kind.name(), tower.get());
            if kind.has_turret() && targeting != TargetingMode::First {
                let _ = simulation.set_targeting_mode(tower, targeting);
            }
            return;
        }
    }
}

fn borders_path(tiles: &TileMap, column: u32, row: u32) -> bool {
    let neighbours = [
        (column.wrapping_sub(1), row),
        (column + 1, row),
        (column, row.wrapping_sub(1)),
        (column, row + 1),
    ];
    neighbours.into_iter().any(|(x, y)| {
        matches!(
            tiles.get(x, y),
            Some(TileKind::Path | TileKind::Spawn | TileKind::Base)
        )
    })
}

fn print_summary(snapshot: &GameSnapshot) {
    println!(
        "frame {:>6} | wave {:>3} | money {:>6} | base {:>3}/{} | enemies {:>3} | towers {:>2}",
        snapshot.frame,
        snapshot.wave,
        snapshot.money,
        snapshot.base_health,
        snapshot.max_base_health,
        snapshot.enemies_remaining,
        snapshot.towers.len()
    );
}
