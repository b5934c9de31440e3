use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use strata_chunk::ChunkCoord;
use strata_runtime::WorldCache;
use strata_tiles::{AIR, TileRegistry};
use strata_world::worldgen::{WorldGenConfig, load_params_from_path};
use strata_world::{World, WorldGenParams};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Radius 64, depth 48: loads in well under a second.
    Small,
    /// Radius 5000, depth 1024: the ocean pass alone takes a while.
    Full,
}

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Build a hex-voxel world and walk the tile cache")]
struct Args {
    /// Worldgen TOML; overrides --preset.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tile table TOML; the built-in table is used when absent.
    #[arg(long)]
    tiles: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Preset::Small)]
    preset: Preset,
    /// Override the master seed.
    #[arg(long)]
    seed: Option<i64>,
    /// Starting focus as `q,r,layer`.
    #[arg(long, value_parser = parse_focus, default_value = "0,0,24", allow_hyphen_values = true)]
    focus: (i32, i32, i32),
    /// Simulation steps; the focus walks one chunk east per step.
    #[arg(long, default_value_t = 8)]
    steps: u32,
    /// Resident chunk limit.
    #[arg(long, default_value_t = 256)]
    capacity: usize,
    /// Generate the whole world up front (small worlds only).
    #[arg(long)]
    preload_all: bool,
}

fn parse_focus(s: &str) -> Result<(i32, i32, i32), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [q, r, layer] = parts.as_slice() else {
        return Err(format!("expected q,r,layer, got `{s}`"));
    };
    let num = |v: &str| v.parse::<i32>().map_err(|e| format!("`{v}`: {e}"));
    Ok((num(*q)?, num(*r)?, num(*layer)?))
}

fn load_params(args: &Args) -> Result<WorldGenParams, Box<dyn Error>> {
    if let Some(path) = &args.config {
        return Ok(load_params_from_path(path)?);
    }
    let cfg = match args.preset {
        Preset::Small => WorldGenConfig::small(),
        Preset::Full => WorldGenConfig::default(),
    };
    Ok(WorldGenParams::try_from_config(&cfg)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let registry = match &args.tiles {
        Some(path) => TileRegistry::load_from_path(path)?,
        None => TileRegistry::builtin()?,
    };
    let params = load_params(&args)?;
    let world = match args.seed {
        Some(seed) => World::with_seed(params, seed),
        None => World::new(params),
    };
    log::info!(
        "world: radius={} depth={} sea_level={} seed={} columns={}",
        world.radius(),
        world.depth(),
        world.sea_level(),
        world.seed,
        world.column_count()
    );

    let started = Instant::now();
    let mut cache = WorldCache::new(world, &registry, args.capacity)?;
    let ocean = cache.ocean().stats();
    log::info!(
        "ready in {}ms: ocean={} beach={} border_violations={}",
        started.elapsed().as_millis(),
        ocean.ocean,
        ocean.beach,
        ocean.border_violations
    );

    if args.preload_all {
        let t = Instant::now();
        let n = cache.preload_all();
        log::info!("preloaded {} chunks in {}ms", n, t.elapsed().as_millis());
    }

    let (q, r, layer) = args.focus;
    let step_q = strata_chunk::CHUNK_WIDTH as i32;
    for step in 0..args.steps {
        let fq = q.saturating_add((step as i32).saturating_mul(step_q));
        let t = Instant::now();
        cache.preload_near(fq, r, layer);
        cache.advance(1.0 / 20.0);
        let s = cache.stats();
        log::info!(
            "step {step}: focus=({fq}, {r}, {layer}) chunk={:?} resident={} generated={} evictions={} in {}us",
            ChunkCoord::from_world(fq, r, layer),
            s.entries,
            s.generated,
            s.evictions,
            t.elapsed().as_micros()
        );
    }

    println!("column at ({q}, {r}):");
    let depth = cache.world().depth();
    let mut last: Option<u16> = None;
    for l in (0..depth).rev() {
        let id = cache.get_tile(q, r, l);
        if id == AIR || Some(id) == last {
            continue;
        }
        last = Some(id);
        let name = registry.get(id).map(|t| t.name.as_str()).unwrap_or("?");
        println!("  layer {l:>4}: {name}");
    }
    let s = cache.stats();
    println!(
        "cache: hits={} misses={} generated={} evictions={} resident={}",
        s.hits, s.misses, s.generated, s.evictions, s.entries
    );
    Ok(())
}
