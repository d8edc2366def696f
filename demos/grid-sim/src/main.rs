//! grid-sim — a small standalone run of the block-paged grid world.
//!
//! Spawns a handful of agents at the edges of a square viewport, sends them
//! toward its centre, and ticks the world forward while logging block
//! loads/evictions and agent arrivals. No CLI-parsing crate — flags are
//! read by hand for a binary this small.

use std::time::Instant;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use dt_core::Coord;
use dt_output::{EventSink, TracingSink};
use dt_sim::facade::World;
use dt_sim::WorldConfig;

struct Args {
    block_size: u32,
    max_blocks: usize,
    workers: usize,
    agents: usize,
    ticks: usize,
    seed: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self { block_size: 16, max_blocks: 64, workers: 4, agents: 8, ticks: 400, seed: 42 }
    }
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut raw = std::env::args().skip(1);
    while let Some(flag) = raw.next() {
        let value = |flag: &str, raw: &mut dyn Iterator<Item = String>| -> Result<String> {
            raw.next().ok_or_else(|| anyhow::anyhow!("{flag} needs a value"))
        };
        match flag.as_str() {
            "--block-size" => args.block_size = value(&flag, &mut raw)?.parse()?,
            "--max-blocks" => args.max_blocks = value(&flag, &mut raw)?.parse()?,
            "--workers" => args.workers = value(&flag, &mut raw)?.parse()?,
            "--agents" => args.agents = value(&flag, &mut raw)?.parse()?,
            "--ticks" => args.ticks = value(&flag, &mut raw)?.parse()?,
            "--seed" => args.seed = value(&flag, &mut raw)?.parse()?,
            other => bail!("unrecognized flag: {other}"),
        }
    }
    if args.block_size == 0 {
        bail!("--block-size must be positive");
    }
    if args.max_blocks == 0 {
        bail!("--max-blocks must be positive");
    }
    Ok(args)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("grid-sim: {err}");
            std::process::exit(1);
        }
    };

    println!("=== grid-sim — block-paged grid world ===");
    println!(
        "block_size={}  max_blocks={}  workers={}  agents={}  ticks={}  seed={}",
        args.block_size, args.max_blocks, args.workers, args.agents, args.ticks, args.seed
    );
    println!();

    let config = WorldConfig {
        block_size: args.block_size,
        max_blocks: args.max_blocks,
        max_parallel_loaders: args.workers,
        rng_seed: args.seed,
        ..WorldConfig::default()
    };
    let mut world = World::with_default_terrain(config);

    let half = (args.block_size as i32) * 2;
    world.set_viewport_center(0, 0);
    for _ in 0..10 {
        world.tick(0.05);
    }

    let mut ids = Vec::with_capacity(args.agents);
    for i in 0..args.agents {
        let angle = (i as f32) / (args.agents as f32) * std::f32::consts::TAU;
        let start = Coord::new((angle.cos() * half as f32) as i32, (angle.sin() * half as f32) as i32);
        let id: dt_core::AgentId = format!("agent-{i}").into();
        world.spawn_agent(id.clone(), start);
        ids.push(id);
    }

    for _ in 0..10 {
        world.tick(0.05);
    }
    for id in &ids {
        world.set_goal(id, Coord::new(0, 0));
    }

    let mut sink = TracingSink;
    let t0 = Instant::now();
    for _ in 0..args.ticks {
        world.tick(1.0 / 30.0);
        sink.on_events(&world.drain_events());
    }
    let elapsed = t0.elapsed();

    let reached = ids.iter().filter(|id| world.agent(id).is_some_and(|a| a.reached_goal())).count();

    println!("ran {} ticks in {:.3}s", args.ticks, elapsed.as_secs_f64());
    println!("blocks resident: {}   agents live: {}", world.block_count(), world.agent_count());
    println!("agents at goal: {reached}/{}", ids.len());
    println!();
    println!("{:<12} {:<16} {:<10}", "agent", "position", "at goal");
    println!("{}", "-".repeat(40));
    for id in &ids {
        if let Some(agent) = world.agent(id) {
            println!("{:<12} {:<16} {:<10}", id, format!("{}", agent.start), agent.reached_goal());
        }
    }

    world.shutdown();
    Ok(())
}
