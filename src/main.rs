//! Headless light-cycle match runner
//!
//! Plays a bots-only match to completion and prints the result. Useful for
//! tuning difficulty and checking determinism without a front-end.
//!
//! Usage:
//!   lightcycle-arena --bots 3 --difficulty 2 --seed 42
//!   RUST_LOG=debug lightcycle-arena --config settings.json --json

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use lightcycle_arena::sim::{GameEvent, TickInput};
use lightcycle_arena::{ArenaSize, Difficulty, Settings, Simulation};

#[derive(Parser)]
#[command(name = "lightcycle-arena")]
#[command(about = "Run a headless light-cycle match between bots")]
struct Args {
    /// Settings file (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Number of bots (2-3 when no humans)
    #[arg(long)]
    bots: Option<u32>,
    /// Bot difficulty (1-3)
    #[arg(long)]
    difficulty: Option<u32>,
    /// Arena size selector (1-3)
    #[arg(long)]
    arena_size: Option<u32>,
    /// Lives per cycle
    #[arg(long)]
    lives: Option<u32>,
    /// Stop after this many ticks even if undecided
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CycleSummary {
    name: String,
    color: String,
    lives: u32,
}

#[derive(Debug, Serialize)]
struct MatchSummary {
    seed: u64,
    arena: String,
    difficulty: String,
    ticks: u64,
    rounds: u32,
    finished: bool,
    winner: Option<String>,
    cycles: Vec<CycleSummary>,
}

fn build_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    // No input device here, so every cycle is a bot
    settings.humans = 0;
    settings.countdown = false;
    if args.config.is_none() {
        settings.bots = 2;
    }
    if let Some(bots) = args.bots {
        settings.bots = bots;
    }
    if let Some(level) = args.difficulty {
        settings.difficulty = Difficulty::from_level(level)?;
    }
    if let Some(selector) = args.arena_size {
        settings.arena_size = ArenaSize::from_selector(selector)?;
    }
    if let Some(lives) = args.lives {
        settings.lives = lives;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.max_ticks == 0 {
        bail!("--max-ticks must be > 0");
    }

    let settings = build_settings(&args)?;
    let mut sim = Simulation::new(&settings)?;
    log::info!("Light-cycle arena (headless) starting, seed {}", sim.state.seed);

    let input = TickInput::default();
    while !sim.is_over() && sim.state.tick_count < args.max_ticks {
        for event in sim.step(&input) {
            match event {
                GameEvent::Crash { entity } => {
                    log::debug!("{} crashed", sim.state.entities[entity].name)
                }
                GameEvent::GameOver { .. } | GameEvent::RoundReset { .. } => {}
                other => log::debug!("{:?}", other),
            }
        }
    }

    let state = &sim.state;
    let summary = MatchSummary {
        seed: state.seed,
        arena: settings.arena_size.as_str().to_string(),
        difficulty: settings.difficulty.as_str().to_string(),
        ticks: state.tick_count,
        rounds: state.round,
        finished: state.is_over(),
        winner: state.winner_name().map(str::to_string),
        cycles: state
            .entities
            .iter()
            .map(|e| CycleSummary {
                name: e.name.clone(),
                color: e.color.clone(),
                lives: e.lives,
            })
            .collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== MATCH RESULT ===");
    println!("  Seed:       {}", summary.seed);
    println!("  Arena:      {}", summary.arena);
    println!("  Difficulty: {}", summary.difficulty);
    println!("  Ticks:      {}", summary.ticks);
    println!("  Rounds:     {}", summary.rounds);
    for cycle in &summary.cycles {
        println!("  {:<6} lives {}", cycle.name, cycle.lives);
    }
    match (&summary.winner, summary.finished) {
        (Some(name), _) => println!("{name} wins!"),
        (None, true) => println!("No survivors."),
        (None, false) => println!("Undecided after {} ticks.", summary.ticks),
    }
    Ok(())
}
