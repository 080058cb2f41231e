use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use skirmish_app::game_loop::{run_headless, run_paced, ticks_for};
use skirmish_app::logging;
use skirmish_sim::{ArenaConfig, ArenaEngine};

/// Play a headless SKIRMISH match between autonomous tanks.
#[derive(Parser)]
#[command(name = "skirmish", version, about, long_about = None)]
struct Args {
    /// Match length in simulated seconds
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file holding an arena configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated slots handed to the AI, e.g. `0,1`
    #[arg(long, value_delimiter = ',')]
    ai: Option<Vec<usize>>,

    /// Write the final snapshot as JSON to this path
    #[arg(long)]
    snapshot_out: Option<PathBuf>,

    /// Hold the nominal tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<ArenaConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<ArenaConfig>(&text)
                .with_context(|| format!("invalid arena config {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };
    config
        .controller
        .validate()
        .context("invalid controller configuration")?;

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(slots) = &args.ai {
        let mut ai_slots = [false; 2];
        for &slot in slots {
            match ai_slots.get_mut(slot) {
                Some(flag) => *flag = true,
                None => bail!("--ai slot {slot} out of range (expected 0 or 1)"),
            }
        }
        config.ai_slots = ai_slots;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = load_config(&args)?;
    info!(seed = config.seed, ai_slots = ?config.ai_slots, seconds = args.seconds, "starting match");

    let mut engine = ArenaEngine::new(config);
    let ticks = ticks_for(args.seconds);
    let summary = if args.realtime {
        run_paced(&mut engine, ticks, 1.0)
    } else {
        run_headless(&mut engine, ticks)
    };

    info!(
        shots = summary.shots,
        bursts = summary.bursts,
        dodges = summary.dodges,
        unstucks = summary.unstucks,
        kills = summary.kills,
        powerups = summary.powerups_collected,
        score = ?summary.score.kills,
        "summary"
    );

    if let Some(path) = &args.snapshot_out {
        let json = serde_json::to_string_pretty(&summary.final_snapshot)
            .context("failed to serialize final snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!(path = %path.display(), "final snapshot written");
    }
    Ok(())
}
