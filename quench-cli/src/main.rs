//! Command-line frontend for the quench SQA engine.
//!
//! Reads a problem file, runs the annealer, and prints the result map as
//! sorted `key value` lines.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 1000 steps, 100 Trotter slices, T=[0.01,0.01], H=[10,iF,0.01]
//! cargo run --release -p quench-cli -- problem.txt
//!
//! # Everything explicit
//! cargo run --release -p quench-cli -- problem.txt \
//!     --seed 42 --steps 5000 --nt 64 -T "[0.05,0.01]" -H "[8,iF,0.01]" \
//!     --remap encounter,no_fill --periodic 0 --first-in 1
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quench_core::{parse_problem_text, RunConfig, SqaEngine};

#[derive(Parser, Debug)]
#[command(name = "quench")]
#[command(about = "Simulated quantum annealing for k-body Ising problems")]
struct Args {
    /// Problem file: `# N M` header, then `v1 … vk w` edge lines
    file: PathBuf,

    /// Master seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of annealing steps
    #[arg(long, default_value_t = 1000)]
    steps: u64,

    /// Number of Trotter slices
    #[arg(long, default_value_t = 100)]
    nt: usize,

    /// Temperature schedule, e.g. "[0.01,0.01]" or "[10,iF,0.01]"
    #[arg(short = 'T', long = "temperature", default_value = "[0.01,0.01]")]
    t_schedule: String,

    /// Transverse-field schedule (same grammar as the temperature)
    #[arg(short = 'H', long = "transverse-field", default_value = "[10,iF,0.01]")]
    h_schedule: String,

    /// Label remap policy: "{sorted|encounter},{fill,<start>|no_fill}"
    #[arg(long, default_value = "sorted,fill,0")]
    remap: String,

    /// Periodic world-lines along imaginary time (0 or 1)
    #[arg(long, default_value_t = 1)]
    periodic: u8,

    /// Report relative to the first spin instead of spin up (0 or 1)
    #[arg(long = "first-in", default_value_t = 0)]
    first_in: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = RunConfig {
        seed: args.seed,
        steps: args.steps,
        nt: args.nt,
        t_schedule: args.t_schedule,
        h_schedule: args.h_schedule,
        remap: args.remap,
        periodic: args.periodic != 0,
        first_in: args.first_in != 0,
    };

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read problem file {:?}", args.file))?;
    let policy = config.remap_policy()?;
    let graph = parse_problem_text(&text, &policy)
        .with_context(|| format!("cannot parse problem file {:?}", args.file))?;

    let mut engine = SqaEngine::new(graph, config)?;
    engine.run()?;

    let mut map = engine.to_map();
    map.insert("file".to_string(), args.file.display().to_string());
    for (key, value) in &map {
        println!("{key} {value}");
    }

    Ok(())
}
