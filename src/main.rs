use anyhow::Result;
use clap::Parser;
use faery_lib::run::{load_config, run_inspect, run_mutate, run_seed, SeedKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// What to do
    #[arg(short, long, value_enum, default_value = "seed")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "faery.toml")]
    config: PathBuf,

    /// Parent genome for `mutate`, genome to read for `inspect`
    #[arg(short, long, default_value = "data/genome_0.json")]
    input: PathBuf,

    /// Directory genomes and documents are written to
    #[arg(short, long, default_value = "data")]
    output: PathBuf,

    /// Number of offspring for `mutate`
    #[arg(long, default_value_t = 4)]
    children: usize,

    /// Starting plan for `seed`
    #[arg(long, value_enum, default_value = "base")]
    seed_kind: SeedKind,

    /// Length of a random chain seed
    #[arg(long, default_value_t = 4)]
    chain_length: usize,

    /// RNG seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Seed,
    Mutate,
    Inspect,
}

fn main() -> Result<()> {
    faery_core::metrics::init_logging();
    let args = Args::parse();

    let config = load_config(&args.config)?;
    let seed = args.seed.or(config.seed).unwrap_or(0);

    match args.mode {
        Mode::Seed => {
            let written = run_seed(&config, args.seed_kind, args.chain_length, &args.output, seed)?;
            println!("Wrote seed genome to {}", written.genome.display());
        }
        Mode::Mutate => {
            let written = run_mutate(&config, &args.input, &args.output, args.children, seed)?;
            for child in &written {
                println!(
                    "Child {} after {} attempt(s): {}",
                    child.id,
                    child.attempts,
                    child.genome.display()
                );
            }
        }
        Mode::Inspect => {
            let report = run_inspect(&config, &args.input, seed)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
