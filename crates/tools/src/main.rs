use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use levelgen::GeneratorConfig;
use tools::config_file::load_config;
use tools::summary::{RunSummary, run_until_complete, standard_generator};

#[derive(Parser)]
#[command(author, version, about = "Run one level generation headlessly", long_about = None)]
struct Args {
    /// TOML generator config; omitted keys take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the config's seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Keep expanding until the graph has this many nodes
    #[arg(long)]
    target_nodes: Option<usize>,
    /// Stop after this many executor steps even if generation is unfinished
    #[arg(long)]
    max_steps: Option<usize>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Print every step's log line
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    tools::logging::init("warn");
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(target) = args.target_nodes {
        if target == 0 {
            bail!("--target-nodes must be at least 1");
        }
        config.target_node_count = Some(target);
    }

    let mut generator = standard_generator(config)?;
    let trace = args.trace;
    run_until_complete(&mut generator, args.max_steps, |generator, report| {
        if trace {
            println!(
                "{:>6} depth {:>2} {:<15} {}",
                generator.steps_taken(),
                generator.depth(),
                report.status,
                report.log
            );
        }
    });

    let summary = RunSummary::of(&generator);
    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{json}");
    } else {
        println!("Generation {}.", summary.phase);
        println!("Seed: {}", summary.seed);
        println!("Steps: {}", summary.steps);
        println!("Nodes: {}  Edges: {}", summary.nodes, summary.edges);
        println!("Fingerprint: {}", summary.fingerprint);
    }

    Ok(())
}
