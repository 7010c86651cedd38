use anyhow::{Result, bail};
use clap::Parser;
use levelgen::crossing::has_crossing_edges;
use levelgen::{GeneratorConfig, Phase};
use tools::summary::{RunSummary, run_until_complete, standard_generator};

#[derive(Parser)]
#[command(author, version, about = "Generate many seeds and check invariants", long_about = None)]
struct Args {
    #[arg(short = 'n', long, default_value_t = 20)]
    seeds: u64,
    #[arg(short, long, default_value_t = 1)]
    start: u64,
    #[arg(long)]
    target_nodes: Option<usize>,
    #[arg(long, default_value_t = 500_000)]
    max_steps: usize,
}

fn main() -> Result<()> {
    tools::logging::init("warn");
    let args = Args::parse();

    println!("Sweeping {} seed(s) from {}...", args.seeds, args.start);
    let mut succeeded = 0;
    for seed in args.start..args.start + args.seeds {
        let config = GeneratorConfig {
            target_node_count: args.target_nodes,
            ..GeneratorConfig::with_seed(seed)
        };
        let mut generator = standard_generator(config)?;
        let seed_graph = generator.graph().clone();

        run_until_complete(&mut generator, Some(args.max_steps), |generator, report| {
            generator.graph().assert_invariants();
            assert_eq!(
                report.complete,
                generator.depth() == 0,
                "Invariant failed: completion must coincide with an empty stack"
            );
        });

        let summary = RunSummary::of(&generator);
        match generator.phase() {
            Phase::Succeeded => {
                if has_crossing_edges(generator.graph()) {
                    bail!("Invariant failed: seed {seed} succeeded with crossing edges");
                }
                succeeded += 1;
            }
            Phase::Failed => {
                if generator.graph() != &seed_graph {
                    bail!("Invariant failed: seed {seed} failed without restoring the seed graph");
                }
            }
            Phase::Expanding => {}
        }
        println!(
            "seed {seed:>6}: {:<10} {:>7} steps {:>4} nodes {}",
            summary.phase, summary.steps, summary.nodes, summary.fingerprint
        );
    }

    println!("Sweep completed: {succeeded}/{} succeeded.", args.seeds);
    Ok(())
}
