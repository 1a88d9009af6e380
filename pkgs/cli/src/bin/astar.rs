use astar_cli::cli::{
    self,
    bench::{BenchConfig, bench},
};
use clap::Parser;
use std::{error::Error, num::NonZeroUsize, time::Duration};

/// Runs A* on random geometric graphs and reports how the searches went.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of vertices in the generated graph
    #[arg(short = 'n', long, default_value_t = 10_000)]
    vertices: usize,

    /// Outgoing edges per vertex
    #[arg(short, long, default_value_t = 4)]
    degree: usize,

    /// Number of random start/goal queries
    #[arg(short, long, default_value_t = 100)]
    queries: usize,

    /// Time budget per search in seconds
    #[arg(short, long, default_value = "1.0", value_parser = cli::parse_timeout)]
    timeout: Duration,

    /// Seed for graph and query generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of worker threads, or "auto"
    #[arg(short, long, default_value = "auto", value_parser = cli::parse_num_worker_threads)]
    worker_threads: NonZeroUsize,

    /// Check every result against a search without heuristic
    #[arg(long)]
    validate: bool,

    #[arg(long)]
    no_progress_bar: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let stats = bench(BenchConfig {
        num_vertices: args.vertices,
        degree: args.degree,
        num_queries: args.queries,
        timeout: args.timeout,
        seed: args.seed,
        num_worker_threads: args.worker_threads,
        validate: args.validate,
        no_progress_bar: args.no_progress_bar,
    })?;

    if stats.failed_verifications > 0 || stats.errors > 0 {
        return Err(format!(
            "{} failed verification(s), {} error(s)",
            stats.failed_verifications, stats.errors
        )
        .into());
    }
    Ok(())
}
