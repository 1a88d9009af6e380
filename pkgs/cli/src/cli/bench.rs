use crate::{
    cli::{self, Stats},
    graph::RandomGeometricGraph,
    pool::{self, Query, QueryReport},
};
use astar_core::{SearchError, measure_time, utils::human_duration};
use fastrand::Rng;
use log::{debug, error, info, warn};
use std::{error::Error, num::NonZeroUsize, time::Duration, time::Instant};

/// Parameters of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub num_vertices: usize,
    pub degree: usize,
    pub num_queries: usize,
    pub timeout: Duration,
    pub seed: Option<u64>,
    pub num_worker_threads: NonZeroUsize,
    pub validate: bool,
    pub no_progress_bar: bool,
}

/// Generates a random graph and runs a batch of A* queries on it.
pub fn bench(config: BenchConfig) -> Result<Stats, Box<dyn Error>> {
    let progress = cli::init_logging();
    let start = Instant::now();

    if config.num_vertices == 0 {
        return Err("The graph needs at least one vertex".into());
    }

    let mut rng = match config.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };
    info!("Seed: {}", rng.get_seed());

    let graph = RandomGeometricGraph::generate(config.num_vertices, config.degree, &mut rng);
    info!(
        "Generated graph with {} vertices and {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    let mut stats = Stats::new();
    let mut queries = Query::generate(graph.num_vertices(), config.num_queries, &mut rng);

    // Run the first query on its own to estimate the remaining runtime
    let first_query = if let Some(q) = queries.pop() {
        q
    } else {
        return Ok(stats);
    };
    let first_duration = measure_time!({
        let report = pool::solve_query(&graph, first_query, config.timeout, config.validate);
        record_report(&mut stats, first_query, report);
    });

    if !queries.is_empty() {
        // Create a progress bar if the remaining time is significant enough
        let estimate = first_duration.div_f64(config.num_worker_threads.get() as f64);
        let pb = if !config.no_progress_bar && cli::should_use_progress_bar(queries.len(), estimate)
        {
            let pb = cli::create_progress_bar(&progress, queries.len() + 1);
            pb.set_position(1); // Account for the first query we just solved
            Some(pb)
        } else {
            None
        };

        pool::run_queries(
            &graph,
            queries,
            config.timeout,
            config.num_worker_threads,
            config.validate,
            |query, report| {
                record_report(&mut stats, query, report);
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
            },
        );
        if let Some(pb) = &pb {
            pb.finish_with_message("done");
        }
    }

    stats.print_summary();
    info!("Total runtime: {}", human_duration(start.elapsed()));

    Ok(stats)
}

fn record_report(stats: &mut Stats, query: Query, report: Result<QueryReport, SearchError>) {
    match report {
        Ok(report) => {
            debug!(
                "Query {} ({} -> {}): {} with weight {:.4} over {} vertices, {} explored in {}",
                query.id,
                query.start,
                query.goal,
                report.outcome,
                report.weight,
                report.path_len,
                report.num_explored,
                human_duration(report.duration)
            );
            if let Some(Err(msg)) = &report.verification {
                warn!("Verification of query {} failed: {}", query.id, msg);
            }
            stats.record(&report);
        }
        Err(e) => {
            error!("Error while solving query {}: {}", query.id, e);
            stats.record_error();
        }
    }
}
