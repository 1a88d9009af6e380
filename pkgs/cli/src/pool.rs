use std::{num::NonZeroUsize, thread, time::Duration};

use astar_core::{AStarSolver, SearchError, ShortestPathsSolver, SolverOutcome, ZeroHeuristic};
use fastrand::Rng;
use log::{debug, trace};

use crate::graph::{RandomGeometricGraph, VertexId, weights_match};

/// A single start/goal pair to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub id: usize,
    pub start: VertexId,
    pub goal: VertexId,
}

impl Query {
    /// Draws `count` random queries over `0..num_vertices`.
    pub fn generate(num_vertices: usize, count: usize, rng: &mut Rng) -> Vec<Query> {
        (0..count)
            .map(|id| Query {
                id,
                start: rng.usize(0..num_vertices),
                goal: rng.usize(0..num_vertices),
            })
            .collect()
    }
}

/// Everything the driver keeps from a finished search.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub query: Query,
    pub outcome: SolverOutcome,
    pub weight: f64,
    pub path_len: usize,
    pub num_explored: usize,
    pub duration: Duration,
    /// `None` if validation was skipped.
    pub verification: Option<Result<(), String>>,
}

/// Runs one query and optionally cross-checks its result.
pub fn solve_query(
    graph: &RandomGeometricGraph,
    query: Query,
    timeout: Duration,
    validate: bool,
) -> Result<QueryReport, SearchError> {
    let solver = AStarSolver::new(graph, query.start, query.goal, timeout)?;

    let verification = if validate && solver.outcome() != SolverOutcome::Timeout {
        Some(cross_check(graph, query, &solver, timeout)?)
    } else {
        None
    };

    Ok(QueryReport {
        query,
        outcome: solver.outcome(),
        weight: solver.solution_weight(),
        path_len: solver.solution().len(),
        num_explored: solver.num_states_explored(),
        duration: solver.exploration_time(),
        verification,
    })
}

/// Checks the path itself and compares the result against a search without heuristic.
fn cross_check(
    graph: &RandomGeometricGraph,
    query: Query,
    solver: &AStarSolver<VertexId>,
    timeout: Duration,
) -> Result<Result<(), String>, SearchError> {
    if solver.outcome().is_solved() {
        if let Err(msg) = graph.verify_solution(
            query.start,
            query.goal,
            solver.solution(),
            solver.solution_weight(),
        ) {
            return Ok(Err(msg));
        }
    }

    let reference = AStarSolver::new(&ZeroHeuristic(graph), query.start, query.goal, timeout)?;
    if reference.outcome() == SolverOutcome::Timeout {
        debug!("Query {}: reference search timed out, only the path was checked", query.id);
        return Ok(Ok(()));
    }
    Ok(compare_with_reference(solver, &reference))
}

/// Compares a finished A* result with a finished search without heuristic.
fn compare_with_reference(
    solver: &impl ShortestPathsSolver<VertexId>,
    reference: &impl ShortestPathsSolver<VertexId>,
) -> Result<(), String> {
    if reference.outcome() != solver.outcome() {
        return Err(format!(
            "Reference search ended with {} but A* with {}",
            reference.outcome(),
            solver.outcome()
        ));
    }
    if !weights_match(reference.solution_weight(), solver.solution_weight()) {
        return Err(format!(
            "Reference path weighs {} but the A* path weighs {}",
            reference.solution_weight(),
            solver.solution_weight()
        ));
    }
    Ok(())
}

/// Solves all queries on `num_workers` threads, each with its own solver.
/// Reports are handed to `on_report` on the calling thread in completion order.
pub fn run_queries(
    graph: &RandomGeometricGraph,
    queries: Vec<Query>,
    timeout: Duration,
    num_workers: NonZeroUsize,
    validate: bool,
    mut on_report: impl FnMut(Query, Result<QueryReport, SearchError>),
) {
    let (query_sender, query_receiver) = crossbeam_channel::unbounded::<Query>();
    let (report_sender, report_receiver) = crossbeam_channel::unbounded();

    for query in queries {
        let _ = query_sender.send(query);
    }
    drop(query_sender);

    thread::scope(|s| {
        for worker_id in 0..num_workers.get() {
            let query_receiver = query_receiver.clone();
            let report_sender = report_sender.clone();

            s.spawn(move || {
                while let Ok(query) = query_receiver.recv() {
                    let report = solve_query(graph, query, timeout, validate);
                    if report_sender.send((query, report)).is_err() {
                        break; // Receiver gone => nobody cares about further results
                    }
                }
                trace!("Worker {} is out of queries", worker_id);
            });
        }
        drop(report_sender);

        for (query, report) in report_receiver.iter() {
            on_report(query, report);
        }
    });
}
