use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

use log::{debug, trace};

use crate::{
    error::SearchError,
    graph::{AStarGraph, WeightedEdge},
    min_pq::IndexedMinPQ,
    outcome::SolverOutcome,
    utils::human_duration,
};

/// Read access to the result of a single-source, single-target shortest path search.
pub trait ShortestPathsSolver<V> {
    fn outcome(&self) -> SolverOutcome;
    /// Vertices from start to goal. Empty unless the search was solved.
    fn solution(&self) -> &[V];
    /// Total weight of [`solution`](Self::solution). Zero unless the search was solved.
    fn solution_weight(&self) -> f64;
    /// Number of vertices dequeued from the frontier.
    fn num_states_explored(&self) -> usize;
    fn exploration_time(&self) -> Duration;
}

/// Result of one A* search. The search runs to completion inside [`AStarSolver::new`].
#[derive(Debug, Clone)]
pub struct AStarSolver<V> {
    outcome: SolverOutcome,
    solution: Vec<V>,
    solution_weight: f64,
    num_states_explored: usize,
    exploration_time: Duration,
}

impl<V: Hash + Eq + Clone> AStarSolver<V> {
    /// Searches `graph` for a shortest path from `start` to `goal`.
    ///
    /// The timeout is a soft deadline: it is polled once per expanded vertex, so a search may
    /// overrun it by one expansion. Running out of time is reported as [`SolverOutcome::Timeout`].
    pub fn new<G: AStarGraph<V>>(
        graph: &G,
        start: V,
        goal: V,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let stopwatch = Instant::now();

        if start == goal {
            return Ok(AStarSolver {
                outcome: SolverOutcome::Solved,
                solution: vec![start],
                solution_weight: 0.0,
                num_states_explored: 0,
                exploration_time: stopwatch.elapsed(),
            });
        }

        trace!("Starting A* search with a timeout of {}", human_duration(timeout));
        let mut search = Search::new(graph, &goal);
        let stop = search.run(start.clone(), timeout, stopwatch)?;

        let solver = match stop {
            Stop::ReachedGoal => AStarSolver {
                outcome: SolverOutcome::Solved,
                solution_weight: search.dist_to.get(&goal).copied().unwrap_or(0.0),
                solution: search.path_to(&start, goal.clone()),
                num_states_explored: search.num_explored,
                exploration_time: stopwatch.elapsed(),
            },
            Stop::Exhausted | Stop::OutOfTime => AStarSolver {
                outcome: if stop == Stop::OutOfTime {
                    SolverOutcome::Timeout
                } else {
                    SolverOutcome::Unsolvable
                },
                solution: Vec::new(),
                solution_weight: 0.0,
                num_states_explored: search.num_explored,
                exploration_time: stopwatch.elapsed(),
            },
        };

        debug!(
            "{} after exploring {} states in {}",
            solver.outcome,
            solver.num_states_explored,
            human_duration(solver.exploration_time)
        );
        Ok(solver)
    }

    pub fn into_solution(self) -> Vec<V> {
        self.solution
    }
}

impl<V> ShortestPathsSolver<V> for AStarSolver<V> {
    fn outcome(&self) -> SolverOutcome {
        self.outcome
    }

    fn solution(&self) -> &[V] {
        &self.solution
    }

    fn solution_weight(&self) -> f64 {
        self.solution_weight
    }

    fn num_states_explored(&self) -> usize {
        self.num_states_explored
    }

    fn exploration_time(&self) -> Duration {
        self.exploration_time
    }
}

/// Why the main loop of a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    ReachedGoal,
    Exhausted,
    OutOfTime,
}

/// Working state of a single search. Dropped once the result is extracted.
struct Search<'g, 'v, V, G> {
    graph: &'g G,
    goal: &'v V,
    /// Best known cost from the start. Absent => not reached yet.
    dist_to: HashMap<V, f64>,
    /// Predecessor on the best known path.
    edge_to: HashMap<V, V>,
    /// Reached but not yet expanded vertices, keyed by cost + estimate.
    frontier: IndexedMinPQ<V>,
    num_explored: usize,
}

impl<'g, 'v, V: Hash + Eq + Clone, G: AStarGraph<V>> Search<'g, 'v, V, G> {
    fn new(graph: &'g G, goal: &'v V) -> Self {
        Search {
            graph,
            goal,
            dist_to: HashMap::new(),
            edge_to: HashMap::new(),
            frontier: IndexedMinPQ::new(),
            num_explored: 0,
        }
    }

    fn run(
        &mut self,
        start: V,
        timeout: Duration,
        stopwatch: Instant,
    ) -> Result<Stop, SearchError> {
        self.dist_to.insert(start.clone(), 0.0);
        self.frontier.add(start, 0.0)?;

        loop {
            if stopwatch.elapsed() >= timeout {
                return Ok(Stop::OutOfTime);
            }
            if self.frontier.is_empty() {
                return Ok(Stop::Exhausted);
            }

            let v = self.frontier.remove_smallest()?;
            self.num_explored += 1;
            if v == *self.goal {
                return Ok(Stop::ReachedGoal);
            }

            let v_dist = self.dist_to.get(&v).copied().unwrap_or(0.0);
            for edge in self.graph.neighbors(&v) {
                self.relax(&v, v_dist, &edge)?;
            }
        }
    }

    /// Records `edge` as the best way to reach its target if it improves the known cost.
    fn relax(&mut self, v: &V, v_dist: f64, edge: &WeightedEdge<V>) -> Result<(), SearchError> {
        debug_assert!(edge.from() == v, "neighbors() returned an edge of another vertex");

        let weight = edge.weight();
        if weight.is_nan() || weight < 0.0 {
            return Err(SearchError::InvalidEdgeWeight { weight });
        }

        let q = edge.to();
        let candidate = v_dist + weight;
        if self.dist_to.get(q).is_some_and(|&known| candidate >= known) {
            return Ok(());
        }

        // NaN has no place in the frontier order
        let estimate = self.graph.estimated_distance_to_goal(q, self.goal);
        if estimate.is_nan() {
            return Err(SearchError::InvalidHeuristic { estimate });
        }

        self.dist_to.insert(q.clone(), candidate);
        self.edge_to.insert(q.clone(), v.clone());

        let priority = candidate + estimate;
        if self.frontier.contains(q) {
            self.frontier.change_priority(q, priority)?;
        } else {
            self.frontier.add(q.clone(), priority)?;
        }
        Ok(())
    }

    /// Walks the predecessor chain back from `goal` and returns the path in travel order.
    fn path_to(&self, start: &V, goal: V) -> Vec<V> {
        let mut path = vec![goal.clone()];
        let mut current = goal;
        while current != *start {
            match self.edge_to.get(&current) {
                Some(prev) => {
                    path.push(prev.clone());
                    current = prev.clone();
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}
