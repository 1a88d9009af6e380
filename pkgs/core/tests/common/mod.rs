use std::{collections::HashMap, hash::Hash};

use astar_core::{AStarGraph, WeightedEdge};

/// Adjacency list graph with an optional per-vertex heuristic table. Test use only.
pub struct AdjacencyGraph<V> {
    edges: HashMap<V, Vec<WeightedEdge<V>>>,
    estimates: HashMap<V, f64>,
}

impl<V: Hash + Eq + Clone> AdjacencyGraph<V> {
    pub fn new() -> Self {
        AdjacencyGraph {
            edges: HashMap::new(),
            estimates: HashMap::new(),
        }
    }

    pub fn edge(mut self, from: V, to: V, weight: f64) -> Self {
        self.edges
            .entry(from.clone())
            .or_default()
            .push(WeightedEdge::new(from, to, weight));
        self
    }

    /// Heuristic value of `v` towards whichever goal is searched.
    pub fn estimate(mut self, v: V, estimate: f64) -> Self {
        self.estimates.insert(v, estimate);
        self
    }

    pub fn weight_of(&self, from: &V, to: &V) -> Option<f64> {
        self.edges
            .get(from)?
            .iter()
            .filter(|e| e.to() == to)
            .map(|e| e.weight())
            .reduce(f64::min)
    }
}

impl<V: Hash + Eq + Clone> AStarGraph<V> for AdjacencyGraph<V> {
    fn neighbors(&self, v: &V) -> Vec<WeightedEdge<V>> {
        self.edges.get(v).cloned().unwrap_or_default()
    }

    fn estimated_distance_to_goal(&self, v: &V, _goal: &V) -> f64 {
        self.estimates.get(v).copied().unwrap_or(0.0)
    }
}

/// Random digraph on `0..num_vertices` with integral weights in `1..=10`.
pub fn random_graph(
    num_vertices: u32,
    num_edges: usize,
    rng: &mut fastrand::Rng,
) -> AdjacencyGraph<u32> {
    let mut graph = AdjacencyGraph::new();
    for _ in 0..num_edges {
        let from = rng.u32(0..num_vertices);
        let to = rng.u32(0..num_vertices);
        graph = graph.edge(from, to, rng.u32(1..=10) as f64);
    }
    graph
}
