/// A directed edge with a non-negative weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEdge<V> {
    from: V,
    to: V,
    weight: f64,
}

impl<V> WeightedEdge<V> {
    pub fn new(from: V, to: V, weight: f64) -> Self {
        WeightedEdge { from, to, weight }
    }

    #[inline]
    pub fn from(&self) -> &V {
        &self.from
    }

    #[inline]
    pub fn to(&self) -> &V {
        &self.to
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// The capability an A* search needs from a graph.
pub trait AStarGraph<V> {
    /// All outgoing edges of `v`.
    fn neighbors(&self, v: &V) -> Vec<WeightedEdge<V>>;

    /// Estimated remaining cost from `v` to `goal`.
    ///
    /// Must never overestimate the true cost for the search to return shortest paths.
    /// This is not checked.
    fn estimated_distance_to_goal(&self, v: &V, goal: &V) -> f64;
}

impl<V, G: AStarGraph<V> + ?Sized> AStarGraph<V> for &G {
    fn neighbors(&self, v: &V) -> Vec<WeightedEdge<V>> {
        (**self).neighbors(v)
    }

    fn estimated_distance_to_goal(&self, v: &V, goal: &V) -> f64 {
        (**self).estimated_distance_to_goal(v, goal)
    }
}

/// Wraps a graph and replaces its heuristic with a constant zero.
/// Searching through it degrades A* to Dijkstra's algorithm.
#[derive(Debug, Clone, Copy)]
pub struct ZeroHeuristic<G>(pub G);

impl<V, G: AStarGraph<V>> AStarGraph<V> for ZeroHeuristic<G> {
    fn neighbors(&self, v: &V) -> Vec<WeightedEdge<V>> {
        self.0.neighbors(v)
    }

    fn estimated_distance_to_goal(&self, _v: &V, _goal: &V) -> f64 {
        0.0
    }
}
