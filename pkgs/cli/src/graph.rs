use astar_core::{AStarGraph, WeightedEdge};
use fastrand::Rng;
use itertools::Itertools;

/// Identifier for a vertex that is unique within a graph.
pub type VertexId = usize;

/// Random digraph with vertices scattered over the unit square.
/// Every edge weighs at least the Euclidean distance between its endpoints,
/// so the straight-line distance is an admissible heuristic.
#[derive(Debug, Clone)]
pub struct RandomGeometricGraph {
    points: Vec<(f64, f64)>,
    /// Outgoing edges of each vertex as `(to, weight)`.
    adjacency: Vec<Vec<(VertexId, f64)>>,
}

impl RandomGeometricGraph {
    /// Generates a graph where every vertex has `degree` outgoing edges to other random vertices.
    pub fn generate(num_vertices: usize, degree: usize, rng: &mut Rng) -> Self {
        let points: Vec<(f64, f64)> = (0..num_vertices).map(|_| (rng.f64(), rng.f64())).collect();

        let mut adjacency = vec![Vec::with_capacity(degree); num_vertices];
        if num_vertices > 1 {
            for (from, edges) in adjacency.iter_mut().enumerate() {
                for _ in 0..degree {
                    // Pick any vertex but `from` itself
                    let mut to = rng.usize(0..num_vertices - 1);
                    if to >= from {
                        to += 1;
                    }
                    let slack = 1.0 + rng.f64();
                    edges.push((to, Self::distance(points[from], points[to]) * slack));
                }
            }
        }

        RandomGeometricGraph { points, adjacency }
    }

    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Weight of the cheapest edge `from -> to`, if one exists.
    pub fn weight_of(&self, from: VertexId, to: VertexId) -> Option<f64> {
        self.adjacency
            .get(from)?
            .iter()
            .filter(|&&(target, _)| target == to)
            .map(|&(_, weight)| weight)
            .reduce(f64::min)
    }

    /// Verifies that `path` leads from `start` to `goal` along existing edges and weighs `weight`.
    pub fn verify_solution(
        &self,
        start: VertexId,
        goal: VertexId,
        path: &[VertexId],
        weight: f64,
    ) -> Result<(), String> {
        match (path.first(), path.last()) {
            (Some(&first), Some(&last)) if first == start && last == goal => {}
            _ => {
                return Err(format!(
                    "Path does not lead from {} to {}: {:?}",
                    start, goal, path
                ));
            }
        }

        let mut path_weight = 0.0;
        for (from, to) in path.iter().copied().tuple_windows() {
            path_weight += self
                .weight_of(from, to)
                .ok_or_else(|| format!("Path uses missing edge {} -> {}", from, to))?;
        }

        if !weights_match(path_weight, weight) {
            return Err(format!(
                "Path weighs {} but the reported weight is {}",
                path_weight, weight
            ));
        }
        Ok(())
    }

    #[inline]
    fn distance((ax, ay): (f64, f64), (bx, by): (f64, f64)) -> f64 {
        (ax - bx).hypot(ay - by)
    }
}

impl AStarGraph<VertexId> for RandomGeometricGraph {
    fn neighbors(&self, v: &VertexId) -> Vec<WeightedEdge<VertexId>> {
        self.adjacency[*v]
            .iter()
            .map(|&(to, weight)| WeightedEdge::new(*v, to, weight))
            .collect()
    }

    fn estimated_distance_to_goal(&self, v: &VertexId, goal: &VertexId) -> f64 {
        Self::distance(self.points[*v], self.points[*goal])
    }
}

/// Compares two path weights with a relative tolerance for rounding.
pub fn weights_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
