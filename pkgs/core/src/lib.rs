//! Goal-directed shortest path search (A*) on top of an indexed min-priority queue.

pub mod error;
pub mod graph;
pub mod min_pq;
pub mod outcome;
pub mod solver;
pub mod utils;

pub use error::{PqError, SearchError};
pub use graph::{AStarGraph, WeightedEdge, ZeroHeuristic};
pub use min_pq::IndexedMinPQ;
pub use outcome::SolverOutcome;
pub use solver::{AStarSolver, ShortestPathsSolver};
