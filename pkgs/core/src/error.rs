use thiserror::Error;

/// Misuse of an [`IndexedMinPQ`](crate::min_pq::IndexedMinPQ).
/// The queue is left untouched whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PqError {
    #[error("item is already in the priority queue")]
    DuplicateItem,
    #[error("priority queue is empty")]
    Empty,
    #[error("item is not in the priority queue")]
    NoSuchItem,
    #[error("priority {0} is not comparable")]
    InvalidPriority(f64),
}

/// Errors surfaced while constructing an [`AStarSolver`](crate::solver::AStarSolver).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SearchError {
    #[error("edge weight {weight} is negative or NaN")]
    InvalidEdgeWeight { weight: f64 },
    #[error("heuristic estimate {estimate} is NaN")]
    InvalidHeuristic { estimate: f64 },
    #[error(transparent)]
    Queue(#[from] PqError),
}
