use std::fmt;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverOutcome {
    /// The goal was reached.
    Solved,
    /// Every reachable vertex was explored without reaching the goal.
    Unsolvable,
    /// The time budget ran out before the goal was reached.
    Timeout,
}

impl SolverOutcome {
    #[inline]
    pub fn is_solved(self) -> bool {
        self == SolverOutcome::Solved
    }
}

impl fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverOutcome::Solved => write!(f, "SOLVED"),
            SolverOutcome::Unsolvable => write!(f, "UNSOLVABLE"),
            SolverOutcome::Timeout => write!(f, "TIMEOUT"),
        }
    }
}
