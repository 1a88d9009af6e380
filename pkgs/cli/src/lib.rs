pub mod cli;
pub mod graph;
pub mod pool;
