//! The branch-and-bound search core and its public entry points.
pub(crate) mod config;
pub(crate) mod bounds;
pub(crate) mod solver;
pub(crate) mod statistics;
pub(crate) mod solve;

pub use config::SearchConfig;
pub use solver::Solver;
pub use statistics::SearchStatistics;
pub use solve::{predict, solve, solve_clusters, solve_weighted};
