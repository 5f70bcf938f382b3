//! Exact brute-force solver for small multi-stop trip plans.
//!
//! Evaluates every ordering of the intermediate waypoints between the fixed
//! start and end, pricing legs through a
//! [`DistanceOracle`](stopover_core::DistanceOracle). The search is an exact
//! optimum by design: with the selection capped at seven points there are at
//! most 120 orderings and 720 legs to price, and deduplication cuts the
//! distinct oracle queries to at most 30.

pub mod permute;
pub mod solver;

pub use permute::Permutations;
pub use solver::BruteForceSolver;
