//! Analysis modules.
//!
//! The aggregation pass that turns complaint rows into a count table.

pub mod aggregator;

pub use aggregator::*;
