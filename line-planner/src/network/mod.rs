//! Station graph built from overlapping train lines.
//!
//! Lines are merged into a single directed graph keyed by station. Where
//! lines share a hop, the cheapest cost wins.

mod builder;
mod graph;

pub use builder::GraphBuilder;
pub use graph::{Edge, EdgeOffer, Graph};
