//! Shortest-path planner.
//!
//! Answers: "what is the cheapest way from the origin to the destination?"
//! The plain search is a single pass over stations in ascending order. The
//! extended search also rebuilds the route and can cap the number of line
//! switches.

mod config;
mod route;
mod search;
mod switches;

pub use config::SolveConfig;
pub use route::{Ride, Route};
pub use search::{
    Planner, SolveError, shortest_path, shortest_path_with_constraint, shortest_route,
};
