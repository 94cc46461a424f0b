//! Multi-line transit planner.
//!
//! Merges train lines into one station graph and answers: "what is the
//! cheapest way from station 0 to the destination, optionally with a limit
//! on how many times I change line?"

pub mod domain;
pub mod input;
pub mod network;
pub mod planner;
