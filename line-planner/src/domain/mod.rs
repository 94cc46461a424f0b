//! Domain types for the line planner.
//!
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod error;
mod line;
mod station;

pub use error::DomainError;
pub use line::{Line, LineId, Segment};
pub use station::{InvalidStation, Station};
