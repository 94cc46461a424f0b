//! Planned routes.

use std::fmt;

use serde::Serialize;

use crate::domain::{LineId, Station};

/// A continuous stretch of a route spent on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ride {
    pub line: LineId,
    pub board: Station,
    pub alight: Station,
    pub cost: u64,
}

/// A route from origin to destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Total cost of the route.
    pub cost: u64,

    /// Stations visited, origin first and destination last.
    pub stations: Vec<Station>,

    /// Rides in travel order. Empty when origin and destination coincide.
    pub rides: Vec<Ride>,
}

impl Route {
    /// The route of a traveller who is already at the destination.
    pub fn stay(station: Station) -> Self {
        Self {
            cost: 0,
            stations: vec![station],
            rides: Vec::new(),
        }
    }

    /// Build a route from hops `(from, to, line, cost)` in travel order.
    ///
    /// Consecutive hops on the same line are joined into a single ride.
    pub(super) fn from_hops(origin: Station, hops: &[(Station, Station, LineId, u64)]) -> Self {
        let mut stations = vec![origin];
        let mut rides: Vec<Ride> = Vec::new();
        let mut cost = 0u64;

        for &(from, to, line, hop_cost) in hops {
            stations.push(to);
            cost = cost.saturating_add(hop_cost);
            match rides.last_mut() {
                Some(ride) if ride.line == line => {
                    ride.alight = to;
                    ride.cost = ride.cost.saturating_add(hop_cost);
                }
                _ => rides.push(Ride {
                    line,
                    board: from,
                    alight: to,
                    cost: hop_cost,
                }),
            }
        }

        Self {
            cost,
            stations,
            rides,
        }
    }

    /// Number of line changes along the route.
    pub fn switches(&self) -> usize {
        self.rides.len().saturating_sub(1)
    }

    /// Stations where the traveller changes line.
    pub fn switch_stations(&self) -> impl Iterator<Item = Station> + '_ {
        self.rides.iter().skip(1).map(|ride| ride.board)
    }

    /// First station of the route.
    pub fn origin(&self) -> Option<Station> {
        self.stations.first().copied()
    }

    /// Last station of the route.
    pub fn destination(&self) -> Option<Station> {
        self.stations.last().copied()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cost: {}", self.cost)?;
        let path: Vec<String> = self.stations.iter().map(Station::to_string).collect();
        writeln!(f, "path: {}", path.join(" -> "))?;
        for ride in &self.rides {
            writeln!(
                f,
                "  {} {} -> {} ({})",
                ride.line, ride.board, ride.alight, ride.cost
            )?;
        }
        write!(f, "switches: {}", self.switches())
    }
}
