//! Single-pass shortest path over the station graph.
//!
//! Every hop goes from a lower to a higher station number, so visiting
//! stations in ascending order is a topological order: a station's distance
//! is final before any of its hops are relaxed. One linear pass over
//! stations and hops is enough, with no priority queue.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::domain::{LineId, Station};
use crate::network::{Edge, Graph};

use super::config::SolveConfig;
use super::route::Route;
use super::switches::{cheapest_assignment, constrained_route};

/// Error from a shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The destination has no entry in the graph
    #[error("station {0} is not in the graph")]
    UnknownStation(Station),

    /// Relaxation finished without reaching the destination
    #[error("destination {destination} is unreachable from {origin}")]
    UnreachableDestination {
        origin: Station,
        destination: Station,
    },

    /// The destination is reachable, but not within the switch limit
    #[error(
        "no route within {max_switches} switches (the cheapest route needs {min_cost_switches})"
    )]
    SwitchConstraintUnsatisfiable {
        max_switches: usize,
        min_cost_switches: usize,
    },

    /// A route cost does not fit in 64 bits
    #[error("route cost overflows")]
    CostOverflow,
}

/// Minimum known cost from the origin to each reached station.
pub(super) type DistanceTable = HashMap<Station, u64>;

/// The station each reached station's best cost was set from.
pub(super) type PredecessorTable = HashMap<Station, Station>;

/// Tables produced by one relaxation pass.
pub(super) struct Relaxation {
    pub distances: DistanceTable,
    pub predecessors: PredecessorTable,
}

/// Relax every hop once, visiting stations in ascending order.
pub(super) fn relax(graph: &Graph, origin: Station) -> Result<Relaxation, SolveError> {
    if !graph.is_monotone() {
        warn!("graph has hops to lower-numbered stations; the result may not be minimal");
    }

    let mut distances = DistanceTable::from([(origin, 0)]);
    let mut predecessors = PredecessorTable::new();

    for station in graph.stations() {
        // Stations not yet reached cannot lie on a path from the origin.
        let Some(&base) = distances.get(&station) else {
            continue;
        };

        for (next, edge) in graph.neighbors(station) {
            let candidate = base
                .checked_add(edge.cost())
                .ok_or(SolveError::CostOverflow)?;
            if distances.get(&next).is_none_or(|&known| candidate < known) {
                trace!(from = %station, to = %next, cost = candidate, "Relaxed");
                distances.insert(next, candidate);
                predecessors.insert(next, station);
            }
        }
    }

    Ok(Relaxation {
        distances,
        predecessors,
    })
}

fn check_destination(graph: &Graph, destination: Station) -> Result<(), SolveError> {
    if graph.contains(destination) {
        Ok(())
    } else {
        Err(SolveError::UnknownStation(destination))
    }
}

/// Minimum cost from `origin` to `destination`.
///
/// # Examples
///
/// ```
/// use line_planner::domain::{Line, Station};
/// use line_planner::network::Graph;
/// use line_planner::planner::shortest_path;
///
/// let s = Station::new;
/// let lines = [
///     Line::new(vec![s(0), s(1), s(3)], vec![2, 4]).unwrap(),
///     Line::new(vec![s(1), s(2), s(3)], vec![1, 1]).unwrap(),
/// ];
/// let graph = Graph::from_lines(s(3), &lines);
/// assert_eq!(shortest_path(&graph, s(0), s(3)), Ok(4));
/// ```
pub fn shortest_path(
    graph: &Graph,
    origin: Station,
    destination: Station,
) -> Result<u64, SolveError> {
    if origin == destination {
        return Ok(0);
    }
    check_destination(graph, destination)?;
    let relaxation = relax(graph, origin)?;

    relaxation
        .distances
        .get(&destination)
        .copied()
        .ok_or(SolveError::UnreachableDestination {
            origin,
            destination,
        })
}

/// Minimum-cost route from `origin` to `destination`, with any number of
/// switches.
///
/// The path is rebuilt from the predecessor table. Where several lines
/// offer a hop at its cheapest cost, lines are chosen to minimise switches.
pub fn shortest_route(
    graph: &Graph,
    origin: Station,
    destination: Station,
) -> Result<Route, SolveError> {
    if origin == destination {
        return Ok(Route::stay(origin));
    }
    check_destination(graph, destination)?;

    let relaxation = relax(graph, origin)?;
    let unreachable = SolveError::UnreachableDestination {
        origin,
        destination,
    };
    if !relaxation.distances.contains_key(&destination) {
        return Err(unreachable);
    }

    let path = reconstruct(&relaxation.predecessors, origin, destination)
        .ok_or_else(|| unreachable.clone())?;
    let edges: Vec<&Edge> = path
        .windows(2)
        .map(|pair| graph.edge(pair[0], pair[1]))
        .collect::<Option<_>>()
        .ok_or(unreachable)?;

    let lines = cheapest_assignment(&edges);
    let hops: Vec<(Station, Station, LineId, u64)> = path
        .windows(2)
        .zip(edges.iter().zip(lines))
        .map(|(pair, (edge, line))| (pair[0], pair[1], line, edge.cost()))
        .collect();

    let route = Route::from_hops(origin, &hops);
    debug!(
        cost = route.cost,
        stations = route.stations.len(),
        switches = route.switches(),
        "Found cheapest route"
    );
    Ok(route)
}

/// Cheapest route that changes line at most `max_switches` times.
///
/// The unconstrained cheapest route is tried first. When it needs too many
/// switches, a line-aware pass finds the cheapest route that fits the limit,
/// preferring fewer switches among routes of equal cost.
pub fn shortest_path_with_constraint(
    graph: &Graph,
    origin: Station,
    destination: Station,
    max_switches: usize,
) -> Result<Route, SolveError> {
    let cheapest = shortest_route(graph, origin, destination)?;
    if cheapest.switches() <= max_switches {
        return Ok(cheapest);
    }

    debug!(
        switches = cheapest.switches(),
        max_switches, "Cheapest route exceeds switch limit, searching with limit"
    );

    if let Some(route) = constrained_route(graph, origin, destination, max_switches)? {
        return Ok(route);
    }

    // Another route of the same cost may need fewer switches than the one
    // the predecessor table kept.
    let min_cost_switches = constrained_route(graph, origin, destination, cheapest.switches())?
        .map_or(cheapest.switches(), |route| route.switches());
    Err(SolveError::SwitchConstraintUnsatisfiable {
        max_switches,
        min_cost_switches,
    })
}

/// Walk predecessors back from `destination` to `origin`.
///
/// Returns stations in travel order, or `None` if the chain breaks.
fn reconstruct(
    predecessors: &PredecessorTable,
    origin: Station,
    destination: Station,
) -> Option<Vec<Station>> {
    let mut path = vec![destination];
    let mut current = destination;
    while current != origin {
        current = *predecessors.get(&current)?;
        path.push(current);
        if path.len() > predecessors.len() + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

/// Shortest-path planner over a frozen graph.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a SolveConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a SolveConfig) -> Self {
        Self { graph, config }
    }

    /// Minimum cost, ignoring the switch limit.
    pub fn cost(&self) -> Result<u64, SolveError> {
        shortest_path(self.graph, self.config.origin, self.config.destination)
    }

    /// Cheapest route, honouring the switch limit when one is set.
    pub fn plan(&self) -> Result<Route, SolveError> {
        let SolveConfig {
            origin,
            destination,
            max_switches,
        } = *self.config;

        match max_switches {
            Some(limit) => shortest_path_with_constraint(self.graph, origin, destination, limit),
            None => shortest_route(self.graph, origin, destination),
        }
    }
}

#[cfg(test)]
#[path = "solve_tests.rs"]
mod tests;
