//! Line assignment and switch-limited search.
//!
//! A switch is riding two consecutive hops of a route on different lines.
//! The first boarding is free. Switches can only happen at stations served
//! by more than one line.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{LineId, Station};
use crate::network::{Edge, Graph};

use super::route::Route;
use super::search::SolveError;

/// Pick a line for every hop of a path, using only lines that offer each hop
/// at its cheapest cost, so that the number of switches is minimal.
///
/// Ties go to the lowest line id.
pub(super) fn cheapest_assignment(edges: &[&Edge]) -> Vec<LineId> {
    // layers[i][j] = (line, switches so far, index into layers[i - 1])
    let mut layers: Vec<Vec<(LineId, usize, usize)>> = Vec::with_capacity(edges.len());

    for edge in edges {
        let layer: Vec<(LineId, usize, usize)> = edge
            .cheapest_lines()
            .map(|line| match layers.last() {
                None => (line, 0, 0),
                Some(prev) => prev
                    .iter()
                    .enumerate()
                    .map(|(j, &(p, switches, _))| (line, switches + usize::from(p != line), j))
                    .min_by_key(|&(_, switches, _)| switches)
                    .unwrap_or((line, 0, 0)),
            })
            .collect();
        layers.push(layer);
    }

    let mut lines = Vec::with_capacity(edges.len());
    let Some(mut idx) = layers.last().and_then(|last| {
        last.iter()
            .enumerate()
            .min_by_key(|(_, entry)| entry.1)
            .map(|(j, _)| j)
    }) else {
        return lines;
    };

    for layer in layers.iter().rev() {
        let (line, _, parent) = layer[idx];
        lines.push(line);
        idx = parent;
    }
    lines.reverse();
    lines
}

/// Label identity: the line the traveller is on and switches used so far.
///
/// Ordering keeps all labels of one line together, by increasing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct LabelKey {
    line: Option<LineId>,
    switches: usize,
}

#[derive(Debug, Clone, Copy)]
struct Label {
    cost: u64,
    parent: Option<(Station, LabelKey)>,
    hop_cost: u64,
}

/// Cheapest route with at most `max_switches` switches.
///
/// Same ascending-station pass as the plain search, but over labels
/// `(station, line, switches)` and over every line's offer rather than the
/// merged cost, so a pricier hop that avoids a switch can be chosen. A label
/// is dropped when a label on the same line with no more switches is already
/// at least as cheap.
///
/// Returns `Ok(None)` when no route fits the limit.
pub(super) fn constrained_route(
    graph: &Graph,
    origin: Station,
    destination: Station,
    max_switches: usize,
) -> Result<Option<Route>, SolveError> {
    if origin == destination {
        return Ok(Some(Route::stay(origin)));
    }

    let start = LabelKey {
        line: None,
        switches: 0,
    };
    let mut labels: HashMap<Station, BTreeMap<LabelKey, Label>> = HashMap::new();
    labels.entry(origin).or_default().insert(
        start,
        Label {
            cost: 0,
            parent: None,
            hop_cost: 0,
        },
    );

    let mut relaxed = 0usize;
    for station in graph.stations() {
        let current: Vec<(LabelKey, u64)> = match labels.get(&station) {
            Some(at) => at.iter().map(|(key, label)| (*key, label.cost)).collect(),
            None => continue,
        };

        for (next, edge) in graph.neighbors(station) {
            for offer in edge.offers() {
                for &(key, cost) in &current {
                    let switches = match key.line {
                        None => 0,
                        Some(line) if line == offer.line => key.switches,
                        Some(_) => key.switches + 1,
                    };
                    if switches > max_switches {
                        continue;
                    }

                    let candidate = cost
                        .checked_add(offer.cost)
                        .ok_or(SolveError::CostOverflow)?;
                    let next_key = LabelKey {
                        line: Some(offer.line),
                        switches,
                    };
                    let first_of_line = LabelKey {
                        line: Some(offer.line),
                        switches: 0,
                    };

                    let slot = labels.entry(next).or_default();
                    let dominated = slot
                        .range(first_of_line..=next_key)
                        .any(|(_, label)| label.cost <= candidate);
                    if dominated {
                        continue;
                    }

                    slot.insert(
                        next_key,
                        Label {
                            cost: candidate,
                            parent: Some((station, key)),
                            hop_cost: offer.cost,
                        },
                    );
                    relaxed += 1;
                }
            }
        }
    }

    debug!(labels = relaxed, max_switches, "Switch-limited pass complete");

    let Some((&best_key, _)) = labels.get(&destination).and_then(|at| {
        at.iter()
            .filter(|(key, _)| key.line.is_some())
            .min_by_key(|(key, label)| (label.cost, key.switches, key.line))
    }) else {
        return Ok(None);
    };

    let mut hops = Vec::new();
    let (mut station, mut key) = (destination, best_key);
    while let Some(label) = labels.get(&station).and_then(|at| at.get(&key)) {
        let (Some((prev_station, prev_key)), Some(line)) = (label.parent, key.line) else {
            break;
        };
        hops.push((prev_station, station, line, label.hop_cost));
        station = prev_station;
        key = prev_key;
        if hops.len() > graph.edge_count() {
            return Ok(None);
        }
    }

    if station != origin {
        return Ok(None);
    }
    hops.reverse();
    Ok(Some(Route::from_hops(origin, &hops)))
}
