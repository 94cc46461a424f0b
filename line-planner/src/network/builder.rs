//! Incremental graph construction.
//!
//! Lines are merged one segment at a time. When two lines offer the same
//! hop, the cheaper cost becomes the hop's cost, but every line's offer is
//! kept so a constrained search can still ride a specific line.

use std::collections::btree_map::Entry;
use std::collections::hash_map::Entry as HashEntry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::trace;

use crate::domain::{Line, LineId, Station};

use super::graph::{Edge, Graph};

/// Builder that accumulates edges into a merged [`Graph`].
///
/// The builder is monotone: edges are only ever added or made cheaper,
/// never removed. Conflicting costs are resolved by keeping the minimum,
/// which is not an error.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    destination: Station,
    adjacency: BTreeMap<Station, BTreeMap<Station, Edge>>,
    /// First line seen at each station.
    served_by: HashMap<Station, LineId>,
    switching_points: BTreeSet<Station>,
    line_count: usize,
}

impl GraphBuilder {
    /// Create a builder for journeys ending at `destination`.
    ///
    /// The destination always has an adjacency entry, even if no line
    /// leaves it.
    pub fn new(destination: Station) -> Self {
        let mut adjacency = BTreeMap::new();
        adjacency.insert(destination, BTreeMap::new());
        Self {
            destination,
            adjacency,
            served_by: HashMap::new(),
            switching_points: BTreeSet::new(),
            line_count: 0,
        }
    }

    /// Insert or update one directed edge.
    ///
    /// The edge is treated as a one-segment line of its own, so a path that
    /// rides two edges added this way counts as switching between them.
    pub fn add_edge(&mut self, from: Station, to: Station, cost: u64) {
        let line = self.next_line();
        self.merge(line, from, to, cost);
    }

    /// Add every segment of a line and return the id assigned to it.
    pub fn add_line(&mut self, line: &Line) -> LineId {
        let id = self.next_line();
        for &stop in line.stops() {
            self.serve(stop, id);
        }
        for segment in line.segments() {
            self.merge(id, segment.from, segment.to, segment.cost);
        }
        trace!(
            line = %id,
            stops = line.stops().len(),
            total_cost = line.total_cost(),
            "Added line"
        );
        id
    }

    /// Add several lines in order.
    pub fn add_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a Line>) -> Vec<LineId> {
        lines.into_iter().map(|line| self.add_line(line)).collect()
    }

    /// Freeze the graph.
    pub fn build(self) -> Graph {
        Graph::from_parts(
            self.destination,
            self.adjacency,
            self.switching_points,
            self.line_count,
        )
    }

    fn next_line(&mut self) -> LineId {
        let id = LineId(self.line_count);
        self.line_count += 1;
        id
    }

    /// Record that `line` serves `station`; a second distinct line makes it
    /// a switching point.
    fn serve(&mut self, station: Station, line: LineId) {
        match self.served_by.entry(station) {
            HashEntry::Vacant(v) => {
                v.insert(line);
            }
            HashEntry::Occupied(o) => {
                if *o.get() != line {
                    self.switching_points.insert(station);
                }
            }
        }
    }

    /// Insert-if-missing, else min-merge.
    fn merge(&mut self, line: LineId, from: Station, to: Station, cost: u64) {
        self.serve(from, line);
        self.serve(to, line);

        let neighbors = self.adjacency.entry(from).or_default();
        match neighbors.entry(to) {
            Entry::Vacant(v) => {
                v.insert(Edge::new(line, cost));
            }
            Entry::Occupied(mut o) => {
                let edge = o.get_mut();
                let previous = edge.cost();
                edge.offer(line, cost);
                trace!(
                    %from,
                    %to,
                    %line,
                    offered = cost,
                    previous,
                    kept = edge.cost(),
                    "Merged duplicate edge"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(id: u32) -> Station {
        Station::new(id)
    }

    fn line(stops: &[u32], costs: &[u64]) -> Line {
        Line::new(stops.iter().copied().map(Station::new).collect(), costs.to_vec()).unwrap()
    }

    #[test]
    fn destination_always_present() {
        let graph = GraphBuilder::new(st(7)).build();
        assert!(graph.contains(st(7)));
        assert_eq!(graph.neighbors(st(7)).count(), 0);
        assert_eq!(graph.station_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn first_edge_creates_entry() {
        let mut builder = GraphBuilder::new(st(3));
        builder.add_edge(st(0), st(1), 2);
        let graph = builder.build();
        assert_eq!(graph.cost(st(0), st(1)), Some(2));
    }

    #[test]
    fn new_neighbor_is_added() {
        let mut builder = GraphBuilder::new(st(3));
        builder.add_edge(st(1), st(3), 4);
        builder.add_edge(st(1), st(2), 1);
        let graph = builder.build();
        assert_eq!(graph.cost(st(1), st(3)), Some(4));
        assert_eq!(graph.cost(st(1), st(2)), Some(1));
        assert_eq!(graph.neighbors(st(1)).count(), 2);
    }

    #[test]
    fn higher_cost_never_overwrites() {
        let mut builder = GraphBuilder::new(st(3));
        builder.add_edge(st(0), st(1), 2);
        builder.add_edge(st(0), st(1), 9);
        assert_eq!(builder.build().cost(st(0), st(1)), Some(2));
    }

    #[test]
    fn lower_cost_replaces() {
        let mut builder = GraphBuilder::new(st(3));
        builder.add_edge(st(0), st(1), 9);
        builder.add_edge(st(0), st(1), 2);
        assert_eq!(builder.build().cost(st(0), st(1)), Some(2));
    }

    #[test]
    fn offers_keep_every_line() {
        let mut builder = GraphBuilder::new(st(2));
        let a = builder.add_line(&line(&[0, 1, 2], &[3, 3]));
        let b = builder.add_line(&line(&[0, 1], &[1]));
        let graph = builder.build();

        assert_eq!(graph.cost(st(0), st(1)), Some(1));
        let offers: Vec<_> = graph
            .offers(st(0), st(1))
            .iter()
            .map(|o| (o.line, o.cost))
            .collect();
        assert_eq!(offers, vec![(a, 3), (b, 1)]);
        assert_eq!(graph.line_count(), 2);
    }

    #[test]
    fn shared_station_is_switching_point() {
        let mut builder = GraphBuilder::new(st(3));
        builder.add_line(&line(&[0, 1, 3], &[2, 4]));
        builder.add_line(&line(&[1, 2, 3], &[1, 1]));
        let graph = builder.build();

        assert!(graph.is_switching_point(st(1)));
        assert!(graph.is_switching_point(st(3)));
        assert!(!graph.is_switching_point(st(0)));
        assert!(!graph.is_switching_point(st(2)));
    }

    #[test]
    fn single_stop_line_adds_no_edges() {
        let mut builder = GraphBuilder::new(st(3));
        builder.add_line(&line(&[5], &[]));
        let graph = builder.build();
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains(st(5)));
    }

    #[test]
    fn add_lines_assigns_ids_in_order() {
        let lines = vec![line(&[0, 1], &[1]), line(&[1, 2], &[1])];
        let mut builder = GraphBuilder::new(st(2));
        let ids = builder.add_lines(&lines);
        assert_eq!(ids, vec![LineId(0), LineId(1)]);
    }
}
