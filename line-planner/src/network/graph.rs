//! The frozen station graph.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::{Line, LineId, Station};

use super::builder::GraphBuilder;

/// One line's proposed cost for a hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOffer {
    pub line: LineId,
    pub cost: u64,
}

/// A directed hop between two stations.
///
/// `cost` is the cheapest of all offers. Offers are kept in the order their
/// lines were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    cost: u64,
    offers: Vec<EdgeOffer>,
}

impl Edge {
    pub(super) fn new(line: LineId, cost: u64) -> Self {
        Self {
            cost,
            offers: vec![EdgeOffer { line, cost }],
        }
    }

    /// Record an offer, keeping the minimum both overall and per line.
    pub(super) fn offer(&mut self, line: LineId, cost: u64) {
        self.cost = self.cost.min(cost);
        match self.offers.iter_mut().find(|o| o.line == line) {
            Some(existing) => existing.cost = existing.cost.min(cost),
            None => self.offers.push(EdgeOffer { line, cost }),
        }
    }

    /// The merged (minimum) cost.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Every line's offer for this hop.
    pub fn offers(&self) -> &[EdgeOffer] {
        &self.offers
    }

    /// Lines that offer the hop at its merged cost.
    pub fn cheapest_lines(&self) -> impl Iterator<Item = LineId> + '_ {
        self.offers
            .iter()
            .filter(|o| o.cost == self.cost)
            .map(|o| o.line)
    }
}

/// Merged station graph, keyed by station in ascending order.
///
/// Every station with an outgoing edge has an entry, and so does the
/// destination. Because stations increase along every line, iterating the
/// keys in order is a topological order.
#[derive(Debug, Clone)]
pub struct Graph {
    destination: Station,
    adjacency: BTreeMap<Station, BTreeMap<Station, Edge>>,
    switching_points: BTreeSet<Station>,
    line_count: usize,
}

impl Graph {
    pub(super) fn from_parts(
        destination: Station,
        adjacency: BTreeMap<Station, BTreeMap<Station, Edge>>,
        switching_points: BTreeSet<Station>,
        line_count: usize,
    ) -> Self {
        Self {
            destination,
            adjacency,
            switching_points,
            line_count,
        }
    }

    /// Build a graph from `(from, to, cost)` triples.
    ///
    /// # Examples
    ///
    /// ```
    /// use line_planner::domain::Station;
    /// use line_planner::network::Graph;
    ///
    /// let s = Station::new;
    /// let graph = Graph::from_edges(s(2), [(s(0), s(1), 3), (s(1), s(2), 4), (s(0), s(1), 1)]);
    /// assert_eq!(graph.cost(s(0), s(1)), Some(1));
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn from_edges(
        destination: Station,
        edges: impl IntoIterator<Item = (Station, Station, u64)>,
    ) -> Self {
        let mut builder = GraphBuilder::new(destination);
        for (from, to, cost) in edges {
            builder.add_edge(from, to, cost);
        }
        builder.build()
    }

    /// Build a graph from whole lines, assigning line ids in order.
    pub fn from_lines<'a>(destination: Station, lines: impl IntoIterator<Item = &'a Line>) -> Self {
        let mut builder = GraphBuilder::new(destination);
        builder.add_lines(lines);
        builder.build()
    }

    /// The station journeys end at.
    pub fn destination(&self) -> Station {
        self.destination
    }

    /// Returns true if the station has an adjacency entry.
    pub fn contains(&self, station: Station) -> bool {
        self.adjacency.contains_key(&station)
    }

    /// Stations with an adjacency entry, in ascending order.
    pub fn stations(&self) -> impl Iterator<Item = Station> + '_ {
        self.adjacency.keys().copied()
    }

    /// Outgoing hops from a station, in ascending order of target.
    ///
    /// Empty for stations without an entry.
    pub fn neighbors(&self, station: Station) -> impl Iterator<Item = (Station, &Edge)> + '_ {
        self.adjacency
            .get(&station)
            .into_iter()
            .flat_map(|n| n.iter().map(|(to, edge)| (*to, edge)))
    }

    /// The hop between two stations, if any line offers it.
    pub fn edge(&self, from: Station, to: Station) -> Option<&Edge> {
        self.adjacency.get(&from).and_then(|n| n.get(&to))
    }

    /// Merged cost of the hop between two stations.
    pub fn cost(&self, from: Station, to: Station) -> Option<u64> {
        self.edge(from, to).map(Edge::cost)
    }

    /// Every offer for the hop between two stations.
    pub fn offers(&self, from: Station, to: Station) -> &[EdgeOffer] {
        self.edge(from, to).map(Edge::offers).unwrap_or(&[])
    }

    /// Returns true if more than one line serves the station.
    pub fn is_switching_point(&self, station: Station) -> bool {
        self.switching_points.contains(&station)
    }

    /// Stations served by more than one line, ascending.
    pub fn switching_points(&self) -> impl Iterator<Item = Station> + '_ {
        self.switching_points.iter().copied()
    }

    /// Number of stations with an adjacency entry.
    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct hops.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Number of lines merged into the graph.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Returns true if every hop moves to a higher-numbered station.
    ///
    /// The single-pass solver is only exact on monotone graphs.
    pub fn is_monotone(&self) -> bool {
        self.adjacency
            .iter()
            .all(|(from, n)| n.keys().all(|to| to > from))
    }
}

impl fmt::Display for Graph {
    /// One row per station: `from -> to:cost, to:cost`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, neighbors) in &self.adjacency {
            write!(f, "{from} ->")?;
            for (i, (to, edge)) in neighbors.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                write!(f, "{sep}{to}:{}", edge.cost)?;
            }
            writeln!(f)?;
        }
        Ok(())
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

    fn two_line_graph() -> Graph {
        let lines = [line(&[0, 1, 3], &[2, 4]), line(&[1, 2, 3], &[1, 1])];
        Graph::from_lines(st(3), &lines)
    }

    #[test]
    fn two_lines_merge_into_expected_graph() {
        let graph = two_line_graph();

        assert_eq!(graph.cost(st(0), st(1)), Some(2));
        assert_eq!(graph.cost(st(1), st(3)), Some(4));
        assert_eq!(graph.cost(st(1), st(2)), Some(1));
        assert_eq!(graph.cost(st(2), st(3)), Some(1));
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.line_count(), 2);
        assert_eq!(graph.destination(), st(3));
        assert_eq!(graph.switching_points().collect::<Vec<_>>(), vec![st(1), st(3)]);

        let stations: Vec<_> = graph.stations().collect();
        assert_eq!(stations, vec![st(0), st(1), st(2), st(3)]);
    }

    #[test]
    fn display_lists_rows_in_order() {
        let graph = two_line_graph();
        assert_eq!(graph.to_string(), "0 -> 1:2\n1 -> 2:1, 3:4\n2 -> 3:1\n3 ->\n");
    }

    #[test]
    fn missing_edges() {
        let graph = two_line_graph();
        assert_eq!(graph.cost(st(0), st(3)), None);
        assert!(graph.offers(st(0), st(3)).is_empty());
        assert_eq!(graph.neighbors(st(42)).count(), 0);
    }

    #[test]
    fn cheapest_lines_filters_offers() {
        let lines = [
            line(&[0, 1], &[5]),
            line(&[0, 1], &[3]),
            line(&[0, 1], &[3]),
        ];
        let graph = Graph::from_lines(st(1), &lines);
        let edge = graph.edge(st(0), st(1)).unwrap();
        let cheapest: Vec<_> = edge.cheapest_lines().collect();
        assert_eq!(cheapest, vec![LineId(1), LineId(2)]);
    }

    #[test]
    fn monotone_check() {
        assert!(two_line_graph().is_monotone());

        let backwards = Graph::from_edges(st(1), [(st(0), st(2), 1), (st(2), st(1), 1)]);
        assert!(!backwards.is_monotone());
    }

    #[test]
    fn graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Graph>();
    }
}
