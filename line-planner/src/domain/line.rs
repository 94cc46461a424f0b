//! Train lines: ordered stops with a travel cost between each pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::station::Station;

/// Identifies a line within a network, in the order lines were added.
///
/// Displays one-based (`L1`, `L2`, ...) to match how lines are numbered in
/// input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0 + 1)
    }
}

/// One hop of a line between two consecutive stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Station,
    pub to: Station,
    pub cost: u64,
}

/// A validated train line.
///
/// Invariant: `costs.len() + 1 == stops.len()` and there is at least one
/// stop. A line that fails validation never reaches the graph, so no
/// partial set of edges is ever added from it.
///
/// # Examples
///
/// ```
/// use line_planner::domain::{Line, Station};
///
/// let line = Line::new(
///     vec![Station::new(0), Station::new(1), Station::new(3)],
///     vec![2, 4],
/// ).unwrap();
/// assert_eq!(line.total_cost(), 6);
/// assert_eq!(line.segments().count(), 2);
///
/// // More costs than segments is rejected
/// assert!(Line::new(vec![Station::new(0), Station::new(1)], vec![1, 1]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    stops: Vec<Station>,
    costs: Vec<u64>,
}

impl Line {
    /// Create a line, validating that stops and costs agree.
    pub fn new(stops: Vec<Station>, costs: Vec<u64>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::EmptyLine);
        }
        if costs.len() + 1 != stops.len() {
            return Err(DomainError::MalformedLineDefinition {
                stops: stops.len(),
                costs: costs.len(),
            });
        }
        Ok(Self { stops, costs })
    }

    /// Stops in travel order.
    pub fn stops(&self) -> &[Station] {
        &self.stops
    }

    /// Per-segment costs in travel order.
    pub fn costs(&self) -> &[u64] {
        &self.costs
    }

    /// Consecutive stop pairs with their costs.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.stops
            .windows(2)
            .zip(&self.costs)
            .map(|(pair, &cost)| Segment {
                from: pair[0],
                to: pair[1],
                cost,
            })
    }

    /// Cost of riding the line from its first stop to its last.
    ///
    /// Saturates rather than overflowing.
    pub fn total_cost(&self) -> u64 {
        self.costs.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// Returns true if every segment moves to a higher-numbered station.
    pub fn is_monotone(&self) -> bool {
        self.stops.windows(2).all(|pair| pair[0] < pair[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations(ids: &[u32]) -> Vec<Station> {
        ids.iter().copied().map(Station::new).collect()
    }

    #[test]
    fn valid_line() {
        let line = Line::new(stations(&[0, 1, 2, 3]), vec![5, 5, 5]).unwrap();
        assert_eq!(line.stops().len(), 4);
        assert_eq!(line.costs(), &[5, 5, 5]);
        assert_eq!(line.total_cost(), 15);
        assert!(line.is_monotone());
    }

    #[test]
    fn single_stop_line_has_no_segments() {
        let line = Line::new(stations(&[4]), vec![]).unwrap();
        assert_eq!(line.segments().count(), 0);
        assert_eq!(line.total_cost(), 0);
    }

    #[test]
    fn reject_too_many_costs() {
        let err = Line::new(stations(&[0, 1]), vec![1, 2]).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedLineDefinition { stops: 2, costs: 2 }
        );
    }

    #[test]
    fn reject_too_few_costs() {
        let err = Line::new(stations(&[0, 1, 2]), vec![1]).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedLineDefinition { stops: 3, costs: 1 }
        );
    }

    #[test]
    fn reject_empty() {
        assert_eq!(Line::new(vec![], vec![]).unwrap_err(), DomainError::EmptyLine);
    }

    #[test]
    fn segments_pair_stops_with_costs() {
        let line = Line::new(stations(&[0, 1, 3]), vec![2, 4]).unwrap();
        let segments: Vec<_> = line.segments().collect();
        assert_eq!(
            segments,
            vec![
                Segment { from: Station::new(0), to: Station::new(1), cost: 2 },
                Segment { from: Station::new(1), to: Station::new(3), cost: 4 },
            ]
        );
    }

    #[test]
    fn non_monotone_detected() {
        let line = Line::new(stations(&[0, 3, 2]), vec![1, 1]).unwrap();
        assert!(!line.is_monotone());
    }

    #[test]
    fn line_id_display_is_one_based() {
        assert_eq!(LineId(0).to_string(), "L1");
        assert_eq!(LineId(9).to_string(), "L10");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any stop list with one fewer cost validates, and the total is the sum
        #[test]
        fn consistent_lines_validate(costs in prop::collection::vec(0u64..1000, 0..20)) {
            let stops: Vec<Station> = (0..=costs.len() as u32).map(Station::new).collect();
            let line = Line::new(stops, costs.clone()).unwrap();
            prop_assert_eq!(line.total_cost(), costs.iter().sum::<u64>());
            prop_assert_eq!(line.segments().count(), costs.len());
        }

        /// Any mismatch between stops and costs is rejected
        #[test]
        fn inconsistent_lines_rejected(n_stops in 1usize..20, n_costs in 0usize..25) {
            prop_assume!(n_costs + 1 != n_stops);
            let stops: Vec<Station> = (0..n_stops as u32).map(Station::new).collect();
            let is_malformed = matches!(
                Line::new(stops, vec![1; n_costs]),
                Err(DomainError::MalformedLineDefinition { .. })
            );
            prop_assert!(is_malformed);
        }
    }
}
