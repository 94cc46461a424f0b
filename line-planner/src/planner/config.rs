//! Solve configuration for the planner.

use crate::domain::Station;

/// Parameters for one shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveConfig {
    /// Where journeys start.
    pub origin: Station,

    /// Where journeys end.
    pub destination: Station,

    /// Maximum number of line changes allowed.
    /// `None` means any number of changes.
    pub max_switches: Option<usize>,
}

impl SolveConfig {
    /// Create a configuration from the origin to `destination` with no
    /// switch limit.
    pub fn new(destination: Station) -> Self {
        Self {
            destination,
            ..Self::default()
        }
    }

    /// Limit the number of line changes.
    pub fn with_max_switches(mut self, max_switches: usize) -> Self {
        self.max_switches = Some(max_switches);
        self
    }

    /// Start from a station other than the usual origin.
    pub fn with_origin(mut self, origin: Station) -> Self {
        self.origin = origin;
        self
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            origin: Station::ORIGIN,
            destination: Station::ORIGIN,
            max_switches: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SolveConfig::default();

        assert_eq!(config.origin, Station::ORIGIN);
        assert_eq!(config.destination, Station::ORIGIN);
        assert_eq!(config.max_switches, None);
    }

    #[test]
    fn custom_config() {
        let config = SolveConfig::new(Station::new(9))
            .with_max_switches(2)
            .with_origin(Station::new(1));

        assert_eq!(config.origin, Station::new(1));
        assert_eq!(config.destination, Station::new(9));
        assert_eq!(config.max_switches, Some(2));
    }
}
