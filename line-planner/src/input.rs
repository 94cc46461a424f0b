//! Line-oriented network input.
//!
//! The format is whitespace-separated integers, one record per text line:
//!
//! ```text
//! K D [S]     number of lines, destination, optional switch limit
//! n           stop count of the first line
//! s0 .. sn-1  its stops
//! c0 .. cn-2  its costs (blank for a single-stop line)
//! ...         three records for each remaining line
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::domain::{DomainError, InvalidStation, Line, Station};
use crate::network::Graph;
use crate::planner::SolveConfig;

/// Errors that can occur while reading network input.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended early
    #[error("missing {what} at line {line}")]
    MissingRecord { what: &'static str, line: usize },

    /// The header is not `K D [S]`
    #[error("header must be \"<lines> <destination> [max switches]\", got {0:?}")]
    InvalidHeader(String),

    /// A token is not a non-negative integer
    #[error("invalid number {token:?} at line {line}")]
    InvalidNumber { token: String, line: usize },

    /// A stop is not a valid station
    #[error("at line {line}: {source}")]
    InvalidStation { line: usize, source: InvalidStation },

    /// The declared stop count disagrees with the stop list
    #[error("train line {train} declares {declared} stops but lists {listed}")]
    StopCountMismatch {
        train: usize,
        declared: usize,
        listed: usize,
    },

    /// The stops and costs do not form a valid line
    #[error("train line {train}: {source}")]
    Line { train: usize, source: DomainError },
}

/// A parsed network: its lines plus the query the input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInput {
    pub destination: Station,
    pub max_switches: Option<usize>,
    pub lines: Vec<Line>,
}

impl NetworkInput {
    /// Merge the lines into a graph ending at the destination.
    pub fn to_graph(&self) -> Graph {
        Graph::from_lines(self.destination, &self.lines)
    }

    /// The query described by the header.
    pub fn solve_config(&self) -> SolveConfig {
        SolveConfig {
            destination: self.destination,
            max_switches: self.max_switches,
            ..SolveConfig::default()
        }
    }
}

/// Parse network input from a string.
///
/// # Examples
///
/// ```
/// use line_planner::input;
///
/// let network = input::parse("1 3\n4\n0 1 2 3\n5 5 5\n").unwrap();
/// assert_eq!(network.lines.len(), 1);
/// assert_eq!(network.destination.id(), 3);
/// ```
pub fn parse(text: &str) -> Result<NetworkInput, InputError> {
    read(text.as_bytes())
}

/// Read network input from a file.
pub fn load(path: impl AsRef<Path>) -> Result<NetworkInput, InputError> {
    let file = File::open(path)?;
    read(BufReader::new(file))
}

/// Read network input from any buffered reader.
pub fn read(reader: impl BufRead) -> Result<NetworkInput, InputError> {
    let mut records = Records {
        lines: reader.lines(),
        number: 0,
    };

    let header = loop {
        let text = records.next("header")?;
        if !text.trim().is_empty() {
            break text;
        }
    };
    let header_line = records.number;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    let (count, destination, limit) = match tokens[..] {
        [count, destination] => (count, destination, None),
        [count, destination, limit] => (count, destination, Some(limit)),
        _ => return Err(InputError::InvalidHeader(header.trim().to_string())),
    };
    let count: usize = single(count, header_line)?;
    let destination = Station::parse(destination).map_err(|source| InputError::InvalidStation {
        line: header_line,
        source,
    })?;
    let max_switches = limit
        .map(|limit| single::<usize>(limit, header_line))
        .transpose()?;

    // The header count is untrusted, so the vector grows as lines are read.
    let mut lines = Vec::new();
    for train in 1..=count {
        let declared: usize = single(&records.next("stop count")?, records.number)?;

        let stop_text = records.next("stop list")?;
        let stops = stop_text
            .split_whitespace()
            .map(|token| {
                Station::parse(token).map_err(|source| InputError::InvalidStation {
                    line: records.number,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if stops.len() != declared {
            return Err(InputError::StopCountMismatch {
                train,
                declared,
                listed: stops.len(),
            });
        }

        let costs: Vec<u64> = numbers(&records.next("cost list")?, records.number)?;
        let line = Line::new(stops, costs).map_err(|source| InputError::Line { train, source })?;
        lines.push(line);
    }

    debug!(
        lines = lines.len(),
        destination = %destination,
        max_switches,
        "Parsed network input"
    );

    Ok(NetworkInput {
        destination,
        max_switches,
        lines,
    })
}

struct Records<L> {
    lines: L,
    number: usize,
}

impl<L: Iterator<Item = std::io::Result<String>>> Records<L> {
    fn next(&mut self, what: &'static str) -> Result<String, InputError> {
        self.number += 1;
        match self.lines.next() {
            Some(line) => Ok(line?),
            None => Err(InputError::MissingRecord {
                what,
                line: self.number,
            }),
        }
    }
}

fn numbers<T: FromStr>(text: &str, line: usize) -> Result<Vec<T>, InputError> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|_| InputError::InvalidNumber {
                token: token.to_string(),
                line,
            })
        })
        .collect()
}

fn single<T: FromStr>(text: &str, line: usize) -> Result<T, InputError> {
    let mut values = numbers::<T>(text, line)?;
    if values.len() != 1 {
        return Err(InputError::InvalidNumber {
            token: text.trim().to_string(),
            line,
        });
    }
    Ok(values.remove(0))
}
