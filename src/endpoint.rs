//! Interval endpoints.

mod coordinate;
mod edge;

pub use self::{coordinate::Coordinate, edge::Edge};

use std::{error, fmt, num, str::FromStr};

use noodles::core::Position;

/// An interval endpoint: a coordinate and its edge marker.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Endpoint {
    coordinate: Coordinate,
    edge: Edge,
}

impl Endpoint {
    pub fn new(coordinate: Coordinate, edge: Edge) -> Self {
        Self { coordinate, edge }
    }

    pub fn exact(position: Position) -> Self {
        Self::new(Coordinate::Resolved(position), Edge::Exact)
    }

    pub fn unresolved() -> Self {
        Self::new(Coordinate::Unresolved, Edge::Exact)
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn position(&self) -> Option<Position> {
        self.coordinate.position()
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Returns the same coordinate with the edge marker cleared.
    pub fn into_exact(self) -> Self {
        Self::new(self.coordinate, Edge::Exact)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.edge, self.coordinate)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    Empty,
    InvalidPosition(num::ParseIntError),
    Zero,
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidPosition(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty input"),
            Self::InvalidPosition(_) => write!(f, "invalid position"),
            Self::Zero => write!(f, "position cannot be 0"),
        }
    }
}

impl FromStr for Endpoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let (edge, raw_position) = if let Some(t) = s.strip_prefix('<') {
            (Edge::AtLeast, t)
        } else if let Some(t) = s.strip_prefix('>') {
            (Edge::AtMost, t)
        } else {
            (Edge::Exact, s)
        };

        let n: usize = raw_position.parse().map_err(ParseError::InvalidPosition)?;
        let position = Position::new(n).ok_or(ParseError::Zero)?;

        Ok(Self::new(Coordinate::Resolved(position), edge))
    }
}
