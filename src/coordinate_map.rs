//! Position lookups between related sequences.

use noodles::core::Position;
use thiserror::Error;

use crate::endpoint::Coordinate;

/// The direction to search when a position lands on a gap in the destination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Toward lower coordinates (-1).
    Backward,
    /// Toward higher coordinates (+1).
    Forward,
}

/// The result of mapping a source position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Mapping {
    source: Position,
    destination: Coordinate,
}

impl Mapping {
    pub fn new(source: Position, destination: Coordinate) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Returns the source position the destination was matched against.
    pub fn source(&self) -> Position {
        self.source
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum MapError {
    #[error("missing sequence: {0}")]
    MissingSequence(String),
    #[error("position {position} is out of range for {name} (length = {length})")]
    PositionOutOfRange {
        name: String,
        position: Position,
        length: usize,
    },
}

pub trait CoordinateMap {
    /// Returns the names of all sequences the map can translate between.
    fn sequence_names(&self) -> Vec<&str>;

    /// Maps `position` on `src` to `dst`.
    ///
    /// When the aligned column has no base in `dst`, columns are searched in
    /// `direction` until one does. If none does, the destination is
    /// unresolved.
    fn map_position(
        &self,
        src: &str,
        dst: &str,
        position: Position,
        direction: Direction,
    ) -> Result<Mapping, MapError>;
}
