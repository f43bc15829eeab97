use noodles::core::Position;

use super::Policy;
use crate::{
    coordinate_map::{CoordinateMap, Direction, MapError},
    endpoint::{Coordinate, Edge, Endpoint},
    feature_table::{Interval, Kind, Orientation},
};

const CODON_LENGTH: usize = 3;

/// The outcome of moving one interval onto the target.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Remapping {
    /// Both endpoints landed on the target.
    Contained(Interval),
    /// One endpoint fell off the target and was clipped to its edge.
    Clipped(Interval),
    /// Neither endpoint landed on the target.
    Unplaced,
    /// One endpoint fell off the target, and clipping is disabled.
    Overhanging,
    /// Clipping a coding sequence would leave less than one codon.
    SubCodon,
}

impl Remapping {
    pub fn into_interval(self) -> Option<Interval> {
        match self {
            Self::Contained(interval) | Self::Clipped(interval) => Some(interval),
            Self::Unplaced | Self::Overhanging | Self::SubCodon => None,
        }
    }

    /// Whether the interval was cut short by the clipping policy.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Clipped(_) | Self::SubCodon)
    }
}

/// Moves intervals from a reference sequence onto a target sequence.
pub struct Remapper<'a, M> {
    map: &'a M,
    reference_sequence_name: &'a str,
    target_sequence_name: &'a str,
    target_end: Position,
    policy: Policy,
}

impl<'a, M> Remapper<'a, M>
where
    M: CoordinateMap,
{
    /// Creates a remapper.
    ///
    /// `target_end` is the last position of the target, i.e., its length.
    pub fn new(
        map: &'a M,
        reference_sequence_name: &'a str,
        target_sequence_name: &'a str,
        target_end: Position,
        policy: Policy,
    ) -> Self {
        Self {
            map,
            reference_sequence_name,
            target_sequence_name,
            target_end,
            policy,
        }
    }

    pub fn remap(&self, kind: &Kind, interval: &Interval) -> Result<Remapping, MapError> {
        let orientation = interval.orientation();

        // Gap searches move away from the interior of the feature.
        let (start_direction, end_direction) = match orientation {
            Orientation::Forward => (Direction::Backward, Direction::Forward),
            Orientation::Reverse => (Direction::Forward, Direction::Backward),
        };

        let mut start = self.map_endpoint(interval.start(), start_direction)?;
        let mut end = self.map_endpoint(interval.end(), end_direction)?;

        if self.policy.treat_ambiguous_as_exact() {
            start = start.into_exact();
            end = end.into_exact();
        }

        let remapping = match (start.coordinate(), end.coordinate()) {
            (Coordinate::Resolved(_), Coordinate::Resolved(_)) => {
                Remapping::Contained(Interval::with_orientation(start, end, orientation))
            }
            (Coordinate::Unresolved, Coordinate::Unresolved) => Remapping::Unplaced,
            _ if !self.policy.clip_out_of_bounds() => Remapping::Overhanging,
            _ => self.clip(kind, orientation, start, end),
        };

        Ok(remapping)
    }

    fn map_endpoint(&self, endpoint: Endpoint, direction: Direction) -> Result<Endpoint, MapError> {
        match endpoint.coordinate() {
            Coordinate::Resolved(position) => {
                let mapping = self.map.map_position(
                    self.reference_sequence_name,
                    self.target_sequence_name,
                    position,
                    direction,
                )?;

                Ok(Endpoint::new(mapping.destination(), endpoint.edge()))
            }
            Coordinate::Unresolved => Ok(endpoint),
        }
    }

    fn clip(
        &self,
        kind: &Kind,
        orientation: Orientation,
        start: Endpoint,
        end: Endpoint,
    ) -> Remapping {
        let (start, end) = match orientation {
            Orientation::Forward => {
                let start = if start.coordinate().is_resolved() {
                    start
                } else {
                    let position = match kind {
                        Kind::CodingSequence => {
                            let anchor = end.position().unwrap_or(self.target_end);
                            frame_start(anchor)
                        }
                        Kind::Other(_) => Position::MIN,
                    };

                    at_least(position)
                };

                let end = if end.coordinate().is_resolved() {
                    end
                } else {
                    Endpoint::new(Coordinate::Resolved(self.target_end), Edge::AtMost)
                };

                (start, end)
            }
            Orientation::Reverse => {
                let start = if start.coordinate().is_resolved() {
                    start
                } else {
                    let position = match kind {
                        Kind::CodingSequence => {
                            let anchor = end.position().unwrap_or(Position::MIN);

                            match frame_end(anchor, self.target_end) {
                                Some(position) => position,
                                None => return Remapping::SubCodon,
                            }
                        }
                        Kind::Other(_) => self.target_end,
                    };

                    at_least(position)
                };

                let end = if end.coordinate().is_resolved() {
                    end
                } else {
                    at_least(Position::MIN)
                };

                (start, end)
            }
        };

        Remapping::Clipped(Interval::with_orientation(start, end, orientation))
    }
}

fn at_least(position: Position) -> Endpoint {
    Endpoint::new(Coordinate::Resolved(position), Edge::AtLeast)
}

// Returns the first position of the codon frame that ends at `anchor`.
fn frame_start(anchor: Position) -> Position {
    Position::MIN
        .checked_add(usize::from(anchor) % CODON_LENGTH)
        .expect("attempt to add with overflow")
}

// Returns the last position of the longest run of whole codons that starts at
// `anchor` and ends at or before `target_end`, if at least one codon fits.
fn frame_end(anchor: Position, target_end: Position) -> Option<Position> {
    let available = (usize::from(target_end) + 1).saturating_sub(usize::from(anchor));
    let span = available - available % CODON_LENGTH;

    if span < CODON_LENGTH {
        return None;
    }

    let position = anchor
        .checked_add(span - 1)
        .expect("attempt to add with overflow");

    Some(position)
}
