use crate::endpoint::{Coordinate, Endpoint};

/// The direction an interval was authored in, relative to the reference axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Orientation {
    Forward,
    Reverse,
}

/// A start-end pair of a feature.
///
/// The orientation is fixed when the interval is first built from reference
/// coordinates. Remapped intervals inherit it even if their endpoints cross.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Interval {
    start: Endpoint,
    end: Endpoint,
    orientation: Orientation,
}

impl Interval {
    pub fn new(start: Endpoint, end: Endpoint) -> Self {
        let orientation = match (start.coordinate(), end.coordinate()) {
            (Coordinate::Resolved(s), Coordinate::Resolved(e)) if e < s => Orientation::Reverse,
            _ => Orientation::Forward,
        };

        Self::with_orientation(start, end, orientation)
    }

    pub(crate) fn with_orientation(
        start: Endpoint,
        end: Endpoint,
        orientation: Orientation,
    ) -> Self {
        Self {
            start,
            end,
            orientation,
        }
    }

    pub fn start(&self) -> Endpoint {
        self.start
    }

    pub fn end(&self) -> Endpoint {
        self.end
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

#[cfg(test)]
mod tests {
    use noodles::core::{position::TryFromIntError, Position};

    use super::*;

    fn exact(n: usize) -> Result<Endpoint, TryFromIntError> {
        Position::try_from(n).map(Endpoint::exact)
    }

    #[test]
    fn test_new() -> Result<(), TryFromIntError> {
        let interval = Interval::new(exact(8)?, exact(13)?);
        assert_eq!(interval.orientation(), Orientation::Forward);

        let interval = Interval::new(exact(13)?, exact(8)?);
        assert_eq!(interval.orientation(), Orientation::Reverse);

        let interval = Interval::new(exact(8)?, exact(8)?);
        assert_eq!(interval.orientation(), Orientation::Forward);

        Ok(())
    }

    #[test]
    fn test_new_with_unresolved_endpoint() -> Result<(), TryFromIntError> {
        let interval = Interval::new(exact(13)?, Endpoint::unresolved());
        assert_eq!(interval.orientation(), Orientation::Forward);
        Ok(())
    }
}
