use std::fmt;

use noodles::core::Position;

/// A position that may not have a place on its sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coordinate {
    /// A 1-based position.
    Resolved(Position),
    /// No position could be determined.
    Unresolved,
}

impl Coordinate {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Resolved(position) => Some(*position),
            Self::Unresolved => None,
        }
    }
}

impl From<Position> for Coordinate {
    fn from(position: Position) -> Self {
        Self::Resolved(position)
    }
}

impl From<Option<Position>> for Coordinate {
    fn from(position: Option<Position>) -> Self {
        position.map(Self::Resolved).unwrap_or(Self::Unresolved)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(position) => write!(f, "{position}"),
            Self::Unresolved => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() -> Result<(), noodles::core::position::TryFromIntError> {
        let position = Position::try_from(8)?;
        assert_eq!(Coordinate::Resolved(position).position(), Some(position));
        assert_eq!(Coordinate::Unresolved.position(), None);
        Ok(())
    }

    #[test]
    fn test_from_option_position() -> Result<(), noodles::core::position::TryFromIntError> {
        let position = Position::try_from(13)?;
        assert_eq!(Coordinate::from(Some(position)), Coordinate::Resolved(position));
        assert_eq!(Coordinate::from(None), Coordinate::Unresolved);
        Ok(())
    }

    #[test]
    fn test_fmt() -> Result<(), noodles::core::position::TryFromIntError> {
        assert_eq!(Coordinate::Resolved(Position::try_from(21)?).to_string(), "21");
        assert_eq!(Coordinate::Unresolved.to_string(), "?");
        Ok(())
    }
}
