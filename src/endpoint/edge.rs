use std::fmt;

/// The boundary marker of an interval endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Edge {
    /// The endpoint is exact.
    #[default]
    Exact,
    /// The feature may extend to the left of the endpoint, i.e., toward
    /// position 1 (`<`).
    AtLeast,
    /// The feature may extend to the right of the endpoint, i.e., past the
    /// sequence end (`>`).
    AtMost,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => Ok(()),
            Self::AtLeast => f.write_str("<"),
            Self::AtMost => f.write_str(">"),
        }
    }
}
