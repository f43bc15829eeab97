use std::{convert::Infallible, fmt, str::FromStr};

use super::Interval;

const CODING_SEQUENCE_KEY: &str = "CDS";
const NOTE_KEY: &str = "note";

/// A feature key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A coding sequence (`CDS`). Its intervals keep a 3-base reading frame.
    CodingSequence,
    Other(String),
}

impl Kind {
    pub fn is_coding_sequence(&self) -> bool {
        matches!(self, Self::CodingSequence)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodingSequence => f.write_str(CODING_SEQUENCE_KEY),
            Self::Other(key) => f.write_str(key),
        }
    }
}

impl FromStr for Kind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CODING_SEQUENCE_KEY => Ok(Self::CodingSequence),
            _ => Ok(Self::Other(s.into())),
        }
    }
}

/// A feature qualifier, e.g., `gene` or `product`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Qualifier {
    key: String,
    value: Option<String>,
}

impl Qualifier {
    pub fn new<K>(key: K, value: Option<String>) -> Self
    where
        K: Into<String>,
    {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    reference_sequence_name: String,
    kind: Kind,
    intervals: Vec<Interval>,
    qualifiers: Vec<Qualifier>,
}

impl Feature {
    pub fn new(
        reference_sequence_name: String,
        kind: Kind,
        intervals: Vec<Interval>,
        qualifiers: Vec<Qualifier>,
    ) -> Self {
        Self {
            reference_sequence_name,
            kind,
            intervals,
            qualifiers,
        }
    }

    pub fn reference_sequence_name(&self) -> &str {
        &self.reference_sequence_name
    }

    pub fn reference_sequence_name_mut(&mut self) -> &mut String {
        &mut self.reference_sequence_name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn intervals_mut(&mut self) -> &mut Vec<Interval> {
        &mut self.intervals
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn qualifiers_mut(&mut self) -> &mut Vec<Qualifier> {
        &mut self.qualifiers
    }

    /// Appends a `note` qualifier unless the same note is already present.
    ///
    /// Returns whether the note was added.
    pub fn add_note(&mut self, note: &str) -> bool {
        let is_present = self
            .qualifiers
            .iter()
            .any(|q| q.key() == NOTE_KEY && q.value() == Some(note));

        if is_present {
            false
        } else {
            self.qualifiers
                .push(Qualifier::new(NOTE_KEY, Some(note.into())));
            true
        }
    }
}
