//! Gapped multiple sequence alignments.

use std::io::{self, BufRead};

use bstr::ByteSlice;
use noodles::{core::Position, fasta};
use thiserror::Error;

use crate::{
    coordinate_map::{CoordinateMap, Direction, MapError, Mapping},
    endpoint::Coordinate,
};

const GAP: u8 = b'-';

#[derive(Debug)]
struct AlignedSequence {
    name: String,
    // The base position at each column, if any.
    columns: Vec<Option<Position>>,
    // The column of each base.
    offsets: Vec<usize>,
}

impl AlignedSequence {
    fn new(name: String, residues: &[u8]) -> Self {
        let mut columns = Vec::with_capacity(residues.len());
        let mut offsets = Vec::new();

        for (i, &residue) in residues.iter().enumerate() {
            if residue == GAP {
                columns.push(None);
            } else {
                offsets.push(i);
                columns.push(Position::new(offsets.len()));
            }
        }

        Self {
            name,
            columns,
            offsets,
        }
    }

    fn len(&self) -> usize {
        self.offsets.len()
    }
}

/// A set of sequences aligned column by column.
///
/// Gaps are marked by `-`.
#[derive(Debug)]
pub struct Alignment {
    sequences: Vec<AlignedSequence>,
    width: usize,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum BuildError {
    #[error("alignment has {0} sequence(s), expected at least 2")]
    TooFewSequences(usize),
    #[error("duplicate sequence name: {0}")]
    DuplicateName(String),
    #[error("{name} has an aligned length of {actual}, expected {expected}")]
    UnequalLength {
        name: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("invalid alignment")]
    Build(#[from] BuildError),
}

impl Alignment {
    /// Builds an alignment from (name, aligned residues) pairs.
    pub fn new<I, N, S>(records: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        let mut sequences: Vec<AlignedSequence> = Vec::new();
        let mut width = None;

        for (name, residues) in records {
            let name = name.into();
            let residues = residues.as_ref();

            if sequences.iter().any(|s| s.name == name) {
                return Err(BuildError::DuplicateName(name));
            }

            match width {
                None => width = Some(residues.len()),
                Some(expected) if residues.len() != expected => {
                    return Err(BuildError::UnequalLength {
                        name,
                        expected,
                        actual: residues.len(),
                    });
                }
                Some(_) => {}
            }

            sequences.push(AlignedSequence::new(name, residues));
        }

        if sequences.len() < 2 {
            return Err(BuildError::TooFewSequences(sequences.len()));
        }

        Ok(Self {
            sequences,
            width: width.unwrap_or_default(),
        })
    }

    /// Returns the ungapped length of the named sequence.
    pub fn sequence_length(&self, name: &str) -> Option<usize> {
        self.get(name).map(|s| s.len())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn get(&self, name: &str) -> Option<&AlignedSequence> {
        self.sequences.iter().find(|s| s.name == name)
    }

    fn try_get(&self, name: &str) -> Result<&AlignedSequence, MapError> {
        self.get(name)
            .ok_or_else(|| MapError::MissingSequence(name.into()))
    }
}

impl CoordinateMap for Alignment {
    fn sequence_names(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.name.as_str()).collect()
    }

    fn map_position(
        &self,
        src: &str,
        dst: &str,
        position: Position,
        direction: Direction,
    ) -> Result<Mapping, MapError> {
        let source = self.try_get(src)?;
        let destination = self.try_get(dst)?;

        let i = usize::from(position) - 1;

        let column = source.offsets.get(i).copied().ok_or_else(|| {
            MapError::PositionOutOfRange {
                name: src.into(),
                position,
                length: source.len(),
            }
        })?;

        let has_base = |j: &usize| destination.columns[*j].is_some();

        let hit = match direction {
            Direction::Backward => (0..=column).rev().find(has_base),
            Direction::Forward => (column..self.width).find(has_base),
        };

        let mapping = match hit {
            Some(j) => Mapping::new(
                source.columns[j].unwrap_or(position),
                Coordinate::from(destination.columns[j]),
            ),
            None => Mapping::new(position, Coordinate::Unresolved),
        };

        Ok(mapping)
    }
}

/// Reads an alignment from gapped FASTA records.
pub fn read<R>(reader: &mut fasta::io::Reader<R>) -> Result<Alignment, ReadError>
where
    R: BufRead,
{
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;
        let name = record.name().to_str_lossy().into_owned();
        let residues = record.sequence().as_ref().to_vec();
        records.push((name, residues));
    }

    Alignment::new(records).map_err(ReadError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    //          1234567890
    // ref:     ACGTACGTAC
    // alt:     --GTA-GT--
    //            12345
    fn build_alignment() -> Result<Alignment, BuildError> {
        Alignment::new([("ref", "ACGTACGTAC"), ("alt", "--GTA-GT--")])
    }

    fn map(
        alignment: &Alignment,
        n: usize,
        direction: Direction,
    ) -> Result<(usize, Option<usize>), Box<dyn std::error::Error>> {
        let position = Position::try_from(n)?;
        let mapping = alignment.map_position("ref", "alt", position, direction)?;

        Ok((
            usize::from(mapping.source()),
            mapping.destination().position().map(usize::from),
        ))
    }

    #[test]
    fn test_new() {
        assert_eq!(
            Alignment::new([("ref", "ACGT")]).map(|_| ()),
            Err(BuildError::TooFewSequences(1))
        );

        assert_eq!(
            Alignment::new([("ref", "ACGT"), ("ref", "AC-T")]).map(|_| ()),
            Err(BuildError::DuplicateName(String::from("ref")))
        );

        assert_eq!(
            Alignment::new([("ref", "ACGT"), ("alt", "ACG")]).map(|_| ()),
            Err(BuildError::UnequalLength {
                name: String::from("alt"),
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_sequence_length() -> Result<(), BuildError> {
        let alignment = build_alignment()?;

        assert_eq!(alignment.width(), 10);
        assert_eq!(alignment.sequence_length("ref"), Some(10));
        assert_eq!(alignment.sequence_length("alt"), Some(5));
        assert_eq!(alignment.sequence_length("sq0"), None);

        Ok(())
    }

    #[test]
    fn test_sequence_names() -> Result<(), BuildError> {
        let alignment = build_alignment()?;
        assert_eq!(alignment.sequence_names(), ["ref", "alt"]);
        Ok(())
    }

    #[test]
    fn test_map_position() -> Result<(), Box<dyn std::error::Error>> {
        let alignment = build_alignment()?;

        assert_eq!(map(&alignment, 3, Direction::Forward)?, (3, Some(1)));
        assert_eq!(map(&alignment, 3, Direction::Backward)?, (3, Some(1)));
        assert_eq!(map(&alignment, 5, Direction::Backward)?, (5, Some(3)));

        // column 6 is a gap in alt
        assert_eq!(map(&alignment, 6, Direction::Forward)?, (7, Some(4)));
        assert_eq!(map(&alignment, 6, Direction::Backward)?, (5, Some(3)));

        // leading and trailing overhangs
        assert_eq!(map(&alignment, 1, Direction::Backward)?, (1, None));
        assert_eq!(map(&alignment, 1, Direction::Forward)?, (3, Some(1)));
        assert_eq!(map(&alignment, 10, Direction::Forward)?, (10, None));
        assert_eq!(map(&alignment, 10, Direction::Backward)?, (8, Some(5)));

        Ok(())
    }

    #[test]
    fn test_map_position_with_gapped_source() -> Result<(), Box<dyn std::error::Error>> {
        let alignment = build_alignment()?;

        // alt 4 is in column 7, which is ref 7.
        let mapping =
            alignment.map_position("alt", "ref", Position::try_from(4)?, Direction::Forward)?;
        assert_eq!(usize::from(mapping.source()), 4);
        assert_eq!(
            mapping.destination(),
            Coordinate::Resolved(Position::try_from(7)?)
        );

        Ok(())
    }

    #[test]
    fn test_map_position_with_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
        let alignment = build_alignment()?;
        let position = Position::try_from(11)?;

        assert_eq!(
            alignment.map_position("ref", "alt", position, Direction::Forward),
            Err(MapError::PositionOutOfRange {
                name: String::from("ref"),
                position,
                length: 10,
            })
        );

        assert_eq!(
            alignment.map_position("sq0", "alt", Position::MIN, Direction::Forward),
            Err(MapError::MissingSequence(String::from("sq0")))
        );

        Ok(())
    }

    #[test]
    fn test_read() -> Result<(), Box<dyn std::error::Error>> {
        let data = b">ref\nACGTACGTAC\n>alt description\n--GTA-GT--\n";
        let mut reader = fasta::io::Reader::new(&data[..]);

        let alignment = read(&mut reader)?;

        assert_eq!(alignment.sequence_names(), ["ref", "alt"]);
        assert_eq!(alignment.sequence_length("alt"), Some(5));

        Ok(())
    }
}
