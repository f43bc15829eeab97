//! NCBI feature table (`.tbl`).

mod feature;
mod interval;
pub mod reader;
mod writer;

pub use self::{
    feature::{Feature, Kind, Qualifier},
    interval::{Interval, Orientation},
    reader::Reader,
    writer::Writer,
};

use std::mem;

const ACCESSION_DELIMITER: char = '|';

/// A list of features on a single sequence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeatureTable {
    reference_sequence_name: String,
    features: Vec<Feature>,
}

impl FeatureTable {
    pub fn new(reference_sequence_name: String, features: Vec<Feature>) -> Self {
        Self {
            reference_sequence_name,
            features,
        }
    }

    pub fn reference_sequence_name(&self) -> &str {
        &self.reference_sequence_name
    }

    /// Returns the accession of the reference sequence name.
    ///
    /// For a database-qualified name, e.g., `gb|KM034562.1|`, this is the
    /// first nonempty field after the database tag. Otherwise, it is the
    /// name itself.
    pub fn accession(&self) -> &str {
        accession(&self.reference_sequence_name)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Moves the table and all its features onto another sequence.
    pub fn rebind(&mut self, reference_sequence_name: &str) {
        self.reference_sequence_name = reference_sequence_name.into();

        for feature in &mut self.features {
            *feature.reference_sequence_name_mut() = reference_sequence_name.into();
        }
    }

    /// Builds a new table by applying `f` to every interval of every feature.
    ///
    /// Intervals for which `f` returns `None` are removed, and features left
    /// without intervals are removed. Feature and interval order is kept.
    pub fn try_remap<F, E>(self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(&mut Feature, &Interval) -> Result<Option<Interval>, E>,
    {
        let mut features = Vec::with_capacity(self.features.len());

        for mut feature in self.features {
            let intervals = mem::take(feature.intervals_mut());
            let mut remapped_intervals = Vec::with_capacity(intervals.len());

            for interval in &intervals {
                if let Some(remapped_interval) = f(&mut feature, interval)? {
                    remapped_intervals.push(remapped_interval);
                }
            }

            if !remapped_intervals.is_empty() {
                *feature.intervals_mut() = remapped_intervals;
                features.push(feature);
            }
        }

        Ok(Self::new(self.reference_sequence_name, features))
    }
}

pub(crate) fn accession(name: &str) -> &str {
    if !name.contains(ACCESSION_DELIMITER) {
        return name;
    }

    name.split(ACCESSION_DELIMITER)
        .skip(1)
        .find(|s| !s.is_empty())
        .unwrap_or(name)
}
