//! Feature transfer between aligned sequences.

pub mod batch;
mod policy;
mod remapper;
mod summary;

pub use self::{
    batch::{transfer_batch, Job},
    policy::Policy,
    remapper::{Remapper, Remapping},
    summary::Summary,
};

use noodles::core::Position;
use thiserror::Error;
use tracing::debug;

use crate::{
    coordinate_map::{CoordinateMap, MapError},
    feature_table::FeatureTable,
};

/// The note added to coding sequences that lose bases to clipping.
pub const INCOMPLETE_CODING_SEQUENCE_NOTE: &str = "sequencing did not capture complete CDS";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("reference sequence not found in coordinate map: {0}")]
    MissingReferenceSequence(String),
    #[error("target sequence is empty: {0}")]
    EmptyTargetSequence(String),
    #[error("could not map position")]
    Map(#[from] MapError),
}

/// Moves a feature table from its reference sequence onto a target sequence.
///
/// The reference sequence is located in `map` by the name declared by the
/// table. Intervals that cannot be placed on the target are removed, as are
/// features left without intervals.
pub fn transfer<M>(
    table: FeatureTable,
    map: &M,
    target_sequence_name: &str,
    target_length: usize,
    policy: Policy,
) -> Result<(FeatureTable, Summary), TransferError>
where
    M: CoordinateMap,
{
    let reference_sequence_name = resolve_reference_sequence_name(map, &table)?;

    transfer_from(
        table,
        map,
        reference_sequence_name,
        target_sequence_name,
        target_length,
        policy,
    )
}

/// Moves a feature table from `reference_sequence_name` in `map` onto a target
/// sequence.
///
/// This is [`transfer`] with the reference sequence already chosen.
pub fn transfer_from<M>(
    mut table: FeatureTable,
    map: &M,
    reference_sequence_name: &str,
    target_sequence_name: &str,
    target_length: usize,
    policy: Policy,
) -> Result<(FeatureTable, Summary), TransferError>
where
    M: CoordinateMap,
{
    if !map.sequence_names().contains(&reference_sequence_name) {
        return Err(TransferError::MissingReferenceSequence(
            reference_sequence_name.into(),
        ));
    }

    let target_end = Position::new(target_length)
        .ok_or_else(|| TransferError::EmptyTargetSequence(target_sequence_name.into()))?;

    let remapper = Remapper::new(
        map,
        reference_sequence_name,
        target_sequence_name,
        target_end,
        policy,
    );

    let feature_count = table.features().len();
    table.rebind(target_sequence_name);

    let mut summary = Summary::default();

    let table = table.try_remap(|feature, interval| {
        let remapping = remapper.remap(feature.kind(), interval)?;

        summary.add_remapping(&remapping);

        if remapping.is_truncated()
            && feature.kind().is_coding_sequence()
            && feature.add_note(INCOMPLETE_CODING_SEQUENCE_NOTE)
        {
            summary.incomplete_features += 1;
        }

        let remapped_interval = remapping.into_interval();

        if remapped_interval.is_none() {
            debug!(kind = %feature.kind(), ?interval, ?remapping, "dropping interval");
        }

        Ok::<_, TransferError>(remapped_interval)
    })?;

    summary.dropped_features = (feature_count - table.features().len()) as u64;

    Ok((table, summary))
}

/// Finds the sequence in `map` that `table` is annotated on.
///
/// An exact name match is preferred. Otherwise, the first sequence with a
/// `|`-delimited field equal to the table's accession is used.
pub fn resolve_reference_sequence_name<'m, M>(
    map: &'m M,
    table: &FeatureTable,
) -> Result<&'m str, TransferError>
where
    M: CoordinateMap,
{
    let names = map.sequence_names();
    let name = table.reference_sequence_name();
    let accession = table.accession();

    names
        .iter()
        .find(|n| **n == name)
        .or_else(|| names.iter().find(|n| has_accession(n, accession)))
        .copied()
        .ok_or_else(|| TransferError::MissingReferenceSequence(name.into()))
}

/// Whether a `|`-delimited field of `name` is exactly `accession`.
pub(crate) fn has_accession(name: &str, accession: &str) -> bool {
    !accession.is_empty() && name.split('|').any(|field| field == accession)
}
