use std::{fs, num::NonZeroUsize, path::Path};

use anyhow::Context as AnyhowContext;
use thiserror::Error;
use tracing::info;

use super::{
    build_dst, find_target_sequence_name, read_alignment, read_feature_table, report,
    sequence_length,
};
use crate::transfer::{resolve_reference_sequence_name, transfer_batch, Job, Policy};

/// The numbers of alignments and feature tables differ.
#[derive(Debug, Error, Eq, PartialEq)]
#[error(
    "segment count mismatch: got {alignment_count} alignment(s) and {table_count} feature table(s)"
)]
pub struct SegmentCountMismatch {
    pub alignment_count: usize,
    pub table_count: usize,
}

/// Transfers the feature table of each segment of a multi-segment genome.
///
/// The i-th feature table is moved using the i-th alignment, which must hold
/// the segment's reference sequence and exactly one target sequence.
pub fn transfer_segments<P, Q, R>(
    alignment_srcs: &[P],
    annotations_srcs: &[Q],
    output_directory: R,
    policy: Policy,
    exclusions: &[String],
    worker_count: NonZeroUsize,
) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    if alignment_srcs.len() != annotations_srcs.len() {
        return Err(SegmentCountMismatch {
            alignment_count: alignment_srcs.len(),
            table_count: annotations_srcs.len(),
        }
        .into());
    }

    let alignments = alignment_srcs
        .iter()
        .map(read_alignment)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let tables = annotations_srcs
        .iter()
        .map(read_feature_table)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let output_directory = output_directory.as_ref();

    fs::create_dir_all(output_directory)
        .with_context(|| format!("Could not create {}", output_directory.display()))?;

    let mut jobs = Vec::with_capacity(tables.len());

    for ((alignment, table), src) in alignments.iter().zip(tables).zip(alignment_srcs) {
        let reference_sequence_name = resolve_reference_sequence_name(alignment, &table)
            .with_context(|| format!("Invalid alignment: {}", src.as_ref().display()))?;

        let target_sequence_name = find_target_sequence_name(alignment, reference_sequence_name)
            .with_context(|| format!("Invalid alignment: {}", src.as_ref().display()))?;

        let target_length = sequence_length(alignment, target_sequence_name)?;
        let dst = build_dst(output_directory, target_sequence_name);

        jobs.push(Job::new(
            table,
            alignment,
            reference_sequence_name.into(),
            target_sequence_name.into(),
            target_length,
            dst,
        ));
    }

    info!(segment_count = jobs.len(), "transferring features");

    let results = transfer_batch(jobs, policy, exclusions, worker_count);

    report(results)
}
