use std::{fs, num::NonZeroUsize, path::Path};

use anyhow::Context as AnyhowContext;
use tracing::info;

use super::{
    build_dst, read_alignment, read_feature_table, read_sequence_names, report, sequence_length,
};
use crate::{
    coordinate_map::CoordinateMap,
    feature_table::FeatureTable,
    transfer::{has_accession, transfer_batch, Job, Policy},
};

/// Transfers the reference feature table onto every other sequence of a
/// multiple alignment.
///
/// The reference is the first aligned sequence named in `reference_src`. Its
/// feature table is picked from `annotations_srcs` by accession. One table is
/// written per remaining sequence to `output_directory`.
#[allow(clippy::too_many_arguments)]
pub fn transfer_prealigned<P, Q, R, S>(
    alignment_src: P,
    reference_src: Q,
    annotations_srcs: &[R],
    output_directory: S,
    policy: Policy,
    exclusions: &[String],
    worker_count: NonZeroUsize,
) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
    S: AsRef<Path>,
{
    let alignment_src = alignment_src.as_ref();
    let alignment = read_alignment(alignment_src)?;

    let reference_sequence_names = read_sequence_names(reference_src)?;

    let reference_sequence_name = alignment
        .sequence_names()
        .into_iter()
        .find(|name| reference_sequence_names.iter().any(|n| n == name))
        .with_context(|| {
            format!(
                "No reference sequence was found in {}",
                alignment_src.display()
            )
        })?;

    info!(reference_sequence_name, "found reference sequence");

    let mut table = None;

    for src in annotations_srcs {
        let candidate = read_feature_table(src)?;

        if is_feature_table_for(&candidate, reference_sequence_name) {
            table = Some(candidate);
            break;
        }
    }

    let table = table.with_context(|| {
        format!("No feature table was found for the reference {reference_sequence_name}")
    })?;

    let output_directory = output_directory.as_ref();

    fs::create_dir_all(output_directory)
        .with_context(|| format!("Could not create {}", output_directory.display()))?;

    let mut jobs = Vec::new();

    for target_sequence_name in alignment.sequence_names() {
        if target_sequence_name == reference_sequence_name {
            continue;
        }

        let target_length = sequence_length(&alignment, target_sequence_name)?;
        let dst = build_dst(output_directory, target_sequence_name);

        jobs.push(Job::new(
            table.clone(),
            &alignment,
            reference_sequence_name.into(),
            target_sequence_name.into(),
            target_length,
            dst,
        ));
    }

    info!(job_count = jobs.len(), "transferring features");

    let results = transfer_batch(jobs, policy, exclusions, worker_count);

    report(results)
}

fn is_feature_table_for(table: &FeatureTable, reference_sequence_name: &str) -> bool {
    has_accession(reference_sequence_name, table.accession())
}
