use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context as AnyhowContext;
use tracing::info;

use super::{find_target_sequence_name, read_alignment, read_feature_table, sequence_length};
use crate::{
    feature_table,
    transfer::{self as transfer_features, resolve_reference_sequence_name, Policy},
};

/// Transfers the features of `annotations_src` onto the target sequence of
/// `alignment_src` and writes them to `dst`.
///
/// Without `target_sequence_name`, the alignment must hold exactly one
/// sequence besides the reference.
pub fn transfer<P, Q, R>(
    alignment_src: P,
    annotations_src: Q,
    target_sequence_name: Option<&str>,
    policy: Policy,
    exclusions: &[String],
    dst: R,
) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let alignment = read_alignment(alignment_src)?;
    let table = read_feature_table(annotations_src)?;

    let reference_sequence_name = resolve_reference_sequence_name(&alignment, &table)?;

    let target_sequence_name = match target_sequence_name {
        Some(name) => name,
        None => find_target_sequence_name(&alignment, reference_sequence_name)?,
    };

    let target_length = sequence_length(&alignment, target_sequence_name)?;

    info!(
        reference_sequence_name,
        target_sequence_name,
        target_length,
        "transferring features"
    );

    let (table, summary) = transfer_features::transfer(
        table,
        &alignment,
        target_sequence_name,
        target_length,
        policy,
    )?;

    let dst = dst.as_ref();

    let file = File::create(dst)
        .map(BufWriter::new)
        .with_context(|| format!("Could not create {}", dst.display()))?;

    let mut writer = feature_table::Writer::with_exclusions(file, exclusions.to_vec());

    writer
        .write_feature_table(&table)
        .with_context(|| format!("Could not write {}", dst.display()))?;

    writer
        .into_inner()
        .flush()
        .with_context(|| format!("Could not write {}", dst.display()))?;

    info!(
        dst = ?dst,
        feature_count = table.features().len(),
        contained = summary.contained,
        clipped = summary.clipped,
        dropped_intervals = summary.dropped_intervals(),
        dropped_features = summary.dropped_features,
        incomplete_features = summary.incomplete_features,
        "wrote features"
    );

    Ok(())
}
