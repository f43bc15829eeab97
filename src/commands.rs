mod transfer;
mod transfer_prealigned;
mod transfer_segments;

pub use self::{
    transfer::transfer, transfer_prealigned::transfer_prealigned,
    transfer_segments::{transfer_segments, SegmentCountMismatch},
};

use std::path::{Path, PathBuf};

use anyhow::Context as AnyhowContext;
use bstr::ByteSlice;
use noodles::fasta;
use tracing::{error, info};

use crate::{
    alignment::{self, Alignment},
    coordinate_map::CoordinateMap,
    feature_table::{self, FeatureTable},
    fs,
    transfer::{batch::BatchError, Summary},
};

fn read_alignment<P>(src: P) -> anyhow::Result<Alignment>
where
    P: AsRef<Path>,
{
    let src = src.as_ref();

    info!(src = ?src, "reading alignment");

    let mut reader = fs::open(src)
        .map(fasta::io::Reader::new)
        .with_context(|| format!("Could not open {}", src.display()))?;

    let alignment = alignment::read(&mut reader)
        .with_context(|| format!("Could not read alignment from {}", src.display()))?;

    info!(
        src = ?src,
        sequence_count = alignment.sequence_names().len(),
        width = alignment.width(),
        "read alignment"
    );

    Ok(alignment)
}

fn read_feature_table<P>(src: P) -> anyhow::Result<FeatureTable>
where
    P: AsRef<Path>,
{
    let src = src.as_ref();

    info!(src = ?src, "reading feature table");

    let mut reader = fs::open(src)
        .map(feature_table::Reader::new)
        .with_context(|| format!("Could not open {}", src.display()))?;

    let table = reader
        .read_feature_table()
        .with_context(|| format!("Could not read feature table from {}", src.display()))?;

    info!(
        reference_sequence_name = table.reference_sequence_name(),
        feature_count = table.features().len(),
        "read feature table"
    );

    Ok(table)
}

fn read_sequence_names<P>(src: P) -> anyhow::Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let src = src.as_ref();

    let mut reader = fs::open(src)
        .map(fasta::io::Reader::new)
        .with_context(|| format!("Could not open {}", src.display()))?;

    let mut names = Vec::new();

    for result in reader.records() {
        let record = result.with_context(|| format!("Could not read {}", src.display()))?;
        names.push(record.name().to_str_lossy().into_owned());
    }

    Ok(names)
}

/// Returns the name of the single sequence in `alignment` other than
/// `reference_sequence_name`.
fn find_target_sequence_name<'a>(
    alignment: &'a Alignment,
    reference_sequence_name: &str,
) -> anyhow::Result<&'a str> {
    let mut candidates = alignment
        .sequence_names()
        .into_iter()
        .filter(|name| *name != reference_sequence_name);

    match (candidates.next(), candidates.next()) {
        (Some(name), None) => Ok(name),
        (None, _) => anyhow::bail!("alignment has no sequence besides {reference_sequence_name}"),
        (Some(_), Some(_)) => {
            anyhow::bail!("alignment has more than one target for {reference_sequence_name}")
        }
    }
}

fn sequence_length(alignment: &Alignment, name: &str) -> anyhow::Result<usize> {
    alignment
        .sequence_length(name)
        .with_context(|| format!("missing sequence in alignment: {name}"))
}

/// Builds `<output-directory>/<name>.tbl`, replacing characters in `name`
/// that are unsafe in file names.
fn build_dst<P>(output_directory: P, name: &str) -> PathBuf
where
    P: AsRef<Path>,
{
    let file_name: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    output_directory.as_ref().join(format!("{file_name}.tbl"))
}

fn report(results: Vec<Result<Summary, BatchError>>) -> anyhow::Result<()> {
    let job_count = results.len();
    let mut total = Summary::default();
    let mut failure_count = 0;

    for result in results {
        match result {
            Ok(summary) => total.add(&summary),
            Err(e) => {
                error!("{:#}", anyhow::Error::from(e));
                failure_count += 1;
            }
        }
    }

    info!(
        job_count,
        failure_count,
        contained = total.contained,
        clipped = total.clipped,
        dropped_intervals = total.dropped_intervals(),
        dropped_features = total.dropped_features,
        incomplete_features = total.incomplete_features,
        "transferred feature tables"
    );

    if failure_count > 0 {
        anyhow::bail!("{failure_count} of {job_count} transfer(s) failed");
    }

    Ok(())
}
