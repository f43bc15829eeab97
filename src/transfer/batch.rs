//! Parallel transfers of independent feature tables.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};

use thiserror::Error;
use tracing::info;

use super::{transfer_from, Policy, Summary, TransferError};
use crate::{
    coordinate_map::CoordinateMap,
    feature_table::{self, FeatureTable},
};

/// A feature table to be moved from a reference sequence onto a target sequence
/// and written to `dst`.
pub struct Job<'a, M> {
    table: FeatureTable,
    map: &'a M,
    reference_sequence_name: String,
    target_sequence_name: String,
    target_length: usize,
    dst: PathBuf,
}

impl<'a, M> Job<'a, M> {
    pub fn new(
        table: FeatureTable,
        map: &'a M,
        reference_sequence_name: String,
        target_sequence_name: String,
        target_length: usize,
        dst: PathBuf,
    ) -> Self {
        Self {
            table,
            map,
            reference_sequence_name,
            target_sequence_name,
            target_length,
            dst,
        }
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("could not transfer features to {1}")]
    Transfer(#[source] TransferError, String),
    #[error("could not write {}", .1.display())]
    Write(#[source] io::Error, PathBuf),
}

/// Runs each job on a pool of `worker_count` threads.
///
/// Results are returned in job order. A failed job does not stop the others.
pub fn transfer_batch<M>(
    jobs: Vec<Job<'_, M>>,
    policy: Policy,
    exclusions: &[String],
    worker_count: NonZeroUsize,
) -> Vec<Result<Summary, BatchError>>
where
    M: CoordinateMap + Sync,
{
    let job_count = jobs.len();

    thread::scope(move |scope| {
        let (tx, rx) = crossbeam_channel::bounded(worker_count.get());

        scope.spawn(move || {
            for (i, job) in jobs.into_iter().enumerate() {
                tx.send((i, job)).expect("job channel unexpectedly closed");
            }
        });

        let handles: Vec<_> = (0..worker_count.get())
            .map(|_| {
                let rx = rx.clone();

                scope.spawn(move || {
                    let mut results = Vec::new();

                    while let Ok((i, job)) = rx.recv() {
                        results.push((i, run(job, policy, exclusions)));
                    }

                    results
                })
            })
            .collect();

        let mut results = Vec::with_capacity(job_count);

        for handle in handles {
            results.extend(handle.join().unwrap());
        }

        results.sort_unstable_by_key(|(i, _)| *i);
        results.into_iter().map(|(_, result)| result).collect()
    })
}

fn run<M>(job: Job<'_, M>, policy: Policy, exclusions: &[String]) -> Result<Summary, BatchError>
where
    M: CoordinateMap,
{
    let Job {
        table,
        map,
        reference_sequence_name,
        target_sequence_name,
        target_length,
        dst,
    } = job;

    info!(
        reference_sequence_name = reference_sequence_name.as_str(),
        target_sequence_name = target_sequence_name.as_str(),
        target_length,
        "transferring features"
    );

    let (table, summary) = transfer_from(
        table,
        map,
        &reference_sequence_name,
        &target_sequence_name,
        target_length,
        policy,
    )
    .map_err(|e| BatchError::Transfer(e, target_sequence_name.clone()))?;

    write_feature_table(&dst, &table, exclusions).map_err(|e| BatchError::Write(e, dst.clone()))?;

    info!(
        target_sequence_name = target_sequence_name.as_str(),
        dst = ?dst,
        feature_count = table.features().len(),
        contained = summary.contained,
        clipped = summary.clipped,
        dropped_intervals = summary.dropped_intervals(),
        dropped_features = summary.dropped_features,
        "wrote features"
    );

    Ok(summary)
}

fn write_feature_table(dst: &Path, table: &FeatureTable, exclusions: &[String]) -> io::Result<()> {
    let file = File::create(dst).map(BufWriter::new)?;
    let mut writer = feature_table::Writer::with_exclusions(file, exclusions.to_vec());
    writer.write_feature_table(table)?;
    writer.into_inner().flush()
}
