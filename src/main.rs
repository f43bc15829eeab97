use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{io, num::NonZeroUsize, thread};

use clap::Parser;
use ferry::{
    cli::{Command, Transfer, TransferPrealigned, TransferSegments},
    commands, Cli,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Transfer(args) => transfer(args)?,
        Command::TransferPrealigned(args) => transfer_prealigned(args)?,
        Command::TransferSegments(args) => transfer_segments(args)?,
    }

    Ok(())
}

fn transfer(args: Transfer) -> anyhow::Result<()> {
    commands::transfer(
        args.alignment,
        args.annotations,
        args.target.as_deref(),
        args.policy.policy(),
        &args.policy.exclusions,
        args.output,
    )
}

fn transfer_prealigned(args: TransferPrealigned) -> anyhow::Result<()> {
    let worker_count = worker_count(args.threads);

    commands::transfer_prealigned(
        args.alignment,
        args.reference,
        &args.annotations,
        args.output_directory,
        args.policy.policy(),
        &args.policy.exclusions,
        worker_count,
    )
}

fn transfer_segments(args: TransferSegments) -> anyhow::Result<()> {
    let worker_count = worker_count(args.threads);

    commands::transfer_segments(
        &args.alignments,
        &args.annotations,
        args.output_directory,
        args.policy.policy(),
        &args.policy.exclusions,
        worker_count,
    )
}

fn worker_count(threads: Option<usize>) -> NonZeroUsize {
    threads
        .and_then(NonZeroUsize::new)
        .unwrap_or_else(|| thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
}
