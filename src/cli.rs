use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use git_testament::{git_testament, render_testament};

use crate::transfer::Policy;

git_testament!(TESTAMENT);

#[derive(Parser)]
#[command(version = render_testament!(TESTAMENT))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transfer a feature table to an aligned sequence.
    Transfer(Transfer),
    /// Transfer a feature table to every other sequence of a multiple alignment.
    TransferPrealigned(TransferPrealigned),
    /// Transfer one feature table per segment, each with its own alignment.
    TransferSegments(TransferSegments),
}

#[derive(Args)]
pub struct PolicyArgs {
    /// Truncate features that are partly out of bounds instead of dropping them.
    ///
    /// Features that are completely out of bounds are always dropped.
    #[arg(long)]
    pub clip_out_of_bounds: bool,

    /// Interpret ambiguous feature edges ("<N" or ">N") as exact positions.
    #[arg(long)]
    pub ignore_ambiguous_edges: bool,

    /// Omit output lines containing this pattern. Can be given multiple times.
    #[arg(
        long = "exclude",
        value_name = "PATTERN",
        default_values_t = [String::from("protein_id")]
    )]
    pub exclusions: Vec<String>,
}

impl PolicyArgs {
    pub fn policy(&self) -> Policy {
        Policy::new(self.clip_out_of_bounds, self.ignore_ambiguous_edges)
    }
}

#[derive(Parser)]
pub struct Transfer {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Name of the aligned sequence to transfer to.
    ///
    /// Required when the alignment has more than one sequence besides the
    /// reference.
    #[arg(long)]
    pub target: Option<String>,

    /// Output destination for the transferred feature table.
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Input alignment (gapped FASTA) of the reference and target sequences.
    pub alignment: PathBuf,

    /// Input reference feature table (NCBI TBL).
    pub annotations: PathBuf,
}

#[derive(Parser)]
pub struct TransferPrealigned {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Input reference sequences (FASTA), used to find the reference in the
    /// alignment.
    #[arg(short = 'r', long)]
    pub reference: PathBuf,

    /// Output directory for the transferred feature tables.
    #[arg(short = 'o', long)]
    pub output_directory: PathBuf,

    /// Force a specific number of threads.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Input multiple alignment (gapped FASTA) including the reference.
    pub alignment: PathBuf,

    /// Input reference feature tables (NCBI TBL).
    #[arg(required = true)]
    pub annotations: Vec<PathBuf>,
}

#[derive(Parser)]
pub struct TransferSegments {
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Input alignments (gapped FASTA), one per segment.
    #[arg(long, num_args = 1.., required = true)]
    pub alignments: Vec<PathBuf>,

    /// Input reference feature tables (NCBI TBL), one per segment, in the
    /// same order as the alignments.
    #[arg(long, num_args = 1.., required = true)]
    pub annotations: Vec<PathBuf>,

    /// Force a specific number of threads.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output directory for the transferred feature tables.
    pub output_directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transfer() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "ferry",
            "transfer",
            "--clip-out-of-bounds",
            "-o",
            "out.tbl",
            "aln.fa",
            "ref.tbl",
        ])?;

        let Command::Transfer(args) = cli.command else {
            panic!("expected transfer command");
        };

        assert_eq!(args.policy.policy(), Policy::new(true, false));
        assert_eq!(args.policy.exclusions, [String::from("protein_id")]);
        assert!(args.target.is_none());
        assert_eq!(args.alignment, PathBuf::from("aln.fa"));

        Ok(())
    }

    #[test]
    fn test_parse_transfer_segments() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "ferry",
            "transfer-segments",
            "--ignore-ambiguous-edges",
            "--exclude",
            "note",
            "--alignments",
            "s0.fa",
            "s1.fa",
            "--annotations",
            "s0.tbl",
            "s1.tbl",
            "out",
        ])?;

        let Command::TransferSegments(args) = cli.command else {
            panic!("expected transfer-segments command");
        };

        assert_eq!(args.policy.policy(), Policy::new(false, true));
        assert_eq!(args.policy.exclusions, [String::from("note")]);
        assert_eq!(args.alignments.len(), 2);
        assert_eq!(args.annotations.len(), 2);
        assert_eq!(args.output_directory, PathBuf::from("out"));

        Ok(())
    }
}
