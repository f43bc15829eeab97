//! Transfers NCBI feature table annotations between aligned sequences.

pub mod alignment;
pub mod cli;
pub mod commands;
pub mod coordinate_map;
pub mod endpoint;
pub mod feature_table;
mod fs;
pub mod transfer;

pub use self::{
    alignment::Alignment,
    cli::Cli,
    coordinate_map::CoordinateMap,
    feature_table::FeatureTable,
    transfer::{transfer, Policy},
};
