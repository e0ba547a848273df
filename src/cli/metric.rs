//! Metric subcommands for managing the weighted metric set

use clap::Subcommand;

/// Metric subcommands
#[derive(Subcommand, Debug)]
pub enum MetricCommands {
    /// List metrics with their weights
    List,

    /// Add a metric
    Add {
        /// Display name; the id is derived from it
        name: String,

        /// Weight out of 100 (defaults to an equal share)
        #[arg(long, short)]
        weight: Option<f64>,
    },

    /// Remove a metric and drop its values from every document
    Remove {
        /// Metric id
        id: String,
    },

    /// Change a metric's display name (the id is kept)
    Rename {
        /// Metric id
        id: String,

        /// New display name
        name: String,
    },

    /// Pin a metric's weight; the others are rescaled into the remainder
    Weight {
        /// Metric id
        id: String,

        /// Weight out of 100
        weight: f64,
    },
}
