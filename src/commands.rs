//! CLI command definitions
//!
//! Defines the clap commands for the fixture CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the feature title and fixture file a test name maps to
    Name {
        /// Test function name, e.g. tests::test_sum_operation
        test: String,

        /// Directory holding the fixture files (default: from bdd.toml)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Decode a fixture file and list its contexts
    Check {
        /// Fixture file (.json, .yml or .yaml)
        file: PathBuf,
    },

    /// Print one value of a fixture record
    Get {
        /// Fixture file (.json, .yml or .yaml)
        file: PathBuf,

        /// Context title, exactly as used in the test
        context: String,

        /// Key starting with 'input.' or 'golden.', e.g. golden.sum
        key: String,

        /// Record index within the context
        #[arg(long, short, default_value_t = 0)]
        index: usize,
    },

    /// Re-encode a fixture file in the format of the destination extension
    Convert {
        /// Source fixture file
        source: PathBuf,

        /// Destination fixture file
        dest: PathBuf,
    },
}
