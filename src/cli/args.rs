//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::CommentId;

/// Select the best-scoring, depth-bounded subset of a comment thread
#[derive(Parser, Debug)]
#[command(name = "threadtrim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory searched for .threadtrim.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select the optimal comments of a thread
    Select {
        /// Thread JSON file (default: configured dataset)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Maximum selectable depth (default: configured depth_limit)
        #[arg(short = 'D', long)]
        depth: Option<usize>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show a thread as a tree, marking selected comments
    Tree {
        /// Thread JSON file (default: configured dataset)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Maximum selectable depth (default: configured depth_limit)
        #[arg(short = 'D', long)]
        depth: Option<usize>,
    },

    /// Verify a proposed selection against a thread
    Check {
        /// Thread JSON file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Selected ids in display order
        #[arg(num_args = 0.., allow_negative_numbers = true)]
        ids: Vec<CommentId>,
        /// Maximum selectable depth (default: configured depth_limit)
        #[arg(short = 'D', long)]
        depth: Option<usize>,
    },

    /// Run selection on the built-in example thread
    SelfTest,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config instead of local
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
