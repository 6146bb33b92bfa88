//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Drag-and-drop reordering for sectioned dashboard layouts
#[derive(Parser, Debug)]
#[command(name = "dashlayout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Dashboard document (default: `layout_file` setting)
    #[arg(short, long, global = true, env = "DASHLAYOUT_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the addressable tree with drag indices
    Tree {
        /// Include section end slots
        #[arg(short, long)]
        ends: bool,
    },

    /// Move the node at SOURCE to DESTINATION
    Move {
        /// Drag index of the dragged node
        #[arg(allow_negative_numbers = true)]
        source: isize,
        /// Drag index of the drop target
        #[arg(allow_negative_numbers = true)]
        destination: isize,
        /// Print the result without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Manage the metric list
    Metric {
        #[command(subcommand)]
        command: MetricCommands,
    },

    /// Rebuild order and childIds from section membership
    Normalize {
        /// Print the result without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Verify layout invariants
    Check,

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
pub enum MetricCommands {
    /// List metrics in order
    List,
    /// Move the metric at FROM to TO
    Move {
        #[arg(allow_negative_numbers = true)]
        from: isize,
        #[arg(allow_negative_numbers = true)]
        to: isize,
        /// Print the result without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a template config file
    Template,
}
