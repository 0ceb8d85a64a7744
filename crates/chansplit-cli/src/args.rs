use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "chansplit")]
#[command(about = "Split a chat-server backup export into per-category and per-channel JSON files")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.chansplit)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the backup in the configured (or given) directory
    Split {
        /// Backup directory (default: split.data_dir from config)
        data_dir: Option<PathBuf>,

        /// Keep non-public categories and channels
        #[arg(long)]
        no_filter: bool,

        /// Also split channels.others into other_channels/
        #[arg(long)]
        others: bool,

        /// Do not clear output subdirectories before writing
        #[arg(long)]
        keep_stale: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Create a commented config file if none exists
    Init,

    /// Print the config file path
    Path,

    /// List all keys with their current values
    List,

    /// Get a value by dot-notation key (e.g., split.data_dir)
    Get {
        /// Config key
        key: String,
    },

    /// Set a value by dot-notation key
    Set {
        /// Config key
        key: String,

        /// New value
        value: String,
    },
}
