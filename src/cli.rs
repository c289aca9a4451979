//! Command-line interface module for rn.
//!
//! The root command numbers files (see [`crate::rename`]); the `mv`
//! subcommand moves files according to a rules file (see [`crate::mover`]).

use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::RnResult;
use crate::mover::run_move;
use crate::rename::{RenameOptions, run_rename};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Simple tools for renaming files and so on.
#[derive(Parser, Debug)]
#[command(name = "rn", author, version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub rename: RenameArgs,
}

/// Flags of the root (rename) command.
#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Files matcher (glob pattern)
    #[arg(long, default_value = "*")]
    pub files: String,

    /// Actually do the rename (default is dry-run only)
    #[arg(long)]
    pub write: bool,

    /// Start number for renaming
    #[arg(long, default_value_t = 1)]
    pub start: u64,

    /// Prefix for renaming
    #[arg(long, default_value = "S01E")]
    pub prefix: String,

    /// Revert renaming by stripping a leading "SxxEyy - "
    #[arg(long)]
    pub revert: bool,

    /// Number width (zero padded)
    #[arg(long, default_value_t = 2)]
    pub width: usize,
}

impl From<RenameArgs> for RenameOptions {
    fn from(args: RenameArgs) -> Self {
        Self {
            files: args.files,
            write: args.write,
            start: args.start,
            prefix: args.prefix,
            revert: args.revert,
            width: args.width,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Batch move files according to config file
    Mv {
        /// Config file path
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Actually perform move operation (default is dry-run only)
        #[arg(long)]
        write: bool,
    },
}

/// Runs the parsed command line with `dir_path` as the working directory.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use rn::cli::{Cli, run_cli};
/// use std::path::Path;
///
/// let cli = Cli::parse_from(["rn", "--files", "*.mkv"]);
/// if let Err(e) = run_cli(cli, Path::new(".")) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: Cli, dir_path: &Path) -> RnResult<()> {
    match cli.command {
        Some(Command::Mv { config, write }) => {
            run_move(dir_path, &config, write)?;
        }
        None => {
            run_rename(dir_path, &cli.rename.into())?;
        }
    }
    Ok(())
}
