//! rn - batch renaming and moving of files
//!
//! This library numbers glob-matched files with a prefix and zero-padded
//! sequence number (and strips that numbering again), previewing every change
//! as a character diff, and moves directory entries into destination
//! directories according to ordered regex rules read from a JSON file.
//! Both commands are dry-run unless asked to write.

pub mod cli;
pub mod config;
pub mod error;
pub mod file_ops;
pub mod mover;
pub mod output;
pub mod rename;

pub use config::{CompiledRules, ConfigError, MoveConfig, MoveRule};
pub use error::{RnError, RnResult};
pub use file_ops::FilesystemError;
pub use mover::{FileMover, MoveReport, run_move};
pub use rename::{RenameOptions, RenamePlan, run_rename};

pub use cli::{Cli, run_cli};
