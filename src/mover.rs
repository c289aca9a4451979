/// Rule-driven moving of directory entries.
///
/// Rules are applied in configuration order. Before each rule the working
/// directory is listed again, so an entry taken by an earlier rule is gone by
/// the time later rules look for matches.
use crate::config::{CompiledRule, CompiledRules, MoveConfig};
use crate::error::RnResult;
use crate::file_ops::{list_entry_names, rename_no_clobber};
use crate::output::OutputFormatter;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Records one matched entry and where it went (or would go).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Entry name in the working directory, exactly as listed.
    pub source: OsString,
    /// Destination path, `dest/<source>`, relative to the working directory.
    pub destination: PathBuf,
    /// False for dry-run reports.
    pub executed: bool,
}

/// Applies compiled move rules to the entries of a directory.
pub struct FileMover<'a> {
    base_path: &'a Path,
    write: bool,
}

impl<'a> FileMover<'a> {
    /// Creates a mover for `base_path`. Nothing is moved unless `write` is set.
    pub fn new(base_path: &'a Path, write: bool) -> Self {
        Self { base_path, write }
    }

    /// Applies every rule in order and returns a report per matched entry.
    ///
    /// # Errors
    ///
    /// Returns `RnError::Filesystem` if the directory cannot be listed or a
    /// move fails. Processing stops at the first failure.
    pub fn apply(&self, rules: &CompiledRules) -> RnResult<Vec<MoveReport>> {
        let mut reports = Vec::new();
        for rule in rules.iter() {
            self.apply_rule(rule, &mut reports)?;
        }
        Ok(reports)
    }

    fn apply_rule(&self, rule: &CompiledRule, reports: &mut Vec<MoveReport>) -> RnResult<()> {
        for name in list_entry_names(self.base_path)? {
            if !rule.matches(&name) {
                continue;
            }

            let destination = rule.dest().join(&name);
            if self.write {
                rename_no_clobber(
                    &self.base_path.join(&name),
                    &self.base_path.join(&destination),
                )?;
            }

            OutputFormatter::move_report(
                &name.to_string_lossy(),
                &destination.to_string_lossy(),
                self.write,
            );
            reports.push(MoveReport {
                source: name,
                destination,
                executed: self.write,
            });
        }
        Ok(())
    }
}

/// Loads the rules file and runs the move command under `base_path`.
///
/// A relative `config_path` is resolved against `base_path`. The whole rules
/// file is loaded and compiled before any entry is examined.
///
/// # Examples
///
/// ```no_run
/// use rn::mover::run_move;
/// use std::path::Path;
///
/// match run_move(Path::new("."), Path::new(".mv.json"), false) {
///     Ok(reports) => println!("{} entries matched", reports.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn run_move(base_path: &Path, config_path: &Path, write: bool) -> RnResult<Vec<MoveReport>> {
    let rules = MoveConfig::load(&base_path.join(config_path))?.compile()?;
    FileMover::new(base_path, write).apply(&rules)
}
