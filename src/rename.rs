//! Batch numbering of glob-matched files.
//!
//! A run first builds a [`RenamePlan`] from the glob matches, prints a
//! character diff for every entry, and only then (with `--write`) performs the
//! renames in plan order. The plan is never recomputed once renaming starts.

use crate::error::{RnError, RnResult};
use crate::file_ops::rename_no_clobber;
use crate::output::OutputFormatter;
use glob::MatchOptions;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Leading episode marker written by a previous numbering run, e.g. `S01E02 - `.
static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S[0-9]{2}E[0-9]{2,4} - ").expect("Invalid numbered prefix regex"));

/// Options for a rename run. Defaults mirror the CLI defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    /// Glob pattern selecting the files to rename.
    pub files: String,
    /// Perform the renames instead of only previewing them.
    pub write: bool,
    /// First sequence number.
    pub start: u64,
    /// Literal text placed before the sequence number.
    pub prefix: String,
    /// Strip a previously applied prefix instead of adding one.
    pub revert: bool,
    /// Minimum number of digits of the sequence number.
    pub width: usize,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            files: "*".to_string(),
            write: false,
            start: 1,
            prefix: "S01E".to_string(),
            revert: false,
            width: 2,
        }
    }
}

/// Sequence number cursor, advanced once per numbered file.
#[derive(Debug, Clone, Copy)]
pub struct SequenceCounter {
    next: Option<u64>,
}

impl SequenceCounter {
    pub fn new(start: u64) -> Self {
        Self { next: Some(start) }
    }

    /// Returns the current number and advances the cursor.
    ///
    /// Returns `None` once `u64::MAX` has been handed out.
    pub fn advance(&mut self) -> Option<u64> {
        let current = self.next?;
        self.next = current.checked_add(1);
        Some(current)
    }
}

/// One planned rename, with paths relative to the run's base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub original: PathBuf,
    pub renamed: PathBuf,
}

impl RenameEntry {
    /// True if applying this entry would not change anything.
    pub fn is_noop(&self) -> bool {
        self.original == self.renamed
    }
}

/// Ordered old-path to new-path mapping for one run.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    entries: Vec<RenameEntry>,
}

impl RenamePlan {
    /// Builds the plan for the entries under `base` that match `options.files`.
    ///
    /// Matches are sorted lexicographically and entries whose file name
    /// starts with `.` are skipped. Only the file name is rewritten; the
    /// parent directory of each match is kept. File names that are not valid
    /// UTF-8 are never matched by `glob` and are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RnError::Glob` if the pattern is invalid, and
    /// `RnError::SequenceOverflow` if there are more files than numbers left
    /// after `options.start`.
    pub fn build(base: &Path, options: &RenameOptions) -> RnResult<Self> {
        let mut matches = Self::glob_relative(base, &options.files)?;
        matches.sort();

        let mut counter = SequenceCounter::new(options.start);
        let mut entries = Vec::new();

        for original in matches {
            let Some(name) = original.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let new_name = if options.revert {
                reverted_name(name)
            } else {
                let number = counter.advance().ok_or(RnError::SequenceOverflow {
                    start: options.start,
                })?;
                numbered_name(&options.prefix, number, options.width, name)
            };

            let renamed = original.with_file_name(new_name);
            entries.push(RenameEntry { original, renamed });
        }

        Ok(Self { entries })
    }

    /// Expands `pattern` under `base` and returns matches relative to `base`.
    ///
    /// Paths that cannot be read while expanding (for example a directory
    /// without read permission under `*/*`) are skipped.
    fn glob_relative(base: &Path, pattern: &str) -> RnResult<Vec<PathBuf>> {
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            let escaped_base = glob::Pattern::escape(&base.to_string_lossy());
            Path::new(&escaped_base)
                .join(pattern)
                .to_string_lossy()
                .to_string()
        };

        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let mut paths = Vec::new();
        for path in glob::glob_with(&full_pattern, options)?.filter_map(Result::ok) {
            let relative = path
                .strip_prefix(base)
                .map(Path::to_path_buf)
                .unwrap_or(path);
            paths.push(relative);
        }
        Ok(paths)
    }

    pub fn entries(&self) -> &[RenameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prints one highlighted diff line per entry.
    pub fn preview(&self) {
        for entry in &self.entries {
            OutputFormatter::rename_preview(
                &entry.original.to_string_lossy(),
                &entry.renamed.to_string_lossy(),
            );
        }
    }

    /// Applies the plan under `base`, in order, stopping at the first failure.
    ///
    /// Entries that do not change the name are skipped. Returns the number of
    /// entries actually renamed.
    ///
    /// # Errors
    ///
    /// Returns `RnError::Filesystem` for the first rename that fails. Earlier
    /// renames stay applied and later entries are left untouched.
    pub fn commit(&self, base: &Path) -> RnResult<usize> {
        let mut renamed = 0;
        for entry in self.entries.iter().filter(|e| !e.is_noop()) {
            rename_no_clobber(&base.join(&entry.original), &base.join(&entry.renamed))?;
            renamed += 1;
        }
        Ok(renamed)
    }
}

/// Zero-pads `number` to at least `width` digits.
///
/// Numbers needing more digits than `width` are written in full.
pub fn pad_number(number: u64, width: usize) -> String {
    format!("{:0width$}", number, width = width)
}

/// Builds `<prefix><padded number> - <name>`.
pub fn numbered_name(prefix: &str, number: u64, width: usize, name: &str) -> String {
    format!("{}{} - {}", prefix, pad_number(number, width), name)
}

/// Removes a leading `SxxEyy - ` marker from `name`, if present.
pub fn reverted_name(name: &str) -> String {
    NUMBERED_PREFIX.replace(name, "").into_owned()
}

/// Runs a full rename: build the plan, preview it, and commit if requested.
///
/// Returns the plan that was previewed.
pub fn run_rename(base: &Path, options: &RenameOptions) -> RnResult<RenamePlan> {
    let plan = RenamePlan::build(base, options)?;
    plan.preview();

    if options.write {
        plan.commit(base)?;
    }

    Ok(plan)
}
