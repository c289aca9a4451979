//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: the character diffs
//! shown for renames, the move report lines, and error messages.

use colored::*;
use similar::{ChangeTag, TextDiff};

/// A run of characters that a diff kept, removed or added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSegment {
    Equal(String),
    Delete(String),
    Insert(String),
}

impl DiffSegment {
    fn new(tag: ChangeTag, text: &str) -> Self {
        match tag {
            ChangeTag::Equal => DiffSegment::Equal(text.to_string()),
            ChangeTag::Delete => DiffSegment::Delete(text.to_string()),
            ChangeTag::Insert => DiffSegment::Insert(text.to_string()),
        }
    }

    fn tag(&self) -> ChangeTag {
        match self {
            DiffSegment::Equal(_) => ChangeTag::Equal,
            DiffSegment::Delete(_) => ChangeTag::Delete,
            DiffSegment::Insert(_) => ChangeTag::Insert,
        }
    }

    fn push_str(&mut self, text: &str) {
        match self {
            DiffSegment::Equal(run) | DiffSegment::Delete(run) | DiffSegment::Insert(run) => {
                run.push_str(text)
            }
        }
    }
}

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Computes a character-level diff from `old` to `new`.
    ///
    /// Consecutive characters with the same change kind are merged into one
    /// segment, so `"a.mkv"` -> `"S01E01 - a.mkv"` yields a single insertion
    /// followed by a single equal run.
    pub fn diff_segments(old: &str, new: &str) -> Vec<DiffSegment> {
        let diff = TextDiff::from_chars(old, new);
        let mut segments: Vec<DiffSegment> = Vec::new();

        for change in diff.iter_all_changes() {
            let tag = change.tag();
            if let Some(last) = segments.last_mut()
                && last.tag() == tag
            {
                last.push_str(change.value());
                continue;
            }
            segments.push(DiffSegment::new(tag, change.value()));
        }

        segments
    }

    /// Renders the diff from `old` to `new` as a single highlighted line.
    ///
    /// Deleted text is red and struck through, inserted text is green.
    pub fn render_diff(old: &str, new: &str) -> String {
        Self::diff_segments(old, new)
            .iter()
            .map(|segment| match segment {
                DiffSegment::Equal(text) => text.normal().to_string(),
                DiffSegment::Delete(text) => text.red().strikethrough().to_string(),
                DiffSegment::Insert(text) => text.green().to_string(),
            })
            .collect()
    }

    /// Prints the rename preview line for one file.
    pub fn rename_preview(old: &str, new: &str) {
        println!("{}", Self::render_diff(old, new));
    }

    /// Formats a move report line.
    ///
    /// `executed` selects between `Moved` (green) and the dry-run wording
    /// (yellow).
    pub fn format_move(source: &str, destination: &str, executed: bool) -> String {
        let label = if executed {
            "Moved".green()
        } else {
            "[dry-run] Will move".yellow()
        };
        format!(
            "{}: {} {} {}",
            label,
            source.cyan(),
            "→".magenta(),
            destination.cyan()
        )
    }

    /// Prints a move report line.
    pub fn move_report(source: &str, destination: &str, executed: bool) {
        println!("{}", Self::format_move(source, destination, executed));
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rn::output::OutputFormatter;
    /// OutputFormatter::error("Failed to read config file");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_segments_prefix_insertion() {
        let segments = OutputFormatter::diff_segments("a.mkv", "S01E01 - a.mkv");
        assert_eq!(
            segments,
            vec![
                DiffSegment::Insert("S01E01 - ".to_string()),
                DiffSegment::Equal("a.mkv".to_string()),
            ]
        );
    }

    #[test]
    fn test_diff_segments_prefix_removal() {
        let segments = OutputFormatter::diff_segments("S01E01 - a.mkv", "a.mkv");
        assert_eq!(
            segments,
            vec![
                DiffSegment::Delete("S01E01 - ".to_string()),
                DiffSegment::Equal("a.mkv".to_string()),
            ]
        );
    }

    #[test]
    fn test_diff_segments_identical() {
        let segments = OutputFormatter::diff_segments("same.txt", "same.txt");
        assert_eq!(segments, vec![DiffSegment::Equal("same.txt".to_string())]);
    }

    #[test]
    fn test_diff_segments_reassemble_both_sides() {
        let old = "episode one.mkv";
        let new = "S02E10 - episode one.mkv";
        let segments = OutputFormatter::diff_segments(old, new);

        let rebuilt_old: String = segments
            .iter()
            .filter_map(|s| match s {
                DiffSegment::Equal(t) | DiffSegment::Delete(t) => Some(t.as_str()),
                DiffSegment::Insert(_) => None,
            })
            .collect();
        let rebuilt_new: String = segments
            .iter()
            .filter_map(|s| match s {
                DiffSegment::Equal(t) | DiffSegment::Insert(t) => Some(t.as_str()),
                DiffSegment::Delete(_) => None,
            })
            .collect();

        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }

    #[test]
    fn test_format_move_contains_paths() {
        let line = OutputFormatter::format_move("a.mkv", "videos/a.mkv", false);
        assert!(line.contains("[dry-run] Will move"));
        assert!(line.contains("a.mkv"));
        assert!(line.contains("videos/a.mkv"));
        assert!(line.contains("→"));

        let line = OutputFormatter::format_move("a.mkv", "videos/a.mkv", true);
        assert!(line.contains("Moved"));
        assert!(!line.contains("dry-run"));
    }
}
