//! Move rules configuration.
//!
//! The `mv` subcommand reads an ordered list of rules from a JSON file
//! (`.mv.json` by default). Each rule pairs a regular expression, tested
//! against entry names in the working directory, with the directory that
//! matching entries are moved into.
//!
//! # Configuration File Format
//!
//! ```json
//! [
//!     {"regex": "\\.mkv$", "dest": "videos"},
//!     {"regex": "^IMG_", "dest": "photos"}
//! ]
//! ```
//!
//! Order matters: rules are applied one after the other, so an entry matched
//! by an earlier rule has already moved away when later rules run.

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Default rules file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".mv.json";

/// Errors that can occur while loading and compiling move rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid JSON syntax or structure.
    ConfigInvalid(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Failed to read config file: {} not found", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Failed to parse config file: {}", msg),
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Failed to compile regex '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "Failed to read config file: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A single move rule as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRule {
    /// Regular expression tested against entry names.
    pub regex: String,
    /// Directory that matching entries are moved into. Must already exist.
    pub dest: String,
}

/// The ordered list of move rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveConfig {
    pub rules: Vec<MoveRule>,
}

impl MoveConfig {
    /// Load move rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    /// Returns `ConfigError::ConfigInvalid` if JSON parsing fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_json(&content)
    }

    /// Parse move rules from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile every rule's regex, keeping file order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRegexPattern` for the first rule whose
    /// regex does not compile.
    pub fn compile(self) -> Result<CompiledRules, ConfigError> {
        let rules = self
            .rules
            .into_iter()
            .map(|rule| {
                let regex = Regex::new(&rule.regex).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: rule.regex.clone(),
                    reason: e.to_string(),
                })?;
                Ok(CompiledRule {
                    regex,
                    dest: PathBuf::from(rule.dest),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledRules { rules })
    }
}

/// A move rule with its regex compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    dest: PathBuf,
}

impl CompiledRule {
    /// Returns true if the regex matches anywhere in `name`.
    ///
    /// Matching runs on the raw bytes of the name, so names that are not
    /// valid UTF-8 can still match on their ASCII parts.
    pub fn matches(&self, name: &OsStr) -> bool {
        self.regex.is_match(name.as_encoded_bytes())
    }

    /// The destination directory of this rule.
    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

/// Compiled move rules, in configuration file order.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rules_keeps_order() {
        let config = MoveConfig::from_json(
            r#"[{"regex": "\\.mkv$", "dest": "videos"}, {"regex": "^IMG_", "dest": "photos"}]"#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.rules[0].regex, r"\.mkv$");
        assert_eq!(config.rules[0].dest, "videos");
        assert_eq!(config.rules[1].dest, "photos");
    }

    #[test]
    fn test_parse_empty_array() {
        let config = MoveConfig::from_json("[]").unwrap();
        assert!(config.rules.is_empty());
        assert!(config.compile().unwrap().iter().next().is_none());
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let config =
            MoveConfig::from_json(r#"[{"regex": "a", "dest": "b", "note": "x"}]"#).unwrap();
        assert_eq!(
            config.rules,
            vec![MoveRule {
                regex: "a".to_string(),
                dest: "b".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = MoveConfig::from_json("[{\"regex\": ");
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_parse_missing_dest() {
        let result = MoveConfig::from_json(r#"[{"regex": "a"}]"#);
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_parse_object_instead_of_array() {
        let result = MoveConfig::from_json(r#"{"regex": "a", "dest": "b"}"#);
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);

        let result = MoveConfig::load(&path);

        match result {
            Err(ConfigError::ConfigNotFound(p)) => assert_eq!(p, path),
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"[{"regex": "\\.txt$", "dest": "docs"}]"#).unwrap();

        let config = MoveConfig::load(&path).unwrap();

        assert_eq!(config.rules[0].dest, "docs");
    }

    #[test]
    fn test_compile_invalid_regex() {
        let config = MoveConfig::from_json(r#"[{"regex": "ok", "dest": "a"}, {"regex": "(", "dest": "b"}]"#)
            .unwrap();

        match config.compile() {
            Err(ConfigError::InvalidRegexPattern { pattern, reason }) => {
                assert_eq!(pattern, "(");
                assert!(!reason.is_empty());
            }
            other => panic!("Expected InvalidRegexPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_compiled_rule_matching_is_unanchored() {
        let rules = MoveConfig::from_json(r#"[{"regex": "mkv", "dest": "videos"}]"#)
            .unwrap()
            .compile()
            .unwrap();
        let rule = rules.iter().next().unwrap();

        assert!(rule.matches(OsStr::new("a.mkv")));
        assert!(rule.matches(OsStr::new("mkv-notes.txt")));
        assert!(!rule.matches(OsStr::new("a.mp4")));
        assert_eq!(rule.dest(), Path::new("videos"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_compiled_rule_matches_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let rules = MoveConfig::from_json(r#"[{"regex": "\\.mkv$", "dest": "videos"}]"#)
            .unwrap()
            .compile()
            .unwrap();
        let rule = rules.iter().next().unwrap();

        assert!(rule.matches(OsStr::from_bytes(b"caf\xe9.mkv")));
        assert!(!rule.matches(OsStr::from_bytes(b"caf\xe9.mp4")));
    }

    #[test]
    fn test_error_display_mentions_pattern() {
        let err = ConfigError::InvalidRegexPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to compile regex '(': unclosed group");
    }
}
