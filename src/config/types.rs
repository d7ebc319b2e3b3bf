//! Core configuration types.
//! - Config holds the two roots and the walk/logging settings.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::{TimeZonePolicy, WalkOptions};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Per-file progress (default)
    #[default]
    Normal,
    /// Adds directory descent and prompt decisions
    Info,
    /// Everything, including attribute-level detail
    Debug,
}

impl LogLevel {
    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tree to read files from
    pub source_root: PathBuf,
    /// Root under which `<year>/<month>` buckets are created
    pub destination_root: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional log file (in addition to stdout)
    pub log_file: Option<PathBuf>,
    /// Ask before replacing an existing destination file
    pub prompt_before_overwrite: bool,
    /// Carry timestamps and permissions over to copies
    pub preserve_attributes: bool,
    /// Clock used to pick a file's bucket
    pub timezone: TimeZonePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: PathBuf::new(),
            destination_root: PathBuf::new(),
            log_level: LogLevel::Normal,
            log_file: None,
            prompt_before_overwrite: true,
            preserve_attributes: true,
            timezone: TimeZonePolicy::Utc,
        }
    }
}

impl Config {
    /// Config with explicit roots; everything else defaulted.
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            ..Default::default()
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            prompt_before_overwrite: self.prompt_before_overwrite,
            preserve_attributes: self.preserve_attributes,
            timezone: self.timezone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_walk_defaults() {
        let cfg = Config::new("/src", "/dst");
        assert_eq!(cfg.walk_options(), WalkOptions::default());
        assert_eq!(cfg.log_level, LogLevel::Normal);
    }

    #[test]
    fn log_level_round_trips_through_display() {
        for lvl in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Info, LogLevel::Debug] {
            assert_eq!(lvl.to_string().parse::<LogLevel>().unwrap(), lvl);
        }
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
