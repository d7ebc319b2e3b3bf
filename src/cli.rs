//! CLI definition and parsing.
//!
//! Notes:
//! - SOURCE and DESTINATION may come from the config file instead.
//! - --debug is a shorthand for --log-level debug.
//! - --overwrite and --no-clobber are mutually exclusive.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::TimeZonePolicy;

/// Copy files into <year>/<month> folders by modification time.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Copy a directory tree into <year>/<month> folders by file modification time"
)]
pub struct Args {
    /// Directory to copy files from.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Directory to place copied files in.
    #[arg(value_name = "DESTINATION", value_hint = ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Replace existing destination files without asking.
    #[arg(long, conflicts_with = "no_clobber", help = "Replace existing files without asking")]
    pub overwrite: bool,

    /// Keep existing destination files without asking.
    #[arg(long, help = "Never replace existing files")]
    pub no_clobber: bool,

    /// Do not carry timestamps/permissions over to the copies.
    #[arg(long, help = "Do not preserve timestamps and permissions")]
    pub no_preserve: bool,

    /// Clock used to choose a file's year/month: utc (default) or local.
    #[arg(long, value_name = "ZONE", help = "Bucket by utc (default) or local time")]
    pub timezone: Option<TimeZonePolicy>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL", help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level
    }

    /// Apply CLI overrides to a loaded Config (in-place). Unset flags are no-ops.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.source {
            cfg.source_root = p.clone();
        }
        if let Some(p) = &self.destination {
            cfg.destination_root = p.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if self.overwrite {
            cfg.prompt_before_overwrite = false;
        }
        if self.no_clobber {
            cfg.prompt_before_overwrite = true;
        }
        if self.no_preserve {
            cfg.preserve_attributes = false;
        }
        if let Some(tz) = self.timezone {
            cfg.timezone = tz;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_roots() {
        let a = Args::try_parse_from(["photo_copier", "/in", "/out"]).unwrap();
        assert_eq!(a.source.as_deref(), Some(std::path::Path::new("/in")));
        assert_eq!(a.destination.as_deref(), Some(std::path::Path::new("/out")));
    }

    #[test]
    fn overrides_apply_over_config() {
        let a = Args::try_parse_from([
            "photo_copier",
            "/in",
            "/out",
            "--overwrite",
            "--no-preserve",
            "--timezone",
            "local",
            "-d",
        ])
        .unwrap();
        let mut cfg = Config::new("/cfg-in", "/cfg-out");
        a.apply_overrides(&mut cfg);
        assert_eq!(cfg.source_root, PathBuf::from("/in"));
        assert!(!cfg.prompt_before_overwrite);
        assert!(!cfg.preserve_attributes);
        assert_eq!(cfg.timezone, TimeZonePolicy::Local);
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn overwrite_and_no_clobber_conflict() {
        assert!(Args::try_parse_from(["photo_copier", "--overwrite", "--no-clobber"]).is_err());
    }

    #[test]
    fn bad_timezone_rejected() {
        assert!(Args::try_parse_from(["photo_copier", "--timezone", "mars"]).is_err());
    }

    #[test]
    fn bad_log_level_rejected() {
        assert!(Args::try_parse_from(["photo_copier", "--log-level", "loud"]).is_err());
        let a = Args::try_parse_from(["photo_copier", "--log-level", "quiet"]).unwrap();
        assert_eq!(a.effective_log_level(), Some(LogLevel::Quiet));
    }
}
