//! XML configuration support (quick_xml + serde).
//!
//! <config>
//!   <source_root>/path/to/camera-dump</source_root>
//!   <destination_root>/path/to/archive</destination_root>
//!   <log_level>normal</log_level>
//!   <log_file>/path/to/photo_copier.log</log_file>
//!   <prompt_before_overwrite>true</prompt_before_overwrite>
//!   <preserve_attributes>true</preserve_attributes>
//!   <timezone>utc</timezone>
//! </config>
//!
//! Every element is optional. Unknown elements are rejected so typos surface
//! instead of being silently ignored. Nothing is ever written here.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{default_config_path, CONFIG_ENV};
use super::types::{Config, LogLevel};
use crate::fs_ops::TimeZonePolicy;

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_root: Option<String>,
    destination_root: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    prompt_before_overwrite: Option<String>,
    preserve_attributes: Option<String>,
    timezone: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => bail!("<{field}> must be true or false, got '{other}'"),
    }
}

fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.source_root.as_deref()) {
        cfg.source_root = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.destination_root.as_deref()) {
        cfg.destination_root = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(s) = non_empty(parsed.prompt_before_overwrite.as_deref()) {
        cfg.prompt_before_overwrite = parse_bool("prompt_before_overwrite", s)?;
    }
    if let Some(s) = non_empty(parsed.preserve_attributes.as_deref()) {
        cfg.preserve_attributes = parse_bool("preserve_attributes", s)?;
    }
    if let Some(s) = non_empty(parsed.timezone.as_deref()) {
        cfg.timezone = s.parse::<TimeZonePolicy>().map_err(anyhow::Error::msg)?;
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the config file if there is one.
///
/// - `$PHOTO_COPIER_CONFIG` set: the file must exist and parse.
/// - Otherwise the OS default location is used; a missing file yields `Ok(None)`.
pub fn load_config() -> Result<Option<(PathBuf, Config)>> {
    let explicit = std::env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        if explicit {
            bail!("{CONFIG_ENV} points to a missing file: {}", path.display());
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config file");
    Ok(Some((path, cfg)))
}
