//! Root validation.
//! The source root must be a readable directory; the destination root is created
//! if missing and must be writable. The two must not overlap, otherwise the walk
//! would visit its own output.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::CopierError;

use super::types::Config;

impl Config {
    /// Check both roots without modifying anything except creating a missing
    /// destination root.
    pub fn validate(&self) -> Result<()> {
        let src = &self.source_root;
        let dst = &self.destination_root;

        if src.as_os_str().is_empty() || !src.is_dir() {
            return Err(CopierError::SourceRootInvalid(src.clone()).into());
        }
        fs::read_dir(src)
            .map_err(|e| CopierError::PermissionDenied {
                path: src.clone(),
                context: format!("cannot list source root: {e}"),
            })?;
        debug!(path = %src.display(), "source root readable");

        if dst.as_os_str().is_empty() {
            return Err(CopierError::DestinationRootInvalid {
                path: dst.clone(),
                context: "no destination root given".into(),
            }
            .into());
        }
        if dst.exists() && !dst.is_dir() {
            return Err(CopierError::DestinationRootInvalid {
                path: dst.clone(),
                context: "exists but is not a directory".into(),
            }
            .into());
        }
        if !dst.exists() {
            fs::create_dir_all(dst).map_err(|e| CopierError::DestinationRootInvalid {
                path: dst.clone(),
                context: format!("cannot create: {e}"),
            })?;
            info!(path = %dst.display(), "Created destination root");
        }
        writable_probe(dst).map_err(|e| CopierError::DestinationRootInvalid {
            path: dst.clone(),
            context: format!("not writable: {e}"),
        })?;
        debug!(path = %dst.display(), "destination root writable");

        let src_real = fs::canonicalize(src).with_context(|| format!("resolve '{}'", src.display()))?;
        let dst_real = fs::canonicalize(dst).with_context(|| format!("resolve '{}'", dst.display()))?;
        if src_real == dst_real {
            return Err(CopierError::DestinationRootInvalid {
                path: dst.clone(),
                context: format!("source and destination resolve to the same path '{}'", src_real.display()),
            }
            .into());
        }
        if dst_real.starts_with(&src_real) {
            return Err(CopierError::DestinationRootInvalid {
                path: dst.clone(),
                context: format!("destination must not be inside source root '{}'", src_real.display()),
            }
            .into());
        }
        if src_real.starts_with(&dst_real) {
            return Err(CopierError::DestinationRootInvalid {
                path: dst.clone(),
                context: format!("source root '{}' must not be inside destination", src_real.display()),
            }
            .into());
        }
        Ok(())
    }
}

/// Validate, then replace both roots with their canonical absolute forms.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    cfg.validate()?;
    cfg.source_root = fs::canonicalize(&cfg.source_root)?;
    cfg.destination_root = fs::canonicalize(&cfg.destination_root)?;
    info!(
        source = %cfg.source_root.display(),
        dest = %cfg.destination_root.display(),
        "Roots validated"
    );
    Ok(())
}

/// Create and remove a uniquely named file in `dir`.
fn writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".photo_copier_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new().write(true).create_new(true).open(&probe)?;
    fs::remove_file(&probe)
}
