//! Copy engine.
//! Places one source file at its destination path:
//! - asks the [`Confirm`] collaborator before replacing an existing destination
//!   (when prompting is on);
//! - streams into a hidden temp file next to the destination, applies attributes,
//!   then renames over the destination, so a failed copy leaves nothing behind;
//! - never returns an error: failures are logged and reported as
//!   [`CopyOutcome::Failed`].

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::CopierError;

use super::confirm::Confirm;
use super::helpers::io_error_with_help;
use super::io_copy::{copy_streaming, unique_temp_path};
use super::metadata::preserve_attributes;

/// Result of a single copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Destination now holds the source's bytes.
    Copied,
    /// Destination existed and the overwrite was declined; nothing was written.
    Skipped,
    /// An I/O error occurred; nothing was written.
    Failed,
}

/// Copies files, consulting `P` before overwriting.
#[derive(Debug)]
pub struct CopyEngine<P: Confirm> {
    confirm: P,
}

impl<P: Confirm> CopyEngine<P> {
    pub fn new(confirm: P) -> Self {
        Self { confirm }
    }

    /// The confirmation collaborator (e.g. to inspect a scripted prompt log).
    pub fn confirmer(&self) -> &P {
        &self.confirm
    }

    /// Copy `src` to `dest`.
    ///
    /// With `prompt` set and `dest` present, the collaborator decides; a "no" is
    /// a skip. Without `prompt`, an existing destination is replaced silently.
    /// `preserve` carries timestamps and permissions over to the copy.
    pub fn copy(&mut self, src: &Path, dest: &Path, prompt: bool, preserve: bool) -> CopyOutcome {
        if prompt && destination_exists(dest) {
            let question = format!("overwrite {} (yes/no)? ", dest.display());
            if !self.confirm.confirm(&question) {
                info!(src = %src.display(), dest = %dest.display(), "Overwrite declined; kept existing file");
                return CopyOutcome::Skipped;
            }
            debug!(dest = %dest.display(), "overwrite confirmed");
        }

        match stage_and_replace(src, dest, preserve) {
            Ok(bytes) => {
                info!(src = %src.display(), dest = %dest.display(), bytes, preserve, "Copied file");
                CopyOutcome::Copied
            }
            Err(e) => {
                let err = CopierError::Copy {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    context: format!("{e:#}"),
                };
                error!(code = err.code(), kind = err.kind(), src = %src.display(), dest = %dest.display(), error = %err, "Unable to copy");
                CopyOutcome::Failed
            }
        }
    }
}

fn destination_exists(dest: &Path) -> bool {
    fs::symlink_metadata(dest).is_ok()
}

/// Stream `src` into a temp sibling of `dest`, optionally preserve attributes,
/// then rename it over `dest`. The temp file is removed on any failure.
fn stage_and_replace(src: &Path, dest: &Path, preserve: bool) -> Result<u64> {
    let dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;
    let src_meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    let tmp = unique_temp_path(dir);

    let staged = (|| -> Result<u64> {
        let bytes = copy_streaming(src, &tmp)?;
        if preserve {
            preserve_attributes(src, &tmp, &src_meta);
        }
        replace_with(&tmp, dest)?;
        Ok(bytes)
    })();

    if staged.is_err() && tmp.exists() {
        let _ = fs::remove_file(&tmp);
    }
    staged
}

/// Rename `tmp` over `dest`.
fn replace_with(tmp: &Path, dest: &Path) -> Result<()> {
    // Windows rename does not overwrite, and a readonly file cannot be removed.
    #[cfg(windows)]
    if let Ok(meta) = fs::symlink_metadata(dest) {
        let mut perms = meta.permissions();
        if perms.readonly() {
            #[allow(clippy::permissions_set_readonly_false)]
            perms.set_readonly(false);
            fs::set_permissions(dest, perms).map_err(io_error_with_help("clear readonly on destination", dest))?;
        }
        fs::remove_file(dest).map_err(io_error_with_help("remove existing destination", dest))?;
    }

    fs::rename(tmp, dest).map_err(io_error_with_help("replace destination", dest))?;

    #[cfg(unix)]
    if let Some(parent) = dest.parent() {
        // Persist the rename; a failed directory fsync does not undo the copy.
        if let Ok(d) = fs::File::open(parent) {
            let _ = d.sync_all();
        }
    }
    Ok(())
}
