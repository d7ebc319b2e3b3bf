//! Attribute preservation for copied files.
//! - Timestamps (atime, mtime) via `filetime`.
//! - Unix permission bits; the readonly attribute on Windows.
//! - Extended attributes when built with the `xattrs` feature.
//!
//! Every step is best-effort: failures are logged and the copy still counts.

use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Carry `src_meta` (already fetched from `src`) over to `dest`.
pub fn preserve_attributes(src: &Path, dest: &Path, src_meta: &fs::Metadata) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        match fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            Ok(()) => trace!(path = %dest.display(), mode = format!("{:o}", mode), "copied permissions"),
            Err(e) => warn!(path = %dest.display(), mode = format!("{:o}", mode), error = %e, "failed to copy permissions"),
        }
    }

    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    match set_file_times(dest, atime, mtime) {
        Ok(()) => trace!(path = %dest.display(), "copied atime/mtime"),
        Err(e) => warn!(path = %dest.display(), error = %e, "failed to copy atime/mtime"),
    }

    // Readonly goes last on Windows; it would reject the time update above.
    #[cfg(windows)]
    {
        let readonly = src_meta.permissions().readonly();
        if readonly {
            match fs::metadata(dest) {
                Ok(meta) => {
                    let mut perms = meta.permissions();
                    perms.set_readonly(true);
                    if let Err(e) = fs::set_permissions(dest, perms) {
                        warn!(path = %dest.display(), error = %e, "failed to set readonly attribute");
                    }
                }
                Err(e) => warn!(path = %dest.display(), error = %e, "failed to stat destination"),
            }
        }
    }

    preserve_xattrs(src, dest);
}

#[cfg(feature = "xattrs")]
fn preserve_xattrs(src: &Path, dest: &Path) {
    let names = match xattr::list(src) {
        Ok(names) => names,
        Err(e) => {
            warn!(src = %src.display(), error = %e, "failed to list xattrs");
            return;
        }
    };
    for name in names {
        let shown = name.to_string_lossy().into_owned();
        match xattr::get(src, &name) {
            Ok(value) => {
                let value = value.unwrap_or_default();
                if let Err(e) = xattr::set(dest, &name, &value) {
                    warn!(dest = %dest.display(), xattr = %shown, error = %e, "failed to set xattr");
                } else {
                    trace!(dest = %dest.display(), xattr = %shown, size = value.len(), "copied xattr");
                }
            }
            Err(e) => warn!(src = %src.display(), xattr = %shown, error = %e, "failed to read xattr"),
        }
    }
}

#[cfg(not(feature = "xattrs"))]
fn preserve_xattrs(_src: &Path, _dest: &Path) {}
