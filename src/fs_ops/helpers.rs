//! I/O error enrichment.
//!
//! Turns a bare `io::Error` into a message carrying the operation, the path and
//! a short platform-aware hint, e.g.
//!
//!   copy into bucket '/dst/2021/July/.photo_copier.1.2.tmp': Permission denied
//!   (os error 13) — permission denied; check ownership and write permissions. [os code: 13]
//!
//!   // anyhow::Result code
//!   fs::rename(&tmp, dest).map_err(io_error_with_help("replace destination", dest))?;
//!
//!   // io::Result code
//!   File::open(src).map_err(io_error_with_help_io("open source", src))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions.",
        libc::ENOENT => "path not found; the bucket directory may not have been created.",
        libc::ENOTDIR => "a path component is a regular file, not a directory.",
        libc::EISDIR => "destination is a directory; a file cannot replace it.",
        libc::ENOSPC => "insufficient space on device.",
        libc::EROFS => "read-only filesystem; cannot write here.",
        libc::EXDEV => "cross-filesystem rename attempted.",
        libc::ELOOP => "too many symbolic link levels (ELOOP); possible symlink cycle.",
        libc::ENAMETOOLONG => "filename or path too long; shorten path segments.",
        libc::EMFILE => "process file descriptor limit reached; close files or raise limits.",
        libc::ENFILE => "system-wide file table overflow; reduce open files.",
        libc::EEXIST => "already exists.",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions.",
        2 | 3 => "path not found; the bucket directory may not have been created.",
        32 => "sharing violation; file is in use.",
        112 => "insufficient disk space.",
        19 => "write protected / read-only media.",
        206 => "filename or path too long (MAX_PATH exceeded).",
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions."),
        io::ErrorKind::NotFound => Some("path not found; verify it exists."),
        io::ErrorKind::AlreadyExists => Some("already exists."),
        _ => None,
    }
}

/// Human-readable message: `<op> '<path>': <error> — <hint> [os code: N]`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {}]", code));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str(" — ");
                msg.push_str(hint);
            }
        }
    }
    msg
}

/// `.map_err` adapter producing an `anyhow::Error`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

/// `.map_err` adapter that keeps the original `ErrorKind`.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_only_error_gets_kind_hint() {
        let p = Path::new("/nowhere/file.jpg");
        let msg = describe_io_error("open source", p, &io::Error::from(io::ErrorKind::NotFound));
        assert!(msg.starts_with("open source '/nowhere/file.jpg'"));
        assert!(msg.contains("path not found"));
        assert!(!msg.contains("os code"));
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_error_gets_code_suffix() {
        let p = Path::new("/tmp");
        let msg = describe_io_error("write", p, &io::Error::from_raw_os_error(libc::ENOSPC));
        assert!(msg.contains("insufficient space"), "msg was: {msg}");
        assert!(msg.ends_with(&format!("[os code: {}]", libc::ENOSPC)));
    }
}
