//! Tree walker.
//! Depth-first traversal of the source root: every regular file is classified,
//! its bucket directory materialized, and the file handed to the copy engine.
//!
//! Notes:
//! - Directories are always descended into; nothing happens after a directory.
//! - Entries that cannot be visited are logged and skipped; the walk goes on.
//! - Symlinks are never descended into. A link to a regular file is copied by
//!   content and bucketed by the link's own timestamp; other links are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use crate::errors::CopierError;

use super::classify::{classify, TimeZonePolicy};
use super::confirm::Confirm;
use super::copy::{CopyEngine, CopyOutcome};
use super::materialize::materialize;

/// One visited filesystem node, as read during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub modified: SystemTime,
}

impl SourceEntry {
    /// Final path component, or the whole path if it has none.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// Per-walk knobs. Defaults prompt before overwriting and preserve attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub prompt_before_overwrite: bool,
    pub preserve_attributes: bool,
    pub timezone: TimeZonePolicy,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            prompt_before_overwrite: true,
            preserve_attributes: true,
            timezone: TimeZonePolicy::Utc,
        }
    }
}

/// Tallies for one completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Files the copy engine reported as copied.
    pub copied: usize,
    /// Existing destinations the user chose to keep.
    pub skipped: usize,
    /// Files whose copy failed.
    pub failed: usize,
    /// Entries that could not be visited at all.
    pub visit_errors: usize,
}

fn log_visit_failure(err: &walkdir::Error) {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let e = CopierError::Traversal { path, context: err.to_string() };
    error!(code = e.code(), kind = e.kind(), entry = %name, error = %e, "Error with entry");
}

/// Visit every regular file under `root` depth-first, calling `on_file` for each.
///
/// Symlinks to regular files count as files. Siblings are visited in file-name
/// order. Returns the number of entries that could not be visited.
pub fn for_each_file<F>(root: &Path, mut on_file: F) -> usize
where
    F: FnMut(&SourceEntry),
{
    let mut visit_errors = 0usize;
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for item in walker {
        let dent = match item {
            Ok(d) => d,
            Err(e) => {
                visit_errors += 1;
                log_visit_failure(&e);
                continue;
            }
        };

        let ftype = dent.file_type();
        if ftype.is_dir() {
            debug!(dir = %dent.path().display(), depth = dent.depth(), "descending");
            continue;
        }
        if ftype.is_symlink() {
            if !fs::metadata(dent.path()).is_ok_and(|m| m.is_file()) {
                debug!(path = %dent.path().display(), "symlink to a non-file; skipped");
                continue;
            }
        } else if !ftype.is_file() {
            debug!(path = %dent.path().display(), "not a regular file; skipped");
            continue;
        }

        let modified = match dent
            .metadata()
            .map_err(|e| e.to_string())
            .and_then(|m| m.modified().map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(context) => {
                visit_errors += 1;
                let e = CopierError::Traversal { path: dent.path().to_path_buf(), context };
                error!(code = e.code(), kind = e.kind(), entry = %dent.file_name().to_string_lossy(), error = %e, "Error with entry");
                continue;
            }
        };

        let entry = SourceEntry {
            path: dent.into_path(),
            is_dir: false,
            modified,
        };
        on_file(&entry);
    }
    visit_errors
}

/// Drives the classify → materialize → copy pipeline over a tree.
#[derive(Debug)]
pub struct Walker<P: Confirm> {
    engine: CopyEngine<P>,
    options: WalkOptions,
}

impl<P: Confirm> Walker<P> {
    pub fn new(confirm: P, options: WalkOptions) -> Self {
        Self {
            engine: CopyEngine::new(confirm),
            options,
        }
    }

    pub fn engine(&self) -> &CopyEngine<P> {
        &self.engine
    }

    /// Walk and return the number of files copied.
    pub fn walk(&mut self, source_root: &Path, destination_root: &Path) -> usize {
        self.walk_summary(source_root, destination_root).copied
    }

    /// Walk and return the full tally.
    pub fn walk_summary(&mut self, source_root: &Path, destination_root: &Path) -> WalkSummary {
        let mut summary = WalkSummary::default();
        let options = self.options;
        let engine = &mut self.engine;

        info!(source = %source_root.display(), dest = %destination_root.display(), timezone = %options.timezone, "Starting walk");

        let visit_errors = for_each_file(source_root, |entry| {
            info!(file = %entry.file_name().to_string_lossy(), "File found");

            let bucket = classify(entry.modified, options.timezone);
            let dir = materialize(destination_root, &bucket);
            let dest = dir.join(entry.file_name());
            info!(date = %bucket, "Date bucket");
            info!(dest = %dest.display(), "Copying to");

            match engine.copy(
                &entry.path,
                &dest,
                options.prompt_before_overwrite,
                options.preserve_attributes,
            ) {
                CopyOutcome::Copied => summary.copied += 1,
                CopyOutcome::Skipped => summary.skipped += 1,
                CopyOutcome::Failed => summary.failed += 1,
            }
        });
        summary.visit_errors = visit_errors;

        info!(
            copied = summary.copied,
            skipped = summary.skipped,
            failed = summary.failed,
            visit_errors = summary.visit_errors,
            "Walk finished"
        );
        summary
    }
}

/// Walk with default options (prompt before overwrite, preserve attributes, UTC)
/// and return the number of files copied.
pub fn walk(source_root: &Path, destination_root: &Path, confirm: &mut dyn Confirm) -> usize {
    Walker::new(confirm, WalkOptions::default()).walk(source_root, destination_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::confirm::{AlwaysOverwrite, Scripted};
    use assert_fs::prelude::*;
    use filetime::{set_file_mtime, FileTime};

    #[test]
    fn for_each_file_reports_only_files() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("a.txt").write_str("a").unwrap();
        td.child("sub/b.txt").write_str("b").unwrap();
        td.child("sub/deeper/c.txt").write_str("c").unwrap();
        td.child("empty").create_dir_all().unwrap();

        let mut seen = Vec::new();
        let errors = for_each_file(td.path(), |e| {
            assert!(!e.is_dir);
            seen.push(e.file_name().to_string_lossy().into_owned());
        });
        assert_eq!(errors, 0);
        assert_eq!(seen, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn missing_root_is_a_visit_error_not_a_panic() {
        let td = assert_fs::TempDir::new().unwrap();
        let errors = for_each_file(&td.path().join("nope"), |_| panic!("no files expected"));
        assert_eq!(errors, 1);
    }

    #[test]
    fn walk_buckets_by_mtime() {
        let src = assert_fs::TempDir::new().unwrap();
        let dst = assert_fs::TempDir::new().unwrap();
        let photo = src.child("photo.jpg");
        photo.write_binary(b"jpeg").unwrap();
        // 2021-07-04T12:00:00Z
        set_file_mtime(photo.path(), FileTime::from_unix_time(1_625_400_000, 0)).unwrap();

        let mut walker = Walker::new(Scripted::new([]), WalkOptions::default());
        assert_eq!(walker.walk(src.path(), dst.path()), 1);
        let out = dst.path().join("2021").join("July").join("photo.jpg");
        assert_eq!(std::fs::read(out).unwrap(), b"jpeg");
    }

    #[test]
    fn summary_counts_skips_separately() {
        let src = assert_fs::TempDir::new().unwrap();
        let dst = assert_fs::TempDir::new().unwrap();
        for name in ["a.jpg", "b.jpg"] {
            let f = src.child(name);
            f.write_str(name).unwrap();
            set_file_mtime(f.path(), FileTime::from_unix_time(1_625_400_000, 0)).unwrap();
        }
        dst.child("2021/July/a.jpg").write_str("keep me").unwrap();

        let mut walker = Walker::new(Scripted::new([false]), WalkOptions::default());
        let summary = walker.walk_summary(src.path(), dst.path());
        assert_eq!(summary, WalkSummary { copied: 1, skipped: 1, failed: 0, visit_errors: 0 });
        assert_eq!(
            std::fs::read_to_string(dst.path().join("2021/July/a.jpg")).unwrap(),
            "keep me"
        );
        assert_eq!(walker.engine().confirmer().prompts().len(), 1);
    }

    #[test]
    fn free_walk_uses_defaults() {
        let src = assert_fs::TempDir::new().unwrap();
        let dst = assert_fs::TempDir::new().unwrap();
        src.child("x/y/z.bin").write_binary(&[1, 2, 3]).unwrap();

        let mut confirm = AlwaysOverwrite;
        assert_eq!(walk(src.path(), dst.path(), &mut confirm), 1);
        assert_eq!(walk(src.path(), dst.path(), &mut confirm), 1);
    }
}
