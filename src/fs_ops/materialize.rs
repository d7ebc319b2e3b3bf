//! Bucket directory creation.
//! Ensures `<root>/<year>/<month>` exists. An existing directory is not an
//! error; a failed creation is logged and left to surface as a copy failure.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use crate::errors::CopierError;

use super::classify::Bucket;
use super::helpers::describe_io_error;

/// Create the bucket directory (and any missing parents) under `root`.
pub fn try_materialize(root: &Path, bucket: &Bucket) -> Result<PathBuf, CopierError> {
    let dir = root.join(bucket.relative_path());
    match fs::create_dir_all(&dir) {
        Ok(()) => {
            trace!(path = %dir.display(), "bucket directory ready");
            Ok(dir)
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Err(CopierError::PermissionDenied {
            context: describe_io_error("create bucket directory", &dir, &e),
            path: dir,
        }),
        Err(e) => Err(CopierError::DirectoryCreation {
            context: describe_io_error("create bucket directory", &dir, &e),
            path: dir,
        }),
    }
}

/// Like [`try_materialize`], but a failure is logged and the computed path is
/// returned anyway so the walk can continue.
pub fn materialize(root: &Path, bucket: &Bucket) -> PathBuf {
    match try_materialize(root, bucket) {
        Ok(dir) => dir,
        Err(e) => {
            warn!(code = e.code(), kind = e.kind(), error = %e, "bucket directory not created; continuing");
            root.join(bucket.relative_path())
        }
    }
}
