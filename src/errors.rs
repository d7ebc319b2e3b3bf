//! Typed error definitions for photo_copier.
//! Provides the well-known failure modes of a walk for structured logs and tests.
//!
//! None of the per-entry variants abort a walk: they are logged where they occur
//! and the walk moves on to the next entry.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopierError {
    #[error("Source root is not a readable directory: {0}")]
    SourceRootInvalid(PathBuf),

    #[error("Destination root is unusable {path}: {context}")]
    DestinationRootInvalid { path: PathBuf, context: String },

    #[error("Could not visit {path}: {context}")]
    Traversal { path: PathBuf, context: String },

    #[error("Could not create bucket directory {path}: {context}")]
    DirectoryCreation { path: PathBuf, context: String },

    #[error("Unable to copy {src} -> {dest}: {context}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        context: String,
    },

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },
}

impl CopierError {
    /// Stable numeric code, emitted as a log field.
    pub fn code(&self) -> u16 {
        match self {
            CopierError::SourceRootInvalid(_) => 10,
            CopierError::DestinationRootInvalid { .. } => 11,
            CopierError::Traversal { .. } => 20,
            CopierError::DirectoryCreation { .. } => 30,
            CopierError::Copy { .. } => 40,
            CopierError::PermissionDenied { .. } => 50,
        }
    }

    /// Short snake_case label, emitted as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CopierError::SourceRootInvalid(_) => "source_root_invalid",
            CopierError::DestinationRootInvalid { .. } => "destination_root_invalid",
            CopierError::Traversal { .. } => "traversal",
            CopierError::DirectoryCreation { .. } => "directory_creation",
            CopierError::Copy { .. } => "copy",
            CopierError::PermissionDenied { .. } => "permission_denied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let p = PathBuf::from("/x");
        let all = [
            CopierError::SourceRootInvalid(p.clone()),
            CopierError::DestinationRootInvalid { path: p.clone(), context: String::new() },
            CopierError::Traversal { path: p.clone(), context: String::new() },
            CopierError::DirectoryCreation { path: p.clone(), context: String::new() },
            CopierError::Copy { src: p.clone(), dest: p.clone(), context: String::new() },
            CopierError::PermissionDenied { path: p, context: String::new() },
        ];
        let mut codes: Vec<u16> = all.iter().map(CopierError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn copy_error_mentions_both_paths() {
        let e = CopierError::Copy {
            src: PathBuf::from("/src/a.jpg"),
            dest: PathBuf::from("/dst/2021/July/a.jpg"),
            context: "disk full".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("/src/a.jpg"));
        assert!(msg.contains("/dst/2021/July/a.jpg"));
        assert!(msg.contains("disk full"));
        assert_eq!(e.kind(), "copy");
    }
}
