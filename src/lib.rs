//! Core library for `photo_copier`.
//!
//! Walks a source tree and copies every regular file into
//! `<destination>/<year>/<month name>/<file name>`, where year and month come
//! from the file's last-modification time. Per-file failures are logged and
//! never stop the walk; the walk reports how many files were copied.
//!
//! ```no_run
//! use photo_copier::prelude::*;
//! use std::path::Path;
//!
//! let mut walker = Walker::new(AlwaysOverwrite, WalkOptions::default());
//! let copied = walker.walk(Path::new("/mnt/camera"), Path::new("/srv/photos"));
//! println!("copied {copied} files");
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use config::{
    default_config_path, load_config, path_has_symlink_ancestor, validate_and_normalize, Config,
    LogLevel,
};
pub use errors::CopierError;
pub use fs_ops::{
    classify, materialize, walk, Bucket, Confirm, CopyEngine, CopyOutcome, TimeZonePolicy,
    WalkOptions, WalkSummary, Walker,
};

/// Convenience re-exports for embedding the walker.
pub mod prelude {
    pub use crate::config::{Config, LogLevel};
    pub use crate::errors::CopierError as Error;
    pub use crate::fs_ops::{
        classify, for_each_file, materialize, walk, AlwaysOverwrite, Bucket, Confirm, ConsolePrompt,
        CopyEngine, CopyOutcome, NeverOverwrite, Scripted, SourceEntry, TimeZonePolicy, WalkOptions,
        WalkSummary, Walker,
    };
    pub type CopierResult<T> = anyhow::Result<T>;
}
