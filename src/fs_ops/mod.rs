//! Filesystem operations: bucket classification, directory materialization,
//! the copy engine and the tree walker that drives them.

mod classify;
mod confirm;
mod copy;
mod helpers;
mod io_copy;
mod materialize;
mod metadata;
mod walk;

pub use classify::{classify, Bucket, TimeZonePolicy};
pub use confirm::{is_affirmative, AlwaysOverwrite, Confirm, ConsolePrompt, NeverOverwrite, Scripted};
pub use copy::{CopyEngine, CopyOutcome};
pub use helpers::{describe_io_error, io_error_with_help, io_error_with_help_io};
pub use materialize::{materialize, try_materialize};
pub use metadata::preserve_attributes;
pub use walk::{for_each_file, walk, SourceEntry, WalkOptions, WalkSummary, Walker};
