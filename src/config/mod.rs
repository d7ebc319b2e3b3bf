//! Configuration: types, default paths, optional XML file and root validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{Config, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{load_config, load_config_from_xml_path};
