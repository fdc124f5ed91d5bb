//! Configuration loading and binding.

mod binder;
mod builder;
mod convert;
mod env;
mod error;
mod file;
pub mod hosted;
mod source;

pub use binder::{bind, Arg, Args, Bindable, Constructor, Param, ParamType, Settings};
pub use builder::Config;
pub use convert::{
    convert_bool, convert_double, convert_int, convert_sequence, convert_string, ITEMS_DELIMITER,
};
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use source::{KeyValueSource, KeyValues, SectionSource};

/// Name of the section read when none is given.
pub const DEFAULT_SECTION: &str = "appSettings";
