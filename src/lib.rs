//! Binds flat key-value settings into immutable, strongly-typed settings types.

mod macros;

pub mod config;

pub use config::{
    bind, hosted, Arg, Args, Bindable, Config, ConfigError, Constructor, EnvSource, FileSource,
    KeyValueSource, KeyValues, Param, ParamType, SectionSource, Settings, DEFAULT_SECTION,
    ITEMS_DELIMITER,
};
