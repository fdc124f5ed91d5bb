use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("argument '{0}' must not be empty")]
    InvalidArgument(&'static str),

    #[error("section \"{0}\" not found")]
    SectionNotFound(String),

    #[error("settings type {type_name} must have exactly one constructor taking every setting as a parameter (found {found})")]
    Shape {
        type_name: &'static str,
        found: usize,
    },

    #[error("cannot construct {settings}: parameter \"{param}\" has unsupported type {type_name}")]
    UnsupportedType {
        param: String,
        type_name: String,
        settings: &'static str,
    },

    #[error("constructor argument #{position} is not a {expected}")]
    ArgumentMismatch {
        position: usize,
        expected: &'static str,
    },

    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot locate the running executable: {0}")]
    ExecutablePath(#[source] std::io::Error),
}
