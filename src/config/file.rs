//! File-based configuration source.
//!
//! A config file is a TOML document whose top-level tables are sections:
//!
//! ```toml
//! [appSettings]
//! ServerAddress = "10.0.0.1"
//!
//! [database]
//! port = 5432
//! replicas = ["db1", "db2"]
//! ```
//!
//! Values are handed to the binder as strings: scalars through their display
//! form, arrays of scalars joined with [`ITEMS_DELIMITER`].

use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::warn;

use super::convert::ITEMS_DELIMITER;
use super::source::{KeyValues, SectionSource};
use super::ConfigError;

/// A configuration source that loads sections from a TOML file.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, loading fails if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SectionSource for FileSource {
    fn section(&self, name: &str) -> Result<Option<KeyValues>, ConfigError> {
        let Some(document) = load_config_file(&self.path, self.required)? else {
            return Ok(None);
        };

        Ok(match document.get(name) {
            Some(Value::Table(table)) => Some(section_values(&self.path, name, table)),
            _ => None,
        })
    }
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn section_values(path: &Path, section: &str, table: &Table) -> KeyValues {
    let mut values = KeyValues::new();
    for (key, value) in table {
        match value_to_string(value) {
            Some(text) => {
                values.insert(key.as_str(), text);
            }
            None => warn!(
                path = %path.display(),
                section,
                key = key.as_str(),
                "skipping nested value, settings must be flat"
            ),
        }
    }
    values
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let items = items.iter().map(scalar_to_string).collect::<Option<Vec<_>>>()?;
            let delimiter = ITEMS_DELIMITER.to_string();
            Some(items.join(delimiter.as_str()))
        }
        other => scalar_to_string(other),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(dt) => Some(dt.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::KeyValueSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_file_source_loads_section() {
        let file = write_config(
            r#"
            [appSettings]
            ServerAddress = "10.0.0.1"

            [database]
            host = "db"
            "#,
        );

        let source = FileSource::new(file.path(), true);
        let section = source.section("appSettings").unwrap().unwrap();

        assert_eq!(section.len(), 1);
        assert_eq!(section.lookup("ServerAddress"), Some("10.0.0.1"));
        assert_eq!(section.lookup("host"), None);
    }

    #[test]
    fn test_scalars_are_stringified() {
        let file = write_config(
            r#"
            [limits]
            retries = 3
            ratio = 10.3
            enabled = true
            started = 2024-01-02T03:04:05Z
            "#,
        );

        let section = FileSource::new(file.path(), true)
            .section("limits")
            .unwrap()
            .unwrap();

        assert_eq!(section.lookup("retries"), Some("3"));
        assert_eq!(section.lookup("ratio"), Some("10.3"));
        assert_eq!(section.lookup("enabled"), Some("true"));
        assert_eq!(section.lookup("started"), Some("2024-01-02T03:04:05Z"));
    }

    #[test]
    fn test_arrays_are_joined() {
        let file = write_config(
            r#"
            [cluster]
            ports = [34, 30, 40]
            hosts = ["a", "b"]
            "#,
        );

        let section = FileSource::new(file.path(), true)
            .section("cluster")
            .unwrap()
            .unwrap();

        assert_eq!(section.lookup("ports"), Some("34;30;40"));
        assert_eq!(section.lookup("hosts"), Some("a;b"));
    }

    #[test]
    fn test_nested_tables_are_skipped() {
        let file = write_config(
            r#"
            [server]
            port = 80

            [server.tls]
            cert = "x.pem"
            "#,
        );

        let section = FileSource::new(file.path(), true)
            .section("server")
            .unwrap()
            .unwrap();

        assert_eq!(section.lookup("port"), Some("80"));
        assert_eq!(section.lookup("tls"), None);
    }

    #[test]
    fn test_missing_section_is_none() {
        let file = write_config("top = 1\n[present]\nkey = 1\n");
        let source = FileSource::new(file.path(), true);

        assert!(source.section("absent").unwrap().is_none());
        assert!(source.section("top").unwrap().is_none());
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/config.toml", true);
        let result = source.section("appSettings");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/config.toml", false);
        assert!(source.section("appSettings").unwrap().is_none());
    }

    #[test]
    fn test_file_source_invalid_toml() {
        let file = write_config("[broken\n");
        let result = FileSource::new(file.path(), true).section("broken");

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
