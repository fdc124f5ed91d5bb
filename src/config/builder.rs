use std::path::Path;

use tracing::debug;

use super::binder::{bind, Settings};
use super::env::EnvSource;
use super::file::FileSource;
use super::source::{KeyValues, SectionSource};
use super::{ConfigError, DEFAULT_SECTION};

/// Settings supplied directly by the caller for one section.
#[derive(Debug)]
struct InlineSection {
    name: String,
    values: KeyValues,
}

impl SectionSource for InlineSection {
    fn section(&self, name: &str) -> Result<Option<KeyValues>, ConfigError> {
        Ok((self.name == name).then(|| self.values.clone()))
    }
}

/// Builder for reading settings sections from layered sources.
///
/// Sections are merged in registration order, with later sources overriding
/// individual keys of earlier ones.
///
/// ## Example
///
/// ```no_run
/// use config_binder::{settings, Config};
///
/// settings! {
///     pub struct Database {
///         host: Option<String>,
///         port: i32,
///     }
/// }
///
/// let db: Database = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_env("MYAPP", "__")
///     .with_file("config/local.toml", false)
///     .read_from_section("database")?;
/// # Ok::<(), config_binder::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until a section is read"]
pub struct Config {
    sources: Vec<Box<dyn SectionSource>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, reading fails if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Loads settings from environment variables with the given prefix.
    ///
    /// See [`EnvSource`] for how variable names map to sections and keys.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds fixed values for one section.
    pub fn with_values(self, section: impl Into<String>, values: KeyValues) -> Self {
        self.with_source(InlineSection {
            name: section.into(),
            values,
        })
    }

    /// Adds any other section provider.
    pub fn with_source(mut self, source: impl SectionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Reads a named section, merged across all sources.
    ///
    /// Fails with [`ConfigError::SectionNotFound`] if no source defines it.
    /// The default section always exists and is read like [`app_settings`](Self::app_settings).
    pub fn section(&self, name: &str) -> Result<KeyValues, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::InvalidArgument("section_name"));
        }
        if name == DEFAULT_SECTION {
            return self.app_settings();
        }
        self.merged(name)?
            .ok_or_else(|| ConfigError::SectionNotFound(name.to_owned()))
    }

    /// Reads the default section, which is empty if no source defines it.
    pub fn app_settings(&self) -> Result<KeyValues, ConfigError> {
        Ok(self.merged(DEFAULT_SECTION)?.unwrap_or_default())
    }

    /// Reads a named section and binds it into `T`.
    pub fn read_from_section<T: Settings>(&self, name: &str) -> Result<T, ConfigError> {
        bind(&self.section(name)?)
    }

    /// Reads the default section and binds it into `T`.
    pub fn read_from_app_settings<T: Settings>(&self) -> Result<T, ConfigError> {
        bind(&self.app_settings()?)
    }

    fn merged(&self, name: &str) -> Result<Option<KeyValues>, ConfigError> {
        let mut merged: Option<KeyValues> = None;

        for source in &self.sources {
            if let Some(values) = source.section(name)? {
                merged.get_or_insert_with(KeyValues::new).extend_from(values);
            }
        }

        if let Some(values) = &merged {
            debug!(section = name, keys = values.len(), "section loaded");
        }
        Ok(merged)
    }
}
