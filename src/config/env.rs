use super::source::{KeyValues, SectionSource};
use super::{ConfigError, DEFAULT_SECTION};

/// Settings read from environment variables.
///
/// With prefix `MYAPP` and separator `__`:
/// - `MYAPP__Timeout` sets `Timeout` in the default section
/// - `MYAPP__database__port` sets `port` in the `database` section
///
/// Deeper paths are ignored. Names keep their case, since setting keys are
/// matched exactly.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    fn collect_section<I>(&self, name: &str, vars: I) -> Option<KeyValues>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut values = KeyValues::new();
        let mut found = false;

        for (key, value) in vars {
            let Some(path) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };

            let segments: Vec<&str> = path.split(&self.separator).collect();
            let (section, setting) = match segments.as_slice() {
                [setting] => (DEFAULT_SECTION, *setting),
                [section, setting] => (*section, *setting),
                _ => continue,
            };

            if section != name || section.is_empty() {
                continue;
            }
            found = true;
            if !setting.is_empty() {
                values.insert(setting, value);
            }
        }

        found.then_some(values)
    }
}

impl SectionSource for EnvSource {
    fn section(&self, name: &str) -> Result<Option<KeyValues>, ConfigError> {
        Ok(self.collect_section(name, std::env::vars()))
    }
}
