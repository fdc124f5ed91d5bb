//! Configuration files at well-known host locations.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// File name of a site configuration inside the site root.
pub const WEB_CONFIG_FILE: &str = "web.toml";

/// Configuration stored next to the running executable.
///
/// For `/opt/app/server` this is `/opt/app/server.toml`; the file is required.
pub fn app_config() -> Result<Config, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ExecutablePath)?;
    Ok(Config::builder().with_file(app_config_path(&exe), true))
}

/// Configuration of a hosted site, read from [`WEB_CONFIG_FILE`] in its root.
pub fn web_config(site_root: impl AsRef<Path>) -> Config {
    Config::builder().with_file(site_root.as_ref().join(WEB_CONFIG_FILE), true)
}

fn app_config_path(exe: &Path) -> PathBuf {
    exe.with_extension("toml")
}
