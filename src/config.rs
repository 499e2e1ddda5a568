//! User configuration.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;

/// Settings read at startup.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// A directory whose `layout/` and `img/` subdirectories override the
  /// built-in resources.
  pub resource_dir: Option<PathBuf>,
  /// The initial swap interval.
  pub swap_interval: u32,
  /// The initial backlight brightness.
  pub brightness: f32,
  /// Whether the debugging overlay starts enabled.
  pub debugging_view: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      resource_dir: None,
      swap_interval: 1,
      brightness: 0.5,
      debugging_view: false,
    }
  }
}

impl Config {
  /// Returns where the configuration file lives by default, if the platform
  /// has a configuration directory at all.
  pub fn default_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("vitrine");
    path.push("config.json");
    Some(path)
  }

  /// Loads the configuration from [`Config::default_path()`], falling back
  /// to the defaults if there is no file there.
  pub fn load() -> Result<Self, Error> {
    match Self::default_path() {
      Some(path) => Self::from_file(path),
      None => Ok(Self::default()),
    }
  }

  /// Loads the configuration from `path`. A missing file yields the
  /// defaults; a malformed one is an error.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
      Ok(json) => {
        log::info!("loading config from {}", path.display());
        Self::from_json(&json)
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
      Err(e) => Err(e.into()),
    }
  }

  /// Parses a configuration from JSON.
  pub fn from_json(json: &str) -> Result<Self, Error> {
    Ok(serde_json::from_str(json)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_config() {
    let config = Config::from_json(r#"{ "swap_interval": 0 }"#).unwrap();
    assert_eq!(
      config,
      Config {
        swap_interval: 0,
        ..Config::default()
      }
    );
  }

  #[test]
  fn missing_file_means_defaults() {
    let config = Config::from_file("/nonexistent/vitrine/config.json").unwrap();
    assert_eq!(config, Config::default());
  }

  #[test]
  fn malformed_config_is_an_error() {
    assert!(matches!(
      Config::from_json("{ \"brightness\": \"bright\" }"),
      Err(Error::Json(_))
    ));
  }
}
