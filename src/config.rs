use std::fs;
use std::io;
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::hash_table::CollisionResolution;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub capacity: usize,
    pub collision_resolution: CollisionResolution,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig { capacity: DEFAULT_CAPACITY, collision_resolution: CollisionResolution::Chaining }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: "info".to_string() }
    }
}

impl LoggingConfig {
    /// Parsed level, falling back to `Info` for unrecognized names.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration at `path`. Returns `None` if the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Config>, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io { path: path.to_path_buf(), source }),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.table.capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = Config::from_toml(
            r#"
            [table]
            capacity = 127
            collision_resolution = "linear_probing"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.table.capacity, 127);
        assert_eq!(config.table.collision_resolution, CollisionResolution::LinearProbing);
        assert_eq!(config.logging.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_toml("[table]\ncapacity = 3\n").unwrap();
        assert_eq!(config.table.capacity, 3);
        assert_eq!(config.table.collision_resolution, CollisionResolution::Chaining);
        assert_eq!(config.logging, LoggingConfig::default());

        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Config::from_toml("[table]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCapacity));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = Config::from_toml("[table]\ncollision_resolution = \"cuckoo\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let logging = LoggingConfig { level: "loud".to_string() };
        assert_eq!(logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn missing_file_is_reported_as_none() {
        assert_eq!(Config::load("definitely/not/here/config.toml").unwrap(), None);
    }

    #[test]
    fn directory_path_is_an_io_error() {
        let err = Config::load(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
