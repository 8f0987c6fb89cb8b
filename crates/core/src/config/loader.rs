//! Configuration file loading and environment overrides

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// File names searched in the working directory when no path is given
pub const CONFIG_CANDIDATES: [&str; 3] = [
    "photoboost.toml",
    ".photoboost.toml",
    ".config/photoboost.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Resolved settings
    pub schema: ConfigSchema,
    /// File the settings were read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations, then
    /// apply `PHOTOBOOST_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading overrides through `lookup`
    pub fn load_with_env(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_env_overrides(&mut schema, lookup)?;
        schema
            .validate()
            .context("While validating configuration")?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}

fn apply_env_overrides(
    schema: &mut ConfigSchema,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(host) = lookup("PHOTOBOOST_HOST") {
        schema.server.host = host;
    }
    if let Some(port) = lookup("PHOTOBOOST_PORT") {
        schema.server.port = parse_env("PHOTOBOOST_PORT", &port)?;
    }
    if let Some(dir) = lookup("PHOTOBOOST_STORAGE_DIR") {
        schema.storage.dir = PathBuf::from(dir);
    }
    if let Some(quality) = lookup("PHOTOBOOST_JPEG_QUALITY") {
        schema.output.jpeg_quality = parse_env("PHOTOBOOST_JPEG_QUALITY", &quality)?;
    }
    if let Some(level) = lookup("PHOTOBOOST_LOG") {
        schema.logging.level = level;
    }
    if let Some(json) = lookup("PHOTOBOOST_LOG_JSON") {
        schema.logging.json = parse_env("PHOTOBOOST_LOG_JSON", &json)?;
    }
    Ok(())
}

fn parse_env<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::invalid_config_value(key, format!("{raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photoboost.toml");
        std::fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.server.port, 5000);
        assert_eq!(config.schema.server.host, "0.0.0.0");
        assert_eq!(config.schema.output.jpeg_quality, 95);
        assert_eq!(config.schema.storage.dir, PathBuf::from("temp_images"));
        assert!(config.schema.server.cors);
        assert!(config.schema.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let (_temp, path) = write_config("[server]\nport = 8080\n\n[logging]\njson = true\n");

        let config = Config::load_with_env(Some(path.as_path()), no_env).unwrap();
        assert_eq!(config.path.as_deref(), Some(path.as_path()));
        assert_eq!(config.schema.server.port, 8080);
        assert_eq!(config.schema.server.host, "0.0.0.0");
        assert!(config.schema.logging.json);
        assert_eq!(config.schema.logging.level, "info");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load_with_env(Some(Path::new("/nonexistent/photoboost.toml")), no_env)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_malformed_file() {
        let (_temp, path) = write_config("[server\nport = ");
        let err = Config::load_with_env(Some(path.as_path()), no_env).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.is_some());
    }

    #[test]
    fn test_env_overrides_file() {
        let (_temp, path) = write_config("[server]\nport = 8080\n");
        let lookup = env(&[
            ("PHOTOBOOST_PORT", "9090"),
            ("PHOTOBOOST_HOST", "127.0.0.1"),
            ("PHOTOBOOST_STORAGE_DIR", "/var/lib/photoboost"),
            ("PHOTOBOOST_JPEG_QUALITY", "80"),
            ("PHOTOBOOST_LOG_JSON", "true"),
        ]);

        let config = Config::load_with_env(Some(path.as_path()), lookup).unwrap();
        assert_eq!(config.schema.server.port, 9090);
        assert_eq!(config.schema.server.host, "127.0.0.1");
        assert_eq!(config.schema.storage.dir, PathBuf::from("/var/lib/photoboost"));
        assert_eq!(config.schema.output.jpeg_quality, 80);
        assert!(config.schema.logging.json);
    }

    #[test]
    fn test_unparseable_env_override() {
        let (_temp, path) = write_config("");
        let err = Config::load_with_env(Some(path.as_path()), env(&[("PHOTOBOOST_PORT", "http")]))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.message.contains("PHOTOBOOST_PORT"));
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let (_temp, path) = write_config("[output]\njpeg_quality = 0\n");
        let err = Config::load_with_env(Some(path.as_path()), no_env).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);

        let mut schema = ConfigSchema::default();
        schema.server.host = "not an address".to_string();
        assert!(schema.validate().is_err());

        let mut schema = ConfigSchema::default();
        schema.server.port = 0;
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let schema = ConfigSchema::default();
        let addr = schema.server.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:5000");
    }
}
