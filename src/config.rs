use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::mission::{load_catalog, Catalog};

pub const DEFAULT_CONFIG_FILE: &str = "hunt.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory of `mission_*.toml` files. The built-in missions are used
    /// when unset.
    pub catalog_dir: Option<PathBuf>,
    pub store_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_dir: None,
            store_dir: PathBuf::from("saves"),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Config::load(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_dir {
            Some(dir) => load_catalog(dir),
            None => Ok(Catalog::builtin()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("hunt.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.catalog().unwrap().len(), 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunt.toml");
        std::fs::write(&path, "store_dir = \"/var/lib/hunt\"\n").unwrap();

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/var/lib/hunt"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.catalog_dir, None);
    }

    #[test]
    fn bad_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hunt.toml");
        std::fs::write(&path, "store_dir = 3\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("hunt.toml"));
    }
}
