//! YAML style configuration for rendered diagrams.
//!
//! Configuration is optional. It is looked up in this order:
//! 1. An explicit `--config` path
//! 2. `./.doctrine-erd.yml` in the working directory
//! 3. `doctrine-erd/config.yml` in the platform config directory
//! 4. Built-in defaults

use crate::diagram::Layout;
use crate::error::ConfigError;
use crate::model::{Palette, DEFAULT_COLORS};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG: &str = ".doctrine-erd.yml";

/// Diagram styling
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Title printed at the top of the diagram
    pub title: String,
    /// Rank direction; graphviz decides when unset
    pub layout: Option<Layout>,
    pub background: String,
    pub font_color: String,
    /// Fill color of entity nodes
    pub node_fill: String,
    /// Colors handed out to entities in creation order
    pub palette: Vec<String>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            title: "Entities".to_string(),
            layout: None,
            background: "white".to_string(),
            font_color: "black".to_string(),
            node_fill: "grey95".to_string(),
            palette: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl DiagramConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse and validate configuration text. `path` is used for errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty file deserializes to nothing; treat it as all defaults
        let config: Option<DiagramConfig> =
            serde_yaml_ng::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Find and load configuration following the search order
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            info!("loading configuration from {}", path.display());
            return Self::load(path);
        }

        let local = Path::new(LOCAL_CONFIG);
        if local.exists() {
            info!("loading configuration from {}", local.display());
            return Self::load(local);
        }

        match system_config_path() {
            Some(path) if path.exists() => {
                info!("loading configuration from {}", path.display());
                return Self::load(&path);
            }
            Some(path) => debug!("no configuration at {}", path.display()),
            None => debug!("could not determine platform config directory"),
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Reject values that cannot produce a diagram
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must contain at least one color".into()));
        }
        if let Some(color) = self.palette.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "palette contains a blank color: {:?}",
                color
            )));
        }
        Ok(())
    }

    /// A fresh palette for one run
    pub fn palette(&self) -> Palette {
        Palette::new(self.palette.clone())
    }
}

/// `<config dir>/doctrine-erd/config.yml`
pub fn system_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("doctrine-erd").join("config.yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DiagramConfig::default();
        assert_eq!(config.title, "Entities");
        assert_eq!(config.background, "white");
        assert_eq!(config.font_color, "black");
        assert_eq!(config.node_fill, "grey95");
        assert_eq!(config.palette.len(), 17);
        assert_eq!(config.layout, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = DiagramConfig::parse("title: Shop\nlayout: lr\n", Path::new("test.yml")).unwrap();
        assert_eq!(config.title, "Shop");
        assert_eq!(config.layout, Some(Layout::LR));
        assert_eq!(config.node_fill, "grey95");
        assert_eq!(config.palette.len(), 17);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = DiagramConfig::parse("", Path::new("test.yml")).unwrap();
        assert_eq!(config, DiagramConfig::default());
    }

    #[test]
    fn test_empty_palette_rejected() {
        let err = DiagramConfig::parse("palette: []\n", Path::new("test.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_layout_accepts_cli_spellings() {
        let config = DiagramConfig::parse("layout: top-down\n", Path::new("test.yml")).unwrap();
        assert_eq!(config.layout, Some(Layout::TB));
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let err = DiagramConfig::parse("layout: diagonal\n", Path::new("test.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_custom_palette() {
        let config =
            DiagramConfig::parse("palette: [red, blue]\n", Path::new("test.yml")).unwrap();
        let mut palette = config.palette();
        assert_eq!(palette.next_color(), "red");
        assert_eq!(palette.next_color(), "blue");
        assert_eq!(palette.next_color(), "red");
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "background: ivory").unwrap();
        let config = DiagramConfig::load(file.path()).unwrap();
        assert_eq!(config.background, "ivory");
    }

    #[test]
    fn test_explicit_missing_file() {
        let err = DiagramConfig::discover(Some(Path::new("/nonexistent/erd.yml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }
}
