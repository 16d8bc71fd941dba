//! Generation options, loadable from a TOML file.
//!
//! ```toml
//! # Extra types to pass by value in parameter positions.
//! copy_types = ["Position", "Range"]
//! # Extension of generated files.
//! extension = "rs"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindgenOptions {
    /// Type names passed by value, in addition to the enums and string
    /// aliases declared in each namespace.
    pub copy_types: Vec<String>,
    /// Extension of generated files, without the dot.
    pub extension: String,
}

impl Default for BindgenOptions {
    fn default() -> Self {
        Self {
            copy_types: Vec::new(),
            extension: "rs".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl BindgenOptions {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?options, "loaded config");
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(BindgenOptions::from_toml_str("").unwrap(), BindgenOptions::default());
    }

    #[test]
    fn partial_config() {
        let options = BindgenOptions::from_toml_str("copy_types = [\"Position\"]\n").unwrap();
        assert_eq!(options.copy_types, ["Position"]);
        assert_eq!(options.extension, "rs");
    }

    #[test]
    fn invalid_config() {
        let err = BindgenOptions::from_toml_str("copy_types = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file() {
        let err = BindgenOptions::load(Path::new("/nonexistent/bindgen.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bindgen.toml"));
    }
}
