//! Configuration for historyquery

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the corpus directory
    pub corpus_path: PathBuf,

    /// Default page size for search results
    pub default_limit: usize,

    /// Default snippet context characters on each side of a content match
    pub default_snippet_context: usize,

    /// Default timeout for content scans in milliseconds (0 = no timeout)
    pub default_timeout_ms: u64,
}

fn default_corpus_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("historystore")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            default_limit: crate::DEFAULT_LIMIT,
            default_snippet_context: crate::DEFAULT_SNIPPET_CONTEXT,
            default_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            Some(PathBuf::from(".historyquery.yml")),
            dirs::config_dir().map(|p| p.join("historyquery").join("config.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_limit, crate::DEFAULT_LIMIT);
        assert_eq!(config.default_snippet_context, crate::DEFAULT_SNIPPET_CONTEXT);
        assert_eq!(config.default_timeout_ms, 0);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
corpus_path: /srv/history
default_limit: 5
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("/srv/history"));
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.default_snippet_context, crate::DEFAULT_SNIPPET_CONTEXT);
    }

    #[test]
    fn test_explicit_path_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "default_limit: 3\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_limit, 3);
    }
}
