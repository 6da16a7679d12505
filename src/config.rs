// Runtime configuration: JSON file, then environment overrides.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_SCRIPT: &str = "DOCDIGEST_SCRIPT";
pub const ENV_INTERPRETER: &str = "DOCDIGEST_INTERPRETER";
pub const ENV_TIMEOUT_SECS: &str = "DOCDIGEST_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub external: ExternalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    /// When false the engine goes straight to TextRank.
    pub enabled: bool,
    /// Program used to run the script. `None` executes the script directly.
    pub interpreter: Option<String>,
    /// Checked in order, first existing file wins. Relative paths resolve
    /// against the working directory.
    pub script_candidates: Vec<PathBuf>,
    /// Total bound on one call: waiting for a free slot plus running the process.
    pub timeout_secs: u64,
    /// Upper bound on summarizer processes running at the same time.
    pub max_concurrent: usize,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interpreter: Some("python".to_string()),
            script_candidates: vec![
                PathBuf::from("summarizer.py"),
                PathBuf::from("scripts/summarizer.py"),
            ],
            timeout_secs: 120,
            max_concurrent: 2,
        }
    }
}

impl ExternalConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given (defaults otherwise) and applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// A script override is tried before the configured candidates.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(script) = lookup(ENV_SCRIPT) {
            self.external.script_candidates.insert(0, PathBuf::from(script));
        }
        if let Some(interpreter) = lookup(ENV_INTERPRETER) {
            self.external.interpreter = if interpreter.trim().is_empty() {
                None
            } else {
                Some(interpreter)
            };
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.external.timeout_secs = value.trim().parse().map_err(|_| ConfigError::Env {
                name: ENV_TIMEOUT_SECS,
                value,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.external.enabled);
        assert_eq!(config.external.interpreter.as_deref(), Some("python"));
        assert_eq!(config.external.timeout(), Duration::from_secs(120));
        assert_eq!(config.external.max_concurrent, 2);
    }

    #[test]
    fn test_from_file_partial() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("docdigest.json");
        std::fs::write(&path, r#"{"external": {"timeout_secs": 5, "interpreter": null}}"#)?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.external.timeout_secs, 5);
        assert!(config.external.interpreter.is_none());
        // untouched fields keep defaults
        assert_eq!(config.external.max_concurrent, 2);
        assert!(config.external.enabled);
        Ok(())
    }

    #[test]
    fn test_from_file_errors() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let missing = Config::from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json")?;
        assert!(matches!(Config::from_file(&bad), Err(ConfigError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SCRIPT, "/opt/tools/summarize.sh"),
            (ENV_INTERPRETER, ""),
            (ENV_TIMEOUT_SECS, "9"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(
            config.external.script_candidates[0],
            PathBuf::from("/opt/tools/summarize.sh")
        );
        assert!(config.external.interpreter.is_none());
        assert_eq!(config.external.timeout_secs, 9);
    }

    #[test]
    fn test_bad_timeout_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(|name| {
            (name == ENV_TIMEOUT_SECS).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Env { .. })));
    }
}
