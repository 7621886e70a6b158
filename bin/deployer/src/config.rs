use config::{ConfigError, ProjectConfig};
use credentials::{SecretSource, DEFAULT_SECRET_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level deployer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Plaintext file holding the deployer mnemonic
    #[serde(default = "default_secret_file")]
    pub secret_file: PathBuf,

    /// Environment variable checked for the mnemonic before `secret_file`
    #[serde(default)]
    pub secret_env: Option<String>,

    /// Project configuration (compilers + networks); built-in BSC profiles when unset
    #[serde(default)]
    pub project: Option<PathBuf>,
}

fn default_secret_file() -> PathBuf {
    PathBuf::from(DEFAULT_SECRET_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_file: default_secret_file(),
            secret_env: None,
            project: None,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Secret sources in lookup order.
    pub fn secret_sources(&self) -> Vec<SecretSource> {
        self.secret_env
            .iter()
            .map(SecretSource::env)
            .chain([SecretSource::file(&self.secret_file)])
            .collect()
    }

    /// Load the project configuration this deployer points at.
    pub fn project_config(&self) -> Result<ProjectConfig, ConfigError> {
        match &self.project {
            Some(path) => ProjectConfig::from_file(path),
            None => Ok(ProjectConfig::bsc()),
        }
    }
}
