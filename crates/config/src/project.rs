//! Project-level configuration: compilers plus networks.

use crate::{CompilerSettings, ConfigError, NetworkRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Compilers known to the deployment runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilers {
    pub solc: CompilerSettings,
}

/// Everything the deployment runner reads from the project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub compilers: Compilers,
    pub networks: NetworkRegistry,
}

impl ProjectConfig {
    /// solc 0.6.12 with the `main` and `test` BSC profiles.
    pub fn bsc() -> Self {
        Self {
            compilers: Compilers::default(),
            networks: NetworkRegistry::bsc(),
        }
    }

    /// Parse and validate a TOML project document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compilers.solc.validate()?;
        self.networks.validate()
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::bsc()
    }
}
