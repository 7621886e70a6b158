use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or does not match the schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Compiler version is not a `major.minor.patch` release
    #[error("invalid solc version `{0}`, expected major.minor.patch")]
    InvalidSolcVersion(String),

    /// EVM target is newer than the configured compiler understands
    #[error("evm version `{evm_version}` requires solc >= {required}, configured {configured}")]
    UnsupportedEvmVersion {
        evm_version: String,
        required: String,
        configured: String,
    },

    /// A network profile failed validation
    #[error("invalid network `{name}`: {reason}")]
    InvalidNetwork { name: String, reason: String },

    /// Two profiles share the same name
    #[error("duplicate network `{0}`")]
    DuplicateNetwork(String),

    /// No profile registered under the requested name
    #[error("unknown network `{name}` (available: {available})")]
    UnknownNetwork { name: String, available: String },
}
