//! Solidity compiler settings.
//!
//! Mirrors the `compilers.solc` section consumed by the deployment runner:
//! compiler release, optimizer switch and run count, and an optional EVM
//! target.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A solc release in `major.minor.patch` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SolcVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SolcVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for SolcVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConfigError::InvalidSolcVersion(s.to_string()));
            }
            part.parse::<u32>()
                .map_err(|_| ConfigError::InvalidSolcVersion(s.to_string()))
        };

        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(ConfigError::InvalidSolcVersion(s.to_string()));
        };

        Ok(Self::new(parse(major)?, parse(minor)?, parse(patch)?))
    }
}

impl TryFrom<String> for SolcVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SolcVersion> for String {
    fn from(version: SolcVersion) -> Self {
        version.to_string()
    }
}

impl fmt::Display for SolcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// EVM hard fork the compiler targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvmVersion {
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
    London,
    Paris,
    Shanghai,
    Cancun,
}

impl EvmVersion {
    /// First solc release that accepts this target.
    pub const fn min_solc(self) -> SolcVersion {
        match self {
            Self::Homestead
            | Self::TangerineWhistle
            | Self::SpuriousDragon
            | Self::Byzantium
            | Self::Constantinople => SolcVersion::new(0, 4, 21),
            Self::Petersburg => SolcVersion::new(0, 5, 5),
            Self::Istanbul => SolcVersion::new(0, 5, 13),
            Self::Berlin => SolcVersion::new(0, 8, 5),
            Self::London => SolcVersion::new(0, 8, 7),
            Self::Paris => SolcVersion::new(0, 8, 18),
            Self::Shanghai => SolcVersion::new(0, 8, 20),
            Self::Cancun => SolcVersion::new(0, 8, 24),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Homestead => "homestead",
            Self::TangerineWhistle => "tangerineWhistle",
            Self::SpuriousDragon => "spuriousDragon",
            Self::Byzantium => "byzantium",
            Self::Constantinople => "constantinople",
            Self::Petersburg => "petersburg",
            Self::Istanbul => "istanbul",
            Self::Berlin => "berlin",
            Self::London => "london",
            Self::Paris => "paris",
            Self::Shanghai => "shanghai",
            Self::Cancun => "cancun",
        }
    }
}

/// Optimizer switch and expected number of contract runs.
///
/// Omitted fields take solc's defaults: disabled, 200 runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            runs: 200,
        }
    }
}

/// The `settings` block handed to solc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolcSettings {
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    /// Target fork; the compiler default is used when unset
    #[serde(
        rename = "evmVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub evm_version: Option<EvmVersion>,
}

/// Compiler release plus its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    pub version: SolcVersion,
    #[serde(default)]
    pub settings: SolcSettings,
}

impl CompilerSettings {
    /// solc 0.6.12 with the optimizer tuned for 200 runs.
    pub const fn solc_0_6_12() -> Self {
        Self {
            version: SolcVersion::new(0, 6, 12),
            settings: SolcSettings {
                optimizer: OptimizerSettings {
                    enabled: true,
                    runs: 200,
                },
                evm_version: None,
            },
        }
    }

    pub const fn optimizer_enabled(&self) -> bool {
        self.settings.optimizer.enabled
    }

    pub const fn optimizer_runs(&self) -> u32 {
        self.settings.optimizer.runs
    }

    /// Check that the EVM target is available in the configured release.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(evm_version) = self.settings.evm_version {
            let required = evm_version.min_solc();
            if self.version < required {
                return Err(ConfigError::UnsupportedEvmVersion {
                    evm_version: evm_version.as_str().to_string(),
                    required: required.to_string(),
                    configured: self.version.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self::solc_0_6_12()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compiler() {
        let compiler = CompilerSettings::default();
        assert_eq!(compiler.version.to_string(), "0.6.12");
        assert!(compiler.optimizer_enabled());
        assert_eq!(compiler.optimizer_runs(), 200);
        assert_eq!(compiler.settings.evm_version, None);
        assert!(compiler.validate().is_ok());
    }

    #[test]
    fn test_parse_solc_version() {
        let version: SolcVersion = "0.8.24".parse().unwrap();
        assert_eq!(version, SolcVersion::new(0, 8, 24));
        assert!(version > SolcVersion::new(0, 6, 12));

        for bad in ["", "0.6", "0.6.12.1", "v0.6.12", "0.6.x", "0..12", "0.+6.12"] {
            assert!(
                matches!(bad.parse::<SolcVersion>(), Err(ConfigError::InvalidSolcVersion(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_evm_version_too_new_for_compiler() {
        let mut compiler = CompilerSettings::solc_0_6_12();
        compiler.settings.evm_version = Some(EvmVersion::Istanbul);
        assert!(compiler.validate().is_ok());

        compiler.settings.evm_version = Some(EvmVersion::London);
        let err = compiler.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedEvmVersion { .. }));
        assert!(err.to_string().contains("0.8.7"));
    }

    #[test]
    fn test_settings_default_when_omitted() {
        let compiler: CompilerSettings = toml::from_str(r#"version = "0.8.0""#).unwrap();
        assert_eq!(compiler.version, SolcVersion::new(0, 8, 0));
        assert_eq!(compiler.settings, SolcSettings::default());
        assert!(!compiler.optimizer_enabled());
        assert_eq!(compiler.optimizer_runs(), 200);

        let compiler: CompilerSettings = toml::from_str(
            r#"
version = "0.8.0"

[settings.optimizer]
enabled = true
"#,
        )
        .unwrap();
        assert!(compiler.optimizer_enabled());
        assert_eq!(compiler.optimizer_runs(), 200);
    }

    #[test]
    fn test_compiler_json_shape() {
        let mut compiler = CompilerSettings::solc_0_6_12();
        compiler.settings.evm_version = Some(EvmVersion::Byzantium);

        let value = serde_json::to_value(compiler).unwrap();
        assert_eq!(value["version"], "0.6.12");
        assert_eq!(value["settings"]["optimizer"]["enabled"], true);
        assert_eq!(value["settings"]["optimizer"]["runs"], 200);
        assert_eq!(value["settings"]["evmVersion"], "byzantium");
    }
}
