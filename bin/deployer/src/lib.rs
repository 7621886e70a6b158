pub mod config;

use ::config::{
    CompilerSettings, ConfigError, NetworkProfile, NetworkRegistry, ProjectConfig,
};
use client::ProviderFactory;
use credentials::{CredentialsError, Mnemonic};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    /// Deployer mnemonic could not be obtained
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// Project configuration is unreadable or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Loaded deployment settings: compilers, networks and the deployer secret.
#[derive(Debug, Clone)]
pub struct Deployment {
    project: ProjectConfig,
    mnemonic: Mnemonic,
}

/// A network selected for deployment.
#[derive(Debug, Clone)]
pub struct Network<'a> {
    pub profile: &'a NetworkProfile,
    pub provider: ProviderFactory,
}

impl Deployment {
    /// Load the deployer secret, then the project configuration.
    ///
    /// Missing credentials fail before any network profile is built.
    pub fn load(config: &crate::config::Config) -> Result<Self, LoadError> {
        let mnemonic = credentials::load_first(&config.secret_sources())?;

        if let Some(path) = &config.project {
            info!("Loading project config: {}", path.display());
        }
        let project = config.project_config()?;

        Self::new(project, mnemonic)
    }

    pub fn new(project: ProjectConfig, mnemonic: Mnemonic) -> Result<Self, LoadError> {
        project.validate()?;

        info!(
            solc = %project.compilers.solc.version,
            networks = project.networks.len(),
            "Loaded deployment config"
        );

        Ok(Self { project, mnemonic })
    }

    pub const fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub const fn compilers(&self) -> &CompilerSettings {
        &self.project.compilers.solc
    }

    pub const fn networks(&self) -> &NetworkRegistry {
        &self.project.networks
    }

    /// Select a network by name, with a provider factory bound to it.
    pub fn network(&self, name: &str) -> Result<Network<'_>, LoadError> {
        let profile = self.project.networks.get(name)?;

        Ok(Network {
            profile,
            provider: ProviderFactory::for_profile(profile, &self.mnemonic),
        })
    }
}
