//! Configuration types for contract deployment.
//!
//! This crate provides:
//! - Solidity compiler settings
//! - Network profiles (BSC mainnet, testnet) and a registry to select them by name
//! - Project configuration loading and validation

pub mod compiler;
pub mod error;
pub mod network;
pub mod project;

pub use compiler::{CompilerSettings, EvmVersion, OptimizerSettings, SolcSettings, SolcVersion};
pub use error::ConfigError;
pub use network::{NetworkProfile, NetworkProfileBuilder, NetworkRegistry};
pub use project::{Compilers, ProjectConfig};
