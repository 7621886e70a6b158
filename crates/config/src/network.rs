//! Network profiles for contract deployment.
//!
//! Each profile bundles an RPC endpoint with the transaction policy the
//! deployment runner applies on that chain (confirmations, block timeout,
//! gas price). Profiles are collected in a [`NetworkRegistry`] keyed by name.

use crate::ConfigError;
use alloy_primitives::{utils::format_units, U256};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, time::Duration};
use url::Url;

/// BSC mainnet chain ID.
pub const BSC_MAINNET_ID: u64 = 56;
/// BSC testnet (Chapel) chain ID.
pub const BSC_TESTNET_ID: u64 = 97;

/// A named deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Registry key, filled in from the table name on load
    #[serde(skip)]
    pub name: String,
    /// RPC endpoint handed to the wallet provider
    pub url: String,
    /// Chain ID expected at `url`
    pub network_id: u64,
    /// Blocks to wait before a deployment is considered final
    pub confirmations: u64,
    /// Blocks to wait for a transaction to be mined before giving up
    #[serde(rename = "timeoutBlocks")]
    pub timeout_blocks: u64,
    /// Fixed gas price in wei; the node's suggestion is used when unset
    #[serde(rename = "gasPrice", default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
    /// Milliseconds to wait for the endpoint to answer the network check
    #[serde(
        rename = "networkCheckTimeout",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_check_timeout: Option<u64>,
    /// Skip the simulated migration before the real one
    #[serde(rename = "skipDryRun", default)]
    pub skip_dry_run: bool,
    /// Gas limit per deployment transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
}

impl NetworkProfile {
    /// BSC mainnet profile (`main`).
    pub fn bsc_mainnet() -> Self {
        NetworkProfileBuilder::new("main", "https://bsc-dataseed2.ninicoin.io/", BSC_MAINNET_ID)
            .confirmations(5)
            .timeout_blocks(200)
            .gas_price(5_000_000_000)
            .network_check_timeout(60_000)
            .skip_dry_run(true)
            .build()
    }

    /// BSC testnet profile (`test`).
    pub fn bsc_testnet() -> Self {
        NetworkProfileBuilder::new(
            "test",
            "https://data-seed-prebsc-1-s1.binance.org:8545/",
            BSC_TESTNET_ID,
        )
        .confirmations(3)
        .timeout_blocks(200)
        .skip_dry_run(true)
        .build()
    }

    /// Network check timeout as a [`Duration`].
    pub fn network_check_timeout(&self) -> Option<Duration> {
        self.network_check_timeout.map(Duration::from_millis)
    }

    /// Fixed gas price rendered in gwei.
    pub fn gas_price_gwei(&self) -> Option<String> {
        self.gas_price
            .and_then(|wei| format_units(U256::from(wei), "gwei").ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidNetwork {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        let url = Url::parse(&self.url).map_err(|e| invalid(&format!("invalid url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https" | "ws" | "wss") || !url.has_host() {
            return Err(invalid("url must be an http(s) or ws(s) endpoint"));
        }
        if self.timeout_blocks == 0 {
            return Err(invalid("timeoutBlocks must be greater than zero"));
        }
        if self.network_check_timeout == Some(0) {
            return Err(invalid("networkCheckTimeout must be greater than zero"));
        }
        if self.gas == Some(0) {
            return Err(invalid("gas must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for custom network profiles.
#[derive(Debug, Clone)]
pub struct NetworkProfileBuilder {
    profile: NetworkProfile,
}

impl NetworkProfileBuilder {
    /// Start a profile with no confirmations, a 50 block timeout and the dry run enabled.
    pub fn new(name: impl Into<String>, url: impl Into<String>, network_id: u64) -> Self {
        Self {
            profile: NetworkProfile {
                name: name.into(),
                url: url.into(),
                network_id,
                confirmations: 0,
                timeout_blocks: 50,
                gas_price: None,
                network_check_timeout: None,
                skip_dry_run: false,
                gas: None,
            },
        }
    }

    pub fn confirmations(mut self, confirmations: u64) -> Self {
        self.profile.confirmations = confirmations;
        self
    }

    pub fn timeout_blocks(mut self, timeout_blocks: u64) -> Self {
        self.profile.timeout_blocks = timeout_blocks;
        self
    }

    /// Fix the gas price (wei).
    pub fn gas_price(mut self, wei: u64) -> Self {
        self.profile.gas_price = Some(wei);
        self
    }

    /// Network check timeout in milliseconds.
    pub fn network_check_timeout(mut self, millis: u64) -> Self {
        self.profile.network_check_timeout = Some(millis);
        self
    }

    pub fn skip_dry_run(mut self, skip: bool) -> Self {
        self.profile.skip_dry_run = skip;
        self
    }

    pub fn gas(mut self, gas: u64) -> Self {
        self.profile.gas = Some(gas);
        self
    }

    pub fn build(self) -> NetworkProfile {
        self.profile
    }
}

/// Profiles keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, NetworkProfile>",
    into = "BTreeMap<String, NetworkProfile>"
)]
pub struct NetworkRegistry {
    profiles: BTreeMap<String, NetworkProfile>,
}

impl NetworkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `main` and `test` BSC profiles.
    pub fn bsc() -> Self {
        let mut profiles = BTreeMap::new();
        for profile in [NetworkProfile::bsc_mainnet(), NetworkProfile::bsc_testnet()] {
            profiles.insert(profile.name.clone(), profile);
        }
        Self { profiles }
    }

    /// Register a profile under its own name.
    pub fn insert(&mut self, profile: NetworkProfile) -> Result<(), ConfigError> {
        if self.profiles.contains_key(&profile.name) {
            return Err(ConfigError::DuplicateNetwork(profile.name));
        }
        self.profiles.insert(profile.name.clone(), profile);
        Ok(())
    }

    /// Look up a profile by name.
    pub fn get(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.iter().try_for_each(NetworkProfile::validate)
    }
}

impl From<BTreeMap<String, NetworkProfile>> for NetworkRegistry {
    fn from(mut profiles: BTreeMap<String, NetworkProfile>) -> Self {
        for (name, profile) in &mut profiles {
            profile.name.clone_from(name);
        }
        Self { profiles }
    }
}

impl From<NetworkRegistry> for BTreeMap<String, NetworkProfile> {
    fn from(registry: NetworkRegistry) -> Self {
        registry.profiles
    }
}
