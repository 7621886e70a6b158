//! Wallet provider factory for deployment networks.
//!
//! Turns the deployer mnemonic and a network profile's endpoint into a
//! signing-capable alloy provider. Providers connect lazily: nothing here
//! talks to the network.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer::Signer;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use config::NetworkProfile;
use credentials::Mnemonic;
use thiserror::Error;
use tracing::debug;

/// Account index used when none is requested (`m/44'/60'/0'/0/0`).
pub const DEFAULT_ADDRESS_INDEX: u32 = 0;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Mnemonic could not be turned into a signing key
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
}

/// Derive the signer at `index` on the standard Ethereum HD path.
pub fn signer_from_mnemonic(
    mnemonic: &Mnemonic,
    index: u32,
) -> Result<PrivateKeySigner, ClientError> {
    MnemonicBuilder::<English>::default()
        .phrase(mnemonic.phrase())
        .index(index)
        .map_err(|e| ClientError::InvalidMnemonic(format!("{}", e)))?
        .build()
        .map_err(|e| ClientError::InvalidMnemonic(format!("{}", e)))
}

/// Create a provider with wallet signing capability from a mnemonic.
///
/// Signs with the first account of the mnemonic.
pub fn create_wallet_provider(
    rpc_url: &str,
    mnemonic: &Mnemonic,
) -> Result<impl Provider + Clone, ClientError> {
    let signer = signer_from_mnemonic(mnemonic, DEFAULT_ADDRESS_INDEX)?;
    wallet_provider(rpc_url, signer)
}

fn wallet_provider(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}

/// Builds signing providers for one network.
///
/// Holds everything the deployment runner needs to talk to a chain on behalf
/// of the deployer: endpoint, expected chain ID and the account to sign with.
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    url: String,
    chain_id: u64,
    address_index: u32,
    mnemonic: Mnemonic,
}

impl ProviderFactory {
    pub fn new(url: impl Into<String>, chain_id: u64, mnemonic: Mnemonic) -> Self {
        Self {
            url: url.into(),
            chain_id,
            address_index: DEFAULT_ADDRESS_INDEX,
            mnemonic,
        }
    }

    /// Factory for a configured network profile.
    pub fn for_profile(profile: &NetworkProfile, mnemonic: &Mnemonic) -> Self {
        Self::new(&profile.url, profile.network_id, mnemonic.clone())
    }

    /// Sign with a different account of the mnemonic.
    pub fn with_address_index(mut self, index: u32) -> Self {
        self.address_index = index;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub const fn address_index(&self) -> u32 {
        self.address_index
    }

    /// Local signer bound to this network's chain ID.
    pub fn signer(&self) -> Result<PrivateKeySigner, ClientError> {
        let signer = signer_from_mnemonic(&self.mnemonic, self.address_index)?;
        Ok(signer.with_chain_id(Some(self.chain_id)))
    }

    /// Address transactions are sent from.
    pub fn address(&self) -> Result<Address, ClientError> {
        Ok(self.signer()?.address())
    }

    /// Create the signing provider.
    pub fn connect(&self) -> Result<impl Provider + Clone, ClientError> {
        let signer = self.signer()?;
        debug!(
            url = %self.url,
            chain_id = self.chain_id,
            address = %signer.address(),
            "Creating wallet provider"
        );

        wallet_provider(&self.url, signer)
    }
}
