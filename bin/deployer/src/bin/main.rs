//! Inspect the deployment configuration for BSC networks.
//!
//! - `networks`: list configured network profiles
//! - `show`: print the resolved compiler and network settings
//! - `account`: print the deployer account for a network

use clap::{Parser, Subcommand, ValueEnum};
use deployer::{config::Config, Deployment};
use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "deployer")]
#[command(about = "Contract deployment settings for BSC networks")]
struct Cli {
    /// Path to the deployer settings file
    #[arg(short, long)]
    config: Option<String>,

    /// Plaintext file holding the deployer mnemonic
    #[arg(long)]
    secret_file: Option<PathBuf>,

    /// Environment variable checked for the mnemonic before the secret file
    #[arg(long)]
    secret_env: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured networks
    Networks,

    /// Print the resolved configuration
    Show {
        /// Only print this network profile
        #[arg(short, long)]
        network: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },

    /// Print the deployer account used on a network
    Account {
        #[arg(short, long)]
        network: String,

        /// Account index on the mnemonic's HD path
        #[arg(long, default_value_t = client::DEFAULT_ADDRESS_INDEX)]
        index: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

fn render<T: Serialize>(value: &T, format: Format) -> eyre::Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Toml => toml::to_string_pretty(value)?,
    })
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            Config::from_file(path)?
        }
        None => Config::default(),
    };

    // CLI flags override the settings file
    if let Some(secret_file) = cli.secret_file {
        config.secret_file = secret_file;
    }
    if cli.secret_env.is_some() {
        config.secret_env = cli.secret_env;
    }

    let deployment = Deployment::load(&config)?;

    match cli.command {
        Command::Networks => {
            for profile in deployment.networks().iter() {
                let gas_price = profile
                    .gas_price_gwei()
                    .map_or_else(|| "auto".to_string(), |gwei| format!("{gwei} gwei"));
                println!(
                    "{}\tnetwork_id={}\tconfirmations={}\tgas_price={}\t{}",
                    profile.name, profile.network_id, profile.confirmations, gas_price, profile.url
                );
            }
        }
        Command::Show { network, format } => {
            let output = match network {
                Some(name) => {
                    let network = deployment.network(&name)?;
                    let profiles = BTreeMap::from([(name.as_str(), network.profile)]);
                    render(&BTreeMap::from([("networks", profiles)]), format)?
                }
                None => render(deployment.project(), format)?,
            };
            println!("{output}");
        }
        Command::Account { network, index } => {
            let network = deployment.network(&network)?;
            let provider = network.provider.with_address_index(index);
            let address = provider.address()?;

            info!(network = %network.profile.name, index, "Derived deployer account");
            println!("{address}\tchain_id={}", provider.chain_id());
        }
    }

    Ok(())
}
