//! Configuration for the route encoder.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): chain deployment, RPC, keys
//! - CLI arguments: the path to compile or the order to sign

use alloy::primitives::{Address, B256, U256, hex::FromHexError};
use clap::{Parser, Subcommand};
use fastnum::{UD64, decimal::Context};
use swap_sdk::{
    Chain,
    types::{SingleSwap, SwapHop, Venue},
};

/// Environment configuration (deployment addresses, credentials).
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Chain ID (e.g., 56 for BNB Smart Chain)
    pub chain_id: u64,

    /// RPC URL for the node
    pub node_rpc_url: String,

    /// Swap executor contract address
    pub swap_executor: String,

    /// Exchange contract address, verifying order signatures
    pub exchange_address: String,

    /// Stable-swap pool registry address
    pub curve_registry: String,

    /// Wrapped native token address
    pub wrapped_native: String,

    /// Private key for signing orders, required by `sign-lock` only
    pub private_key: Option<String>,

    /// Optional EIP-712 domain overrides
    pub domain_name: Option<String>,
    pub domain_version: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Build chain configuration from the deployment addresses.
    pub fn chain(&self) -> Result<Chain, FromHexError> {
        let chain = Chain::custom(
            self.chain_id,
            self.swap_executor.parse()?,
            self.exchange_address.parse()?,
            self.curve_registry.parse()?,
            self.wrapped_native.parse()?,
        );
        Ok(match (&self.domain_name, &self.domain_version) {
            (None, None) => chain,
            (name, version) => {
                let defaults = chain.domain();
                chain.with_domain(
                    name.clone().unwrap_or(defaults.name),
                    version.clone().unwrap_or(defaults.version),
                )
            }
        })
    }
}

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "route-encoder")]
#[command(about = "Swap executor calldata encoder and order signer")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a swap path into executor calls
    Compile {
        /// Hop as `<venue>:<pool>:<asset in>:<asset out>`, venue is
        /// `uniswap-v2` or `curve`; repeat in path order
        #[arg(long = "hop", required = true)]
        hops: Vec<String>,

        /// Input amount in token base units
        #[arg(long)]
        amount: String,

        /// Recipient of the path output
        #[arg(long)]
        recipient: String,

        /// Block to read pool state at (default: latest)
        #[arg(long)]
        block: Option<u64>,

        /// Pay the amount in native currency, wrapped before the first hop;
        /// the path must start at WRAPPED_NATIVE
        #[arg(long)]
        native: bool,
    },

    /// Hash and sign a lock order
    SignLock {
        /// Locked asset address
        #[arg(long)]
        asset: String,

        /// Locked amount as a decimal (e.g., 1.5)
        #[arg(long)]
        amount: String,

        /// Chain the lock is redeemable on, must match CHAIN_ID
        #[arg(long)]
        target_chain: u64,

        /// Hash of the swap secret
        #[arg(long)]
        secret_hash: String,

        /// Expiration timestamp in milliseconds
        #[arg(long)]
        expiration: u64,
    },
}

pub fn parse_hop(value: &str) -> Result<SwapHop, ConfigError> {
    let invalid = || ConfigError::InvalidHop(value.to_string());
    let [venue, pool, asset_in, asset_out] = value
        .split(':')
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| invalid())?;
    let venue = match venue {
        "uniswap-v2" | "univ2" => Venue::UniswapV2,
        "curve" => Venue::Curve,
        _ => return Err(invalid()),
    };
    let address = |s: &str| s.parse::<Address>().map_err(|_| invalid());
    Ok(SwapHop::new(
        venue,
        SingleSwap::new(address(pool)?, address(asset_in)?, address(asset_out)?),
    ))
}

pub fn parse_amount(value: &str) -> Result<U256, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAmount(value.to_string()))
}

pub fn parse_decimal(value: &str) -> Result<UD64, ConfigError> {
    UD64::from_str(value, Context::default())
        .map_err(|_| ConfigError::InvalidAmount(value.to_string()))
}

pub fn parse_secret_hash(value: &str) -> Result<B256, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidSecretHash(value.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid hop `{0}`, expected <venue>:<pool>:<asset in>:<asset out>")]
    InvalidHop(String),

    #[error("Invalid amount `{0}`")]
    InvalidAmount(String),

    #[error("Invalid secret hash `{0}`")]
    InvalidSecretHash(String),

    #[error("Path starts at {0}, not at the wrapped native token")]
    NotWrappedNative(Address),

    #[error("PRIVATE_KEY is required to sign orders")]
    MissingPrivateKey,
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use fastnum::udec64;

    use super::*;

    #[test]
    fn test_parse_hop() {
        let hop = parse_hop(
            "curve:0x0000000000000000000000000000000000000001:\
             0x000000000000000000000000000000000000000a:\
             0x000000000000000000000000000000000000000b",
        )
        .unwrap();
        assert_eq!(hop.venue, Venue::Curve);
        assert_eq!(hop.swap.pool, address!("0x0000000000000000000000000000000000000001"));
        assert_eq!(
            hop.swap.asset_out,
            address!("0x000000000000000000000000000000000000000b")
        );
    }

    #[test]
    fn test_parse_hop_rejects_garbage() {
        for value in [
            "",
            "curve:0x01",
            "balancer:0x0000000000000000000000000000000000000001:\
             0x000000000000000000000000000000000000000a:\
             0x000000000000000000000000000000000000000b",
            "curve:pool:in:out",
        ] {
            assert!(matches!(parse_hop(value), Err(ConfigError::InvalidHop(_))), "{value}");
        }
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse_amount("1000000").unwrap(), U256::from(1_000_000));
        assert!(parse_amount("1.5").is_err());
        assert_eq!(parse_decimal("1.5").unwrap(), udec64!(1.5));
    }

    #[test]
    fn test_domain_overrides() {
        let env = EnvConfig {
            chain_id: 56,
            node_rpc_url: "http://localhost:8545".to_string(),
            swap_executor: "0x0000000000000000000000000000000000000e0e".to_string(),
            exchange_address: "0x00000000000000000000000000000000000000e1".to_string(),
            curve_registry: "0x00000000000000000000000000000000000000e0".to_string(),
            wrapped_native: "0x00000000000000000000000000000000000000ee".to_string(),
            private_key: None,
            domain_name: None,
            domain_version: Some("2".to_string()),
        };
        let domain = env.chain().unwrap().domain();
        assert_eq!(domain.name, swap_sdk::DEFAULT_DOMAIN_NAME);
        assert_eq!(domain.version, "2");
        assert_eq!(
            domain.verifying_contract,
            address!("0x00000000000000000000000000000000000000e1")
        );
    }
}
