//! Error types for the route encoder.

use crate::config::ConfigError;

/// Main error type for the route encoder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Swap SDK error: {0}")]
    Sdk(#[from] swap_sdk::error::Error),

    #[error("Signer error: {0}")]
    Signer(#[from] swap_sdk::sign::SignerError),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(#[from] url::ParseError),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] alloy::primitives::hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, Error>;
