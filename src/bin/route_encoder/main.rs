//! Route encoder for the swap executor.
//!
//! This binary compiles swap paths into executor calldata, reading pool
//! orientation and coin indices from the configured node, and hashes and
//! signs lock orders.

mod config;
mod error;

use std::process::exit;

use alloy::{
    eips::BlockId,
    hex,
    primitives::{Bytes, U256},
    providers::{DynProvider, ProviderBuilder},
    rpc::client::RpcClient,
};
use clap::Parser;
use fastnum::UD64;
use swap_sdk::{
    Chain, ChainRegistry,
    adapters::weth,
    calls::{self, CallParams},
    num::Converter,
    order::LockOrder,
    path::PathCompiler,
    reader::ProviderReader,
    sign::{LocalSigner, OrderSigner, TypedDataSigner},
    types::Path,
};
use tracing::{error, info};
use url::Url;

use config::{CliConfig, Command, ConfigError, EnvConfig};
use error::Result;

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let cli_config = CliConfig::parse();

    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let chain = match env_config.chain() {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("Invalid deployment address: {}", e);
            exit(1);
        }
    };

    let result = match cli_config.command {
        Command::Compile {
            hops,
            amount,
            recipient,
            block,
            native,
        } => compile(&env_config, &chain, &hops, &amount, &recipient, block, native).await,
        Command::SignLock {
            asset,
            amount,
            target_chain,
            secret_hash,
            expiration,
        } => {
            sign_lock(
                &env_config,
                chain,
                &asset,
                &amount,
                target_chain,
                &secret_hash,
                expiration,
            )
            .await
        }
    };

    if let Err(e) = result {
        error!(%e, "Route encoder failed");
        exit(1);
    }
}

async fn compile(
    env_config: &EnvConfig,
    chain: &Chain,
    hops: &[String],
    amount: &str,
    recipient: &str,
    block: Option<u64>,
    native: bool,
) -> Result<()> {
    let path = hops
        .iter()
        .map(|hop| config::parse_hop(hop))
        .collect::<std::result::Result<Path, _>>()?;
    let amount = config::parse_amount(amount)?;
    let recipient = recipient.parse()?;

    let node_url = Url::parse(&env_config.node_rpc_url)?;
    let provider = DynProvider::new(ProviderBuilder::new().connect_client(RpcClient::new_http(node_url)));
    let mut reader = ProviderReader::new(provider);
    if let Some(block) = block {
        reader = reader.at_block(BlockId::number(block));
    }

    let mut batch = Vec::new();
    if native {
        batch.push(wrap_native_call(chain, &path, amount)?);
    }
    let compiled = PathCompiler::new(chain)
        .compile(&path, amount, recipient, &reader)
        .await?;
    batch.extend(compiled.into_calls());

    info!(hops = path.len(), calls = batch.len(), native, "Path compiled");
    for (idx, call) in batch.iter().enumerate() {
        println!("call {idx}: {}", hex::encode_prefixed(call));
    }
    println!("batch: {}", hex::encode_prefixed(calls::encode_batch(&batch)));
    Ok(())
}

/// Call wrapping the native `amount` attached to the batch into the wrapped
/// token the path starts at, kept on the executor for the first hop.
fn wrap_native_call(chain: &Chain, path: &Path, amount: U256) -> Result<Bytes> {
    let asset_in = path.asset_in().ok_or(swap_sdk::error::Error::EmptyPath)?;
    if asset_in != chain.wrapped_native() {
        return Err(ConfigError::NotWrappedNative(asset_in).into());
    }
    Ok(calls::encode_call_params(
        &weth::wrap_and_transfer(chain.swap_executor()),
        Some(&CallParams::literal().with_value(amount).mandatory()),
    )?)
}

async fn sign_lock(
    env_config: &EnvConfig,
    chain: Chain,
    asset: &str,
    amount: &str,
    target_chain: u64,
    secret_hash: &str,
    expiration: u64,
) -> Result<()> {
    let signer: LocalSigner = env_config
        .private_key
        .as_deref()
        .ok_or(ConfigError::MissingPrivateKey)?
        .parse()?;

    let order = LockOrder::builder()
        .sender(signer.address())
        .expiration(expiration)
        .asset(asset.parse()?)
        .amount(config::parse_decimal(amount)?)
        .target_chain_id(target_chain)
        .secret_hash(config::parse_secret_hash(secret_hash)?)
        .build()?;

    let signed = OrderSigner::new(ChainRegistry::new().with(chain), signer)
        .sign(order)
        .await?;

    info!(sender = %order.sender(), "Lock order signed");
    let amount: Option<UD64> = Converter::orders().from_unsigned(U256::from(order.amount()));
    if let Some(amount) = amount {
        println!("amount: {amount}");
    }
    println!("hash: {}", order.hash());
    println!("signature: {}", hex::encode_prefixed(signed.signature().as_bytes()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy::{primitives::address, sol_types::SolCall};
    use swap_sdk::{abi::executor::SwapExecutor, calls::decode_call_params, types::SwapHop};

    use super::*;
    use crate::error::Error;

    const WRAPPED: alloy::primitives::Address =
        address!("0x00000000000000000000000000000000000000ee");
    const EXECUTOR: alloy::primitives::Address =
        address!("0x0000000000000000000000000000000000000e0e");

    fn chain() -> Chain {
        Chain::custom(
            56,
            EXECUTOR,
            address!("0x00000000000000000000000000000000000000e1"),
            address!("0x00000000000000000000000000000000000000e0"),
            WRAPPED,
        )
    }

    #[test]
    fn test_wrap_native_call_funds_the_executor() {
        let path = Path::from(vec![SwapHop::uniswap_v2(
            address!("0x0000000000000000000000000000000000000001"),
            WRAPPED,
            address!("0x000000000000000000000000000000000000000b"),
        )]);

        let call = wrap_native_call(&chain(), &path, U256::from(1_000)).unwrap();
        let (params, raw) = decode_call_params(&call).unwrap();
        assert_eq!(params.value, Some(U256::from(1_000)));
        assert!(params.mandatory);
        assert_eq!(
            SwapExecutor::wrapAndTransferCall::abi_decode(&raw)
                .unwrap()
                .target,
            EXECUTOR
        );
    }

    #[test]
    fn test_wrap_native_call_requires_wrapped_input() {
        let asset = address!("0x000000000000000000000000000000000000000a");
        let path = Path::from(vec![SwapHop::curve(
            address!("0x0000000000000000000000000000000000000001"),
            asset,
            WRAPPED,
        )]);

        assert!(matches!(
            wrap_native_call(&chain(), &path, U256::from(1)),
            Err(Error::Config(ConfigError::NotWrappedNative(a))) if a == asset
        ));
        assert!(matches!(
            wrap_native_call(&chain(), &Path::default(), U256::from(1)),
            Err(Error::Sdk(swap_sdk::error::Error::EmptyPath))
        ));
    }
}
