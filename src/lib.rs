//! Swap executor SDK.
//!
//! # Overview
//!
//! Builds byte-exact calldata for the on-chain swap executor and authenticates
//! off-chain orders the exchange contracts and backend verify.
//!
//! Use [`path::PathCompiler`] to turn a router-provided [`types::Path`] into a
//! batch of executor calls, each wrapped with the control word of
//! [`calls::encode_call_params`]. Individual venue calls are available from
//! [`adapters`].
//!
//! Use [`order`] to build cross-chain, lock and cancel orders and compute
//! their canonical hashes, then [`sign::OrderSigner`] to produce
//! [`sign::Signed`] orders with EIP-712 signatures normalized to the form the
//! verifying contracts expect.
//!
//! Nothing here submits transactions or holds keys beyond what the supplied
//! [`sign::TypedDataSigner`] does.
//!
//! # Testing
//!
//! [`testing`] module provides an in-memory [`reader::StateReader`] and signer
//! wrappers to exercise the SDK without a node.

pub mod abi;
pub mod adapters;
pub mod calls;
pub mod error;
pub mod num;
pub mod order;
pub mod path;
pub mod reader;
pub mod sign;
pub mod testing;
pub mod types;

use std::collections::HashMap;

use alloy::primitives::Address;

use crate::error::{Error, Result};

/// Default name of the EIP-712 domain of the exchange contracts.
pub const DEFAULT_DOMAIN_NAME: &str = "Atomic Swap Exchange";

/// Default version of the EIP-712 domain of the exchange contracts.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Chain the swap executor and exchange contracts are deployed on.
pub struct Chain {
    chain_id: u64,
    swap_executor: Address,
    exchange: Address,
    curve_registry: Address,
    wrapped_native: Address,
    domain_name: String,
    domain_version: String,
}

impl Chain {
    pub fn custom(
        chain_id: u64,
        swap_executor: Address,
        exchange: Address,
        curve_registry: Address,
        wrapped_native: Address,
    ) -> Self {
        Self {
            chain_id,
            swap_executor,
            exchange,
            curve_registry,
            wrapped_native,
            domain_name: DEFAULT_DOMAIN_NAME.to_string(),
            domain_version: DEFAULT_DOMAIN_VERSION.to_string(),
        }
    }

    /// Overrides the EIP-712 domain name and version.
    pub fn with_domain(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.domain_name = name.into();
        self.domain_version = version.into();
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn swap_executor(&self) -> Address {
        self.swap_executor
    }

    /// Exchange contract verifying order signatures.
    pub fn exchange(&self) -> Address {
        self.exchange
    }

    pub fn curve_registry(&self) -> Address {
        self.curve_registry
    }

    pub fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    /// EIP-712 domain scoping order signatures on this chain.
    pub fn domain(&self) -> sign::DomainData {
        sign::DomainData {
            name: self.domain_name.clone(),
            version: self.domain_version.clone(),
            chain_id: self.chain_id,
            verifying_contract: self.exchange,
        }
    }
}

/// Static chain configuration, keyed by chain ID.
#[derive(Clone, Debug, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, Chain>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, chain: Chain) -> Self {
        self.insert(chain);
        self
    }

    pub fn insert(&mut self, chain: Chain) -> Option<Chain> {
        self.chains.insert(chain.chain_id(), chain)
    }

    pub fn get(&self, chain_id: u64) -> Result<&Chain> {
        self.chains.get(&chain_id).ok_or(Error::UnknownChain(chain_id))
    }

    pub fn domain(&self, chain_id: u64) -> Result<sign::DomainData> {
        self.get(chain_id).map(Chain::domain)
    }
}

impl FromIterator<Chain> for ChainRegistry {
    fn from_iter<T: IntoIterator<Item = Chain>>(iter: T) -> Self {
        Self {
            chains: iter.into_iter().map(|c| (c.chain_id(), c)).collect(),
        }
    }
}
