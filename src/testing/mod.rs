//! In-memory test doubles and fixtures.
//!
//! [`MockStateReader`] serves pool orientation and coin indices from memory
//! and counts the reads issued against it, so path compilation can be tested
//! without a node.
//!
//! [`ParitySigner`] wraps any signer and re-encodes the recovery byte as
//! `0`/`1` the way hardware wallets commonly do, [`RefusingSigner`] declines
//! every request.

use std::{
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use alloy::primitives::{Address, Bytes, address};
use dashmap::DashMap;

use crate::{
    Chain, ChainRegistry,
    error::ReadError,
    reader::{CoinIndices, StateReader},
    sign::{LocalSigner, SIGNATURE_LEN, SignerError, TypedDataRequest, TypedDataSigner},
};

/// Chain ID of the [`chains`] fixture.
pub const TARGET_CHAIN_ID: u64 = 97;

pub const SWAP_EXECUTOR: Address = address!("0x0000000000000000000000000000000000000e0e");
pub const EXCHANGE: Address = address!("0x00000000000000000000000000000000000000e1");
pub const CURVE_REGISTRY: Address = address!("0x00000000000000000000000000000000000000e0");
pub const WRAPPED_NATIVE: Address = address!("0x00000000000000000000000000000000000000ee");

/// Private key of the first default Anvil account.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Chain with well-known fixture addresses.
pub fn chain() -> Chain {
    Chain::custom(
        TARGET_CHAIN_ID,
        SWAP_EXECUTOR,
        EXCHANGE,
        CURVE_REGISTRY,
        WRAPPED_NATIVE,
    )
}

/// Registry holding just [`chain`].
pub fn chains() -> ChainRegistry {
    ChainRegistry::new().with(chain())
}

/// Signer of [`TEST_PRIVATE_KEY`].
pub fn local_signer() -> LocalSigner {
    LocalSigner::from_str(TEST_PRIVATE_KEY).expect("valid test private key")
}

/// [`StateReader`] serving preset values.
///
/// Unknown pools fail with [`ReadError::ContractNotFound`], unknown stable-swap
/// pairings revert the way the registry does.
#[derive(Debug, Default)]
pub struct MockStateReader {
    token0: DashMap<Address, Address>,
    coin_indices: DashMap<(Address, Address, Address), CoinIndices>,
    reads: AtomicUsize,
}

impl MockStateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token0(&self, pool: Address, token0: Address) {
        self.token0.insert(pool, token0);
    }

    pub fn set_coin_indices(&self, pool: Address, from: Address, to: Address, indices: CoinIndices) {
        self.coin_indices.insert((pool, from, to), indices);
    }

    /// Number of reads issued so far, including failed ones.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl StateReader for MockStateReader {
    async fn pool_token0(&self, pool: Address) -> Result<Address, ReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.token0
            .get(&pool)
            .map(|token0| *token0)
            .ok_or(ReadError::ContractNotFound(pool))
    }

    async fn coin_indices(
        &self,
        registry: Address,
        pool: Address,
        from: Address,
        to: Address,
    ) -> Result<CoinIndices, ReadError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.coin_indices
            .get(&(pool, from, to))
            .map(|indices| *indices)
            .ok_or_else(|| ReadError::Reverted {
                contract: registry,
                reason: "execution reverted: No available market".to_string(),
            })
    }
}

/// Signer emitting `0`/`1` recovery bytes.
#[derive(Clone, Debug)]
pub struct ParitySigner<S> {
    inner: S,
}

impl<S: TypedDataSigner> ParitySigner<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: TypedDataSigner> TypedDataSigner for ParitySigner<S> {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn sign_typed_data(&self, request: &TypedDataRequest) -> Result<Bytes, SignerError> {
        let mut raw = self.inner.sign_typed_data(request).await?.to_vec();
        if raw.len() == SIGNATURE_LEN && raw[64] >= 27 {
            raw[64] -= 27;
        }
        Ok(raw.into())
    }
}

/// Signer declining every request.
#[derive(Clone, Debug)]
pub struct RefusingSigner {
    reason: String,
}

impl RefusingSigner {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TypedDataSigner for RefusingSigner {
    fn address(&self) -> Address {
        Address::ZERO
    }

    async fn sign_typed_data(&self, _request: &TypedDataRequest) -> Result<Bytes, SignerError> {
        Err(SignerError::Refused(self.reason.clone()))
    }
}
