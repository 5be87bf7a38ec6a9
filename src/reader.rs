//! Read-only access to the on-chain state the venue adapters depend on.
//!
//! Adapters issue exactly one read per datum they need and never cache,
//! caching across invocations is up to the [`StateReader`] implementation.

use std::future::Future;

use alloy::{
    eips::{BlockId, BlockNumberOrTag},
    primitives::Address,
    providers::Provider,
};

use crate::{
    abi::venues::{ICurveRegistry, IUniswapV2Pair},
    error::ReadError,
};

/// Coin indices of a stable-swap pool for a particular asset pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoinIndices {
    pub i: i128,
    pub j: i128,
}

/// Capability to read the on-chain state of venue contracts.
///
/// Must tolerate concurrent use, the path compiler issues all reads of a path
/// at once.
pub trait StateReader: Send + Sync {
    /// First token of a constant-product pool.
    fn pool_token0(&self, pool: Address) -> impl Future<Output = Result<Address, ReadError>> + Send;

    /// Indices of `from` and `to` coins within a stable-swap `pool`, as known
    /// to the `registry`.
    fn coin_indices(
        &self,
        registry: Address,
        pool: Address,
        from: Address,
        to: Address,
    ) -> impl Future<Output = Result<CoinIndices, ReadError>> + Send;
}

impl<R: StateReader> StateReader for &R {
    fn pool_token0(&self, pool: Address) -> impl Future<Output = Result<Address, ReadError>> + Send {
        (**self).pool_token0(pool)
    }

    fn coin_indices(
        &self,
        registry: Address,
        pool: Address,
        from: Address,
        to: Address,
    ) -> impl Future<Output = Result<CoinIndices, ReadError>> + Send {
        (**self).coin_indices(registry, pool, from, to)
    }
}

/// [`StateReader`] backed by an RPC [`Provider`].
///
/// It is recommended to setup provider with
/// [`alloy::transports::layers::FallbackLayer`]
/// and/or [`alloy::transports::layers::RetryBackoffLayer`], reads are not
/// retried here.
#[derive(Clone, Debug)]
pub struct ProviderReader<P> {
    provider: P,
    block_id: BlockId,
}

impl<P: Provider + Clone> ProviderReader<P> {
    /// Creates a reader of the latest block state.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            block_id: BlockId::Number(BlockNumberOrTag::Latest),
        }
    }

    /// Pins all reads to the specified block.
    pub fn at_block(mut self, block_id: BlockId) -> Self {
        self.block_id = block_id;
        self
    }
}

impl<P: Provider + Clone + Send + Sync> StateReader for ProviderReader<P> {
    async fn pool_token0(&self, pool: Address) -> Result<Address, ReadError> {
        IUniswapV2Pair::new(pool, self.provider.clone())
            .token0()
            .block(self.block_id)
            .call()
            .await
            .map_err(|err| ReadError::from_contract(pool, err))
    }

    async fn coin_indices(
        &self,
        registry: Address,
        pool: Address,
        from: Address,
        to: Address,
    ) -> Result<CoinIndices, ReadError> {
        let indices = ICurveRegistry::new(registry, self.provider.clone())
            .get_coin_indices(pool, from, to)
            .block(self.block_id)
            .call()
            .await
            .map_err(|err| ReadError::from_contract(registry, err))?;
        Ok(CoinIndices {
            i: indices._0,
            j: indices._1,
        })
    }
}
