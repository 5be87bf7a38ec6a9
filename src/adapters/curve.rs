use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use crate::{
    abi::executor::SwapExecutor,
    error::Result,
    reader::{CoinIndices, StateReader},
    types::SingleSwap,
};

/// Stable-swap pool adapter, single-hop only.
#[derive(Clone, Copy, Debug)]
pub struct CurveAdapter {
    registry: Address,
}

impl CurveAdapter {
    pub fn new(registry: Address) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    /// Resolves coin indices of the pool through the registry and encodes
    /// the swap.
    ///
    /// The registry lookup is the only failure-prone step, it fails when the
    /// registry does not know the pool/asset pairing.
    pub async fn generate_call<R: StateReader>(
        &self,
        swap: &SingleSwap,
        amount: U256,
        recipient: Address,
        reader: &R,
    ) -> Result<Bytes> {
        let indices = reader
            .coin_indices(self.registry, swap.pool, swap.asset_in, swap.asset_out)
            .await?;
        Ok(Self::encode(swap, indices, amount, recipient))
    }

    pub fn encode(swap: &SingleSwap, indices: CoinIndices, amount: U256, recipient: Address) -> Bytes {
        SwapExecutor::swapCurveSingleCall {
            pool: swap.pool,
            assetOut: swap.asset_out,
            i: indices.i,
            j: indices.j,
            recipient,
            amount,
        }
        .abi_encode()
        .into()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::{
        error::{Error, ReadError},
        testing::MockStateReader,
    };

    const REGISTRY: Address = address!("0x00000000000000000000000000000000000000e0");
    const POOL: Address = address!("0x0000000000000000000000000000000000000003");
    const USDT: Address = address!("0x0000000000000000000000000000000000000d01");
    const USDC: Address = address!("0x0000000000000000000000000000000000000d02");
    const R: Address = address!("0x00000000000000000000000000000000000000ff");

    #[tokio::test]
    async fn test_coin_indices_are_encoded() {
        let reader = MockStateReader::new();
        reader.set_coin_indices(POOL, USDT, USDC, CoinIndices { i: 2, j: 1 });

        let swap = SingleSwap::new(POOL, USDT, USDC);
        let call = CurveAdapter::new(REGISTRY)
            .generate_call(&swap, U256::from(500), R, &reader)
            .await
            .unwrap();

        assert_eq!(
            SwapExecutor::swapCurveSingleCall::abi_decode(&call).unwrap(),
            SwapExecutor::swapCurveSingleCall {
                pool: POOL,
                assetOut: USDC,
                i: 2,
                j: 1,
                recipient: R,
                amount: U256::from(500),
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_pairing_is_a_dependency_error() {
        let reader = MockStateReader::new();
        reader.set_coin_indices(POOL, USDT, USDC, CoinIndices { i: 0, j: 1 });

        let swap = SingleSwap::new(POOL, USDC, USDT);
        let err = CurveAdapter::new(REGISTRY)
            .generate_call(&swap, U256::from(500), R, &reader)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Dependency(ReadError::Reverted { contract, .. }) if contract == REGISTRY));
    }
}
