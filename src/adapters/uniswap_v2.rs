use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use futures::future::try_join_all;

use crate::{
    abi::executor::SwapExecutor, error::Result, reader::StateReader, types::SingleSwap,
};

/// Constant-product pool adapter, multi-hop capable.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniswapV2Adapter;

impl UniswapV2Adapter {
    /// Encodes a run of hops into a single executor call.
    ///
    /// Pool orientation is resolved with one `token0` read per hop, reads are
    /// issued concurrently and attributed back by hop index, so `pools` and
    /// `direct` stay index-aligned with `hops`.
    pub async fn generate_multi_call<R: StateReader>(
        &self,
        hops: &[SingleSwap],
        amount: U256,
        recipient: Address,
        reader: &R,
    ) -> Result<Bytes> {
        let token0s = try_join_all(hops.iter().map(|hop| reader.pool_token0(hop.pool))).await?;
        let direct = hops
            .iter()
            .zip(token0s)
            .map(|(hop, token0)| token0 == hop.asset_in)
            .collect();
        let pools = hops.iter().map(|hop| hop.pool).collect();
        Ok(Self::encode(pools, direct, amount, recipient))
    }

    /// Encodes a single hop, see [`Self::generate_multi_call`].
    pub async fn generate_call<R: StateReader>(
        &self,
        swap: &SingleSwap,
        amount: U256,
        recipient: Address,
        reader: &R,
    ) -> Result<Bytes> {
        self.generate_multi_call(std::slice::from_ref(swap), amount, recipient, reader)
            .await
    }

    /// Encodes already resolved hop data.
    ///
    /// `direct[i]` is `true` when the input asset of hop `i` is the pool's
    /// `token0`, a misaligned flag silently reverses the swap direction.
    pub fn encode(pools: Vec<Address>, direct: Vec<bool>, amount: U256, recipient: Address) -> Bytes {
        SwapExecutor::swapUniV2MultihopCall {
            pools,
            direct,
            amount,
            recipient,
        }
        .abi_encode()
        .into()
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::{error::Error, error::ReadError, testing::MockStateReader};

    const A: Address = address!("0x000000000000000000000000000000000000000a");
    const B: Address = address!("0x000000000000000000000000000000000000000b");
    const C: Address = address!("0x000000000000000000000000000000000000000c");
    const P1: Address = address!("0x0000000000000000000000000000000000000001");
    const P2: Address = address!("0x0000000000000000000000000000000000000002");
    const R: Address = address!("0x00000000000000000000000000000000000000ff");

    #[tokio::test]
    async fn test_orientation_flags_follow_hops() {
        let reader = MockStateReader::new();
        reader.set_token0(P1, A);
        reader.set_token0(P2, C);

        let hops = [SingleSwap::new(P1, A, B), SingleSwap::new(P2, B, C)];
        let call = UniswapV2Adapter
            .generate_multi_call(&hops, U256::from(1_000_000), R, &reader)
            .await
            .unwrap();

        let decoded = SwapExecutor::swapUniV2MultihopCall::abi_decode(&call).unwrap();
        assert_eq!(decoded.pools, vec![P1, P2]);
        assert_eq!(decoded.direct, vec![true, false]);
        assert_eq!(decoded.amount, U256::from(1_000_000));
        assert_eq!(decoded.recipient, R);
        assert_eq!(reader.reads(), 2);
    }

    #[tokio::test]
    async fn test_unknown_pool_is_a_dependency_error() {
        let reader = MockStateReader::new();
        let err = UniswapV2Adapter
            .generate_call(&SingleSwap::new(P1, A, B), U256::from(1), R, &reader)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Dependency(ReadError::ContractNotFound(p)) if p == P1));
    }
}
