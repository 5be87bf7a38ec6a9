//! Compilation of a multi-hop [`Path`] into an atomic swap executor batch.
//!
//! Hops are grouped into maximal contiguous runs of the same venue. A run of
//! a multi-hop capable venue becomes a single call, a run of a single-hop
//! venue becomes one call per hop.
//!
//! Only the first call carries the caller-supplied amount. Every call but the
//! last one is flagged with [`AmountFlag::UseFullBalance`] so the executor
//! forwards whatever the step produced to the next step, intermediate outputs
//! are never predicted by the caller. Intermediate outputs stay on the
//! executor, the last call pays out to the recipient.

use alloy::primitives::{Address, Bytes, U256};
use futures::future::try_join_all;
use itertools::Itertools;
use tracing::debug;

use crate::{
    Chain,
    adapters::{CurveAdapter, UniswapV2Adapter},
    calls::{self, AmountFlag, CallParams},
    error::Result,
    reader::StateReader,
    types::{Path, SingleSwap, Venue},
};

/// Compiled path, wrapped calls in execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPath {
    calls: Vec<Bytes>,
}

impl CompiledPath {
    pub fn calls(&self) -> &[Bytes] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<Bytes> {
        self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calldata of the executor batch entry point running all the calls.
    pub fn batch(&self) -> Bytes {
        calls::encode_batch(&self.calls)
    }
}

/// One executor call to be generated.
#[derive(Debug)]
enum Step {
    ConstantProduct(Vec<SingleSwap>),
    StableSwap(SingleSwap),
}

/// Turns router-declared paths into executor batches for a particular chain.
#[derive(Clone, Debug)]
pub struct PathCompiler {
    executor: Address,
    curve: CurveAdapter,
}

impl PathCompiler {
    pub fn new(chain: &Chain) -> Self {
        Self {
            executor: chain.swap_executor(),
            curve: CurveAdapter::new(chain.curve_registry()),
        }
    }

    /// Compiles `path` swapping `amount` of its input asset and sending the
    /// output asset to `recipient`.
    ///
    /// Empty and non-chaining paths are rejected before any state read.
    /// State reads of all hops are issued concurrently.
    pub async fn compile<R: StateReader>(
        &self,
        path: &Path,
        amount: U256,
        recipient: Address,
        reader: &R,
    ) -> Result<CompiledPath> {
        path.validate()?;

        let steps = Self::plan(path);
        let last = steps.len() - 1;
        debug!(hops = path.len(), calls = steps.len(), %amount, %recipient, "compiling swap path");

        let calls = try_join_all(steps.iter().enumerate().map(|(idx, step)| {
            let step_amount = if idx == 0 { amount } else { U256::ZERO };
            let (step_recipient, flag) = if idx == last {
                (recipient, AmountFlag::Literal)
            } else {
                (self.executor, AmountFlag::UseFullBalance)
            };
            async move {
                let raw = self.generate(step, step_amount, step_recipient, reader).await?;
                calls::encode_call_params(&raw, Some(&CallParams::literal().with_amount_flag(flag)))
            }
        }))
        .await?;

        debug!(calls = calls.len(), "swap path compiled");
        Ok(CompiledPath { calls })
    }

    fn plan(path: &Path) -> Vec<Step> {
        let mut steps = Vec::with_capacity(path.len());
        let runs = path.hops().iter().chunk_by(|hop| hop.venue);
        for (venue, run) in &runs {
            let swaps = run.map(|hop| hop.swap);
            match venue {
                Venue::UniswapV2 => steps.push(Step::ConstantProduct(swaps.collect())),
                Venue::Curve => steps.extend(swaps.map(Step::StableSwap)),
            }
        }
        steps
    }

    async fn generate<R: StateReader>(
        &self,
        step: &Step,
        amount: U256,
        recipient: Address,
        reader: &R,
    ) -> Result<Bytes> {
        match step {
            Step::ConstantProduct(swaps) => {
                UniswapV2Adapter
                    .generate_multi_call(swaps, amount, recipient, reader)
                    .await
            }
            Step::StableSwap(swap) => {
                self.curve.generate_call(swap, amount, recipient, reader).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::address,
        sol_types::{SolCall, SolInterface},
    };

    use super::*;
    use crate::{
        abi::executor::SwapExecutor,
        calls::decode_call_params,
        error::Error,
        reader::CoinIndices,
        testing::MockStateReader,
        types::SwapHop,
    };

    const A: Address = address!("0x000000000000000000000000000000000000000a");
    const B: Address = address!("0x000000000000000000000000000000000000000b");
    const C: Address = address!("0x000000000000000000000000000000000000000c");
    const D: Address = address!("0x000000000000000000000000000000000000000d");
    const P1: Address = address!("0x0000000000000000000000000000000000000001");
    const P2: Address = address!("0x0000000000000000000000000000000000000002");
    const P3: Address = address!("0x0000000000000000000000000000000000000003");
    const P4: Address = address!("0x0000000000000000000000000000000000000004");
    const R: Address = address!("0x00000000000000000000000000000000000000ff");
    const EXECUTOR: Address = address!("0x0000000000000000000000000000000000000e0e");
    const REGISTRY: Address = address!("0x00000000000000000000000000000000000000e0");

    fn compiler() -> PathCompiler {
        PathCompiler::new(&Chain::custom(
            1,
            EXECUTOR,
            Address::ZERO,
            REGISTRY,
            Address::ZERO,
        ))
    }

    #[tokio::test]
    async fn test_constant_product_run_compiles_to_one_call() {
        let reader = MockStateReader::new();
        reader.set_token0(P1, A);
        reader.set_token0(P2, C);
        let path = Path::from(vec![SwapHop::uniswap_v2(P1, A, B), SwapHop::uniswap_v2(P2, B, C)]);

        let compiled = compiler()
            .compile(&path, U256::from(1_000_000), R, &reader)
            .await
            .unwrap();

        assert_eq!(compiled.len(), 1);
        let (params, raw) = decode_call_params(&compiled.calls()[0]).unwrap();
        assert_eq!(params.amount_flag, AmountFlag::Literal);
        let call = SwapExecutor::swapUniV2MultihopCall::abi_decode(&raw).unwrap();
        assert_eq!(call.pools, vec![P1, P2]);
        assert_eq!(call.direct, vec![true, false]);
        assert_eq!(call.amount, U256::from(1_000_000));
        assert_eq!(call.recipient, R);
    }

    #[tokio::test]
    async fn test_single_hop_run_chains_full_balance() {
        let reader = MockStateReader::new();
        reader.set_coin_indices(P1, A, B, CoinIndices { i: 0, j: 1 });
        reader.set_coin_indices(P2, B, C, CoinIndices { i: 1, j: 2 });
        reader.set_coin_indices(P3, C, D, CoinIndices { i: 2, j: 0 });
        let path = Path::from(vec![
            SwapHop::curve(P1, A, B),
            SwapHop::curve(P2, B, C),
            SwapHop::curve(P3, C, D),
        ]);

        let compiled = compiler()
            .compile(&path, U256::from(10), R, &reader)
            .await
            .unwrap();
        assert_eq!(compiled.len(), 3);

        let decoded = compiled
            .calls()
            .iter()
            .map(|c| decode_call_params(c).unwrap())
            .map(|(params, raw)| {
                (
                    params.amount_flag,
                    SwapExecutor::swapCurveSingleCall::abi_decode(&raw).unwrap(),
                )
            })
            .collect::<Vec<_>>();

        assert_eq!(
            decoded.iter().map(|(flag, _)| *flag).collect::<Vec<_>>(),
            vec![
                AmountFlag::UseFullBalance,
                AmountFlag::UseFullBalance,
                AmountFlag::Literal
            ]
        );
        assert_eq!(
            decoded.iter().map(|(_, c)| c.pool).collect::<Vec<_>>(),
            vec![P1, P2, P3]
        );
        assert_eq!(
            decoded.iter().map(|(_, c)| c.amount).collect::<Vec<_>>(),
            vec![U256::from(10), U256::ZERO, U256::ZERO]
        );
        assert_eq!(
            decoded.iter().map(|(_, c)| c.recipient).collect::<Vec<_>>(),
            vec![EXECUTOR, EXECUTOR, R]
        );
        assert_eq!((decoded[2].1.i, decoded[2].1.j), (2, 0));
    }

    #[tokio::test]
    async fn test_mixed_venues_keep_hop_order() {
        let reader = MockStateReader::new();
        reader.set_token0(P1, A);
        reader.set_token0(P2, B);
        reader.set_coin_indices(P3, C, D, CoinIndices { i: 0, j: 1 });
        reader.set_token0(P4, A);
        let path = Path::from(vec![
            SwapHop::uniswap_v2(P1, A, B),
            SwapHop::uniswap_v2(P2, B, C),
            SwapHop::curve(P3, C, D),
            SwapHop::uniswap_v2(P4, D, A),
        ]);

        let compiled = compiler()
            .compile(&path, U256::from(77), R, &reader)
            .await
            .unwrap();
        assert_eq!(compiled.len(), 3);

        let mut pools = vec![];
        for (idx, wrapped) in compiled.calls().iter().enumerate() {
            let (params, raw) = decode_call_params(wrapped).unwrap();
            let expected_flag = if idx == 2 {
                AmountFlag::Literal
            } else {
                AmountFlag::UseFullBalance
            };
            assert_eq!(params.amount_flag, expected_flag, "call {idx}");
            match SwapExecutor::SwapExecutorCalls::abi_decode(&raw).unwrap() {
                SwapExecutor::SwapExecutorCalls::swapUniV2Multihop(c) => pools.extend(c.pools),
                SwapExecutor::SwapExecutorCalls::swapCurveSingle(c) => pools.push(c.pool),
                other => panic!("unexpected call {other:?}"),
            }
        }
        assert_eq!(pools, vec![P1, P2, P3, P4]);
        assert_eq!(reader.reads(), 4);
    }

    #[tokio::test]
    async fn test_rejects_empty_path() {
        let reader = MockStateReader::new();
        let err = compiler()
            .compile(&Path::default(), U256::from(1), R, &reader)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyPath));
    }

    #[tokio::test]
    async fn test_rejects_broken_path_before_reading_state() {
        let reader = MockStateReader::new();
        reader.set_token0(P1, A);
        reader.set_token0(P2, C);
        let path = Path::from(vec![SwapHop::uniswap_v2(P1, A, B), SwapHop::uniswap_v2(P2, C, D)]);

        let err = compiler()
            .compile(&path, U256::from(1), R, &reader)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BrokenPath { index: 0, .. }));
        assert_eq!(reader.reads(), 0);
    }

    #[tokio::test]
    async fn test_failed_lookup_discards_the_whole_path() {
        let reader = MockStateReader::new();
        reader.set_token0(P1, A);
        let path = Path::from(vec![SwapHop::uniswap_v2(P1, A, B), SwapHop::curve(P2, B, C)]);

        let err = compiler()
            .compile(&path, U256::from(1), R, &reader)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Dependency(_)));
    }

    #[test]
    fn test_batch_wraps_all_calls() {
        let compiled = CompiledPath {
            calls: vec![Bytes::from_static(&[0, 1, 2, 3, 4])],
        };
        let batch = compiled.batch();
        assert_eq!(
            SwapExecutor::executeCallsCall::abi_decode(&batch).unwrap().calls,
            compiled.into_calls()
        );
    }
}
