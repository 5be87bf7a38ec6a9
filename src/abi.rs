#[allow(clippy::too_many_arguments)]
pub mod executor {
    alloy::sol!(
        /// Swap executor entry points the adapters produce calldata for.
        ///
        /// Every call placed into [`SwapExecutor::executeCallsCall`] is prefixed
        /// with the control word produced by [`crate::calls::encode_call_params`].
        #[derive(Debug, PartialEq, Eq)]
        interface SwapExecutor {
            function swapUniV2Multihop(address[] pools, bool[] direct, uint256 amount, address recipient) external;
            function swapCurveSingle(address pool, address assetOut, int128 i, int128 j, address recipient, uint256 amount) external;
            function safeTransfer(address token, address target, uint256 amount) external;
            function safeApprove(address token, address target, uint256 amount) external;
            function wrapAndTransfer(address target) external payable;
            function unwrapAndTransfer(address target, uint256 amount) external;
            function payFeeToMatcher(address matcher, address token, uint256 amount) external;
            function executeCalls(bytes[] calls) external payable;
        }
    );
}

pub mod venues {
    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        interface IUniswapV2Pair {
            function token0() external view returns (address);
        }
    );

    alloy::sol!(
        #[derive(Debug)]
        #[sol(rpc)]
        interface ICurveRegistry {
            function get_coin_indices(address pool, address from, address to) external view returns (int128, int128, bool);
        }
    );
}

/// EIP-712 typed structs the exchange contracts recover signatures against.
pub mod typed {
    alloy::sol!(
        #[derive(Debug, PartialEq, Eq)]
        struct Order {
            address senderAddress;
            address matcherAddress;
            address baseAsset;
            address quoteAsset;
            address matcherFeeAsset;
            uint64 amount;
            uint64 price;
            uint64 matcherFee;
            uint64 nonce;
            uint64 expiration;
            uint8 buySide;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct CrossChainOrder {
            Order limitOrder;
            uint32 chainId;
            bytes32 secretHash;
            uint64 lockOrderExpiration;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct LockOrder {
            address sender;
            uint64 expiration;
            address asset;
            uint64 amount;
            uint32 targetChainId;
            bytes32 secretHash;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct DeleteOrder {
            address senderAddress;
            bytes32 id;
            uint32 chainId;
        }
    );
}
