use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use crate::abi::executor::SwapExecutor;

/// Transfers `amount` of `token` held by the executor to `target`.
pub fn transfer(token: Address, target: Address, amount: U256) -> Bytes {
    SwapExecutor::safeTransferCall {
        token,
        target,
        amount,
    }
    .abi_encode()
    .into()
}

/// Approves `target` to spend `amount` of `token` held by the executor.
pub fn approve(token: Address, target: Address, amount: U256) -> Bytes {
    SwapExecutor::safeApproveCall {
        token,
        target,
        amount,
    }
    .abi_encode()
    .into()
}
