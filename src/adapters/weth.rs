use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use crate::abi::executor::SwapExecutor;

/// Wraps the native value attached to the call and sends wrapped tokens to
/// `target`. The value itself is carried by the call control word.
pub fn wrap_and_transfer(target: Address) -> Bytes {
    SwapExecutor::wrapAndTransferCall { target }.abi_encode().into()
}

/// Unwraps `amount` of wrapped native token and sends the native value to
/// `target`.
pub fn unwrap_and_transfer(target: Address, amount: U256) -> Bytes {
    SwapExecutor::unwrapAndTransferCall { target, amount }
        .abi_encode()
        .into()
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const TARGET: Address = address!("0x00000000000000000000000000000000000000bb");

    #[test]
    fn test_wrap_and_transfer_layout() {
        let call = wrap_and_transfer(TARGET);
        assert_eq!(call.len(), 4 + 32);
        assert_eq!(&call[..4], &SwapExecutor::wrapAndTransferCall::SELECTOR);
        assert_eq!(&call[16..], TARGET.as_slice());
    }

    #[test]
    fn test_unwrap_and_transfer_layout() {
        let call = unwrap_and_transfer(TARGET, U256::from(7));
        assert_eq!(
            SwapExecutor::unwrapAndTransferCall::abi_decode(&call).unwrap(),
            SwapExecutor::unwrapAndTransferCall {
                target: TARGET,
                amount: U256::from(7)
            }
        );
    }
}
