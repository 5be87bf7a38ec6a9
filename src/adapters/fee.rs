use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use crate::abi::executor::SwapExecutor;

/// Pays `amount` of `token` held by the executor to the order `matcher`.
pub fn pay_fee(matcher: Address, token: Address, amount: U256) -> Bytes {
    SwapExecutor::payFeeToMatcherCall {
        matcher,
        token,
        amount,
    }
    .abi_encode()
    .into()
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn test_pay_fee_field_order() {
        let matcher = address!("0x00000000000000000000000000000000000000cc");
        let token = address!("0x00000000000000000000000000000000000000aa");
        let call = pay_fee(matcher, token, U256::from(300));
        assert_eq!(&call[..4], &SwapExecutor::payFeeToMatcherCall::SELECTOR);
        assert_eq!(&call[16..36], matcher.as_slice());
        assert_eq!(&call[48..68], token.as_slice());
        assert_eq!(U256::from_be_slice(&call[68..]), U256::from(300));
    }
}
