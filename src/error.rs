use std::fmt::Display;

use alloy::{
    contract,
    primitives::{Address, U256},
    transports,
};

use crate::sign::{SignatureError, SignerError};

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by the swap encoding and order authentication routines.
///
/// Nothing is retried or logged-and-swallowed internally, every failure
/// reaches the immediate caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("swap path is empty")]
    EmptyPath,

    #[error("hops {index} and {} do not chain: asset out {asset_out} != asset in {asset_in}", .index + 1)]
    BrokenPath {
        index: usize,
        asset_out: Address,
        asset_in: Address,
    },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("value {value} of `{field}` does not fit into {bits} bits")]
    Overflow {
        field: &'static str,
        bits: u32,
        value: U256,
    },

    #[error("`{field}` has more than {decimals} decimals")]
    Precision { field: &'static str, decimals: u8 },

    #[error("malformed call payload: {0}")]
    MalformedPayload(String),

    #[error("unknown order side byte: {0:#04x}")]
    UnknownSide(u8),

    #[error("unknown order tag: {0:#04x}")]
    UnknownOrderKind(u8),

    #[error("dependency unavailable: {0}")]
    Dependency(#[from] ReadError),

    #[error("no domain configured for chain {0}")]
    UnknownChain(u64),

    #[error("signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("invalid signature: {0}")]
    Signature(#[from] SignatureError),
}

/// Failure of an on-chain state read issued by [`crate::reader::StateReader`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("contract not found at {0}")]
    ContractNotFound(Address),

    #[error("read from {contract} reverted: {reason}")]
    Reverted { contract: Address, reason: String },

    #[error("unexpected empty RPC response")]
    NullResp,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("fatal error: {0}")]
    Fatal(String),
}

impl ReadError {
    /// Maps an alloy contract call error issued against `contract`.
    pub fn from_contract(contract: Address, value: contract::Error) -> Self {
        match value {
            contract::Error::ContractNotDeployed | contract::Error::ZeroData(_, _) => {
                Self::ContractNotFound(contract)
            }
            contract::Error::UnknownFunction(_)
            | contract::Error::UnknownSelector(_)
            | contract::Error::NotADeploymentTransaction
            | contract::Error::AbiError(_) => Self::Fatal(value.to_string()),
            contract::Error::TransportError(rpc_err) => Self::from_rpc(contract, rpc_err),
            contract::Error::PendingTransactionError(err) => Self::Transport(err.to_string()),
        }
    }

    fn from_rpc<E: Display>(contract: Address, value: transports::RpcError<E>) -> Self {
        match value {
            transports::RpcError::ErrorResp(ref resp) => {
                let msg = resp.message.to_ascii_lowercase();
                if resp.code == 3 || msg.contains("revert") {
                    Self::Reverted {
                        contract,
                        reason: resp.message.to_string(),
                    }
                } else {
                    Self::Transport(value.to_string())
                }
            }
            transports::RpcError::NullResp => Self::NullResp,
            _ => Self::Transport(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn test_broken_path_message_names_both_hops() {
        let err = Error::BrokenPath {
            index: 1,
            asset_out: address!("0x00000000000000000000000000000000000000b0"),
            asset_in: address!("0x00000000000000000000000000000000000000c0"),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("hops 1 and 2 do not chain"), "{msg}");
    }

    #[test]
    fn test_contract_not_deployed_maps_to_not_found() {
        let pool = address!("0x00000000000000000000000000000000000000a1");
        assert_eq!(
            ReadError::from_contract(pool, contract::Error::ContractNotDeployed),
            ReadError::ContractNotFound(pool)
        );
    }

    #[test]
    fn test_null_response_maps_to_null_resp() {
        let pool = address!("0x00000000000000000000000000000000000000a1");
        let err = contract::Error::TransportError(transports::RpcError::NullResp);
        assert_eq!(ReadError::from_contract(pool, err), ReadError::NullResp);
    }
}
