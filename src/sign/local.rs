use std::str::FromStr;

use alloy::{
    primitives::{Address, Bytes},
    signers::{Signer, local::PrivateKeySigner},
};

use super::{SignerError, TypedDataRequest, TypedDataSigner};

/// [`TypedDataSigner`] holding a private key in memory.
///
/// Signs the final EIP-712 digest, producing `27`/`28` recovery bytes.
#[derive(Clone, Debug)]
pub struct LocalSigner {
    inner: PrivateKeySigner,
}

impl LocalSigner {
    pub fn new(inner: PrivateKeySigner) -> Self {
        Self { inner }
    }
}

impl FromStr for LocalSigner {
    type Err = SignerError;

    /// Parses a hex-encoded private key, with or without `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKeySigner::from_str(s)
            .map(Self::new)
            .map_err(|err| SignerError::Failed(format!("invalid private key: {err}")))
    }
}

impl TypedDataSigner for LocalSigner {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn sign_typed_data(&self, request: &TypedDataRequest) -> Result<Bytes, SignerError> {
        let signature = self
            .inner
            .sign_hash(&request.signing_hash())
            .await
            .map_err(|err| SignerError::Failed(err.to_string()))?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{B256, address};

    use super::*;

    // First default Anvil account.
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_parse_private_key() {
        let signer = LocalSigner::from_str(KEY).unwrap();
        assert_eq!(
            signer.address(),
            address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert!(matches!(
            LocalSigner::from_str("0x1234"),
            Err(SignerError::Failed(_))
        ));
    }

    #[tokio::test]
    async fn test_produces_high_recovery_bytes() {
        let signer = LocalSigner::from_str(KEY).unwrap();
        let request = TypedDataRequest {
            domain: crate::testing::chains()
                .domain(crate::testing::TARGET_CHAIN_ID)
                .unwrap(),
            primary_type: "Empty",
            encoded_type: "Empty()".to_string(),
            encoded_data: Bytes::new(),
            struct_hash: B256::repeat_byte(0x42),
        };
        let raw = signer.sign_typed_data(&request).await.unwrap();
        assert_eq!(raw.len(), 65);
        assert!(matches!(raw[64], 27 | 28));
    }
}
