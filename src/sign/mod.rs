//! EIP-712 signing of orders.
//!
//! [`OrderSigner`] resolves the domain of the chain scoping an order, hands a
//! data-only [`TypedDataRequest`] to a [`TypedDataSigner`], and normalizes
//! whatever signature comes back into a [`CanonicalSignature`].
//!
//! Signers disagree on the recovery byte: software keys produce `27`/`28`,
//! hardware wallets commonly `0`/`1`, some produce EIP-155 values or EIP-2098
//! compact signatures. All of them normalize to the same 65 bytes
//! `r ‖ s ‖ v` with `v ∈ {27, 28}`, the form the verifying contracts expect.

mod local;

use std::{borrow::Cow, future::Future};

use alloy::{
    hex,
    primitives::{Address, B256, Bytes, Signature, U256, keccak256},
    sol_types::{Eip712Domain, SolStruct},
};
use tracing::debug;

pub use local::LocalSigner;

use crate::{
    ChainRegistry,
    abi::typed,
    error::Result,
    order::{CancelOrderRequest, CrossChainOrder, LockOrder},
};

/// Length of a [`CanonicalSignature`].
pub const SIGNATURE_LEN: usize = 65;

/// Length of an EIP-2098 compact signature.
pub const COMPACT_SIGNATURE_LEN: usize = 64;

/// EIP-712 domain separating signatures of a particular exchange deployment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DomainData {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl DomainData {
    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    pub fn separator(&self) -> B256 {
        self.to_eip712().separator()
    }
}

/// Failure reported by a [`TypedDataSigner`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    /// Signing was declined, e.g. by the wallet user.
    #[error("signing refused: {0}")]
    Refused(String),

    #[error("signing failed: {0}")]
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature must be 64 or 65 bytes long, got {0}")]
    InvalidLength(usize),

    #[error("unsupported recovery id {0}")]
    InvalidRecoveryId(u8),

    #[error("signature recovery failed: {0}")]
    Recovery(String),

    #[error("signature recovers to {recovered}, signer is {expected}")]
    SignerMismatch { expected: Address, recovered: Address },
}

/// Normalized `r ‖ s ‖ v` signature with `v ∈ {27, 28}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, derive_more::Debug)]
#[debug("{}", hex::encode_prefixed(_0))]
pub struct CanonicalSignature([u8; SIGNATURE_LEN]);

impl CanonicalSignature {
    fn from_parts(r: &[u8], s: &[u8], y_parity: bool) -> Self {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(r);
        out[32..64].copy_from_slice(s);
        out[64] = 27 + y_parity as u8;
        Self(out)
    }

    pub fn r(&self) -> B256 {
        B256::from_slice(&self.0[..32])
    }

    pub fn s(&self) -> B256 {
        B256::from_slice(&self.0[32..64])
    }

    pub fn v(&self) -> u8 {
        self.0[64]
    }

    pub fn y_parity(&self) -> bool {
        self.v() == 28
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.0)
    }

    pub fn to_alloy(&self) -> Signature {
        Signature::new(
            U256::from_be_bytes(self.r().0),
            U256::from_be_bytes(self.s().0),
            self.y_parity(),
        )
    }

    /// Address that signed `hash`.
    pub fn recover(&self, hash: &B256) -> std::result::Result<Address, SignatureError> {
        self.to_alloy()
            .recover_address_from_prehash(hash)
            .map_err(|err| SignatureError::Recovery(err.to_string()))
    }
}

/// Normalizes a signature of any supported signer convention.
///
/// Normalizing a [`CanonicalSignature`] returns it unchanged.
pub fn normalize_signature(raw: &[u8]) -> std::result::Result<CanonicalSignature, SignatureError> {
    match raw.len() {
        SIGNATURE_LEN => {
            let y_parity = match raw[64] {
                v @ (0 | 1) => v == 1,
                v @ (27 | 28) => v == 28,
                // EIP-155 `chain_id * 2 + 35 + parity`; one byte only carries it
                // for chain ids up to 110.
                v @ 35..=255 => (v - 35) & 1 == 1,
                v => return Err(SignatureError::InvalidRecoveryId(v)),
            };
            Ok(CanonicalSignature::from_parts(&raw[..32], &raw[32..64], y_parity))
        }
        COMPACT_SIGNATURE_LEN => {
            // EIP-2098: parity is the top bit of `s`.
            let mut s = [0u8; 32];
            s.copy_from_slice(&raw[32..]);
            let y_parity = s[0] & 0x80 != 0;
            s[0] &= 0x7f;
            Ok(CanonicalSignature::from_parts(&raw[..32], &s, y_parity))
        }
        len => Err(SignatureError::InvalidLength(len)),
    }
}

/// Data-only description of a typed-data signing operation.
///
/// Carries everything a wallet needs to display and sign the structure, as
/// well as the final digest for signers operating on hashes only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedDataRequest {
    pub domain: DomainData,
    pub primary_type: &'static str,
    pub encoded_type: String,
    pub encoded_data: Bytes,
    pub struct_hash: B256,
}

impl TypedDataRequest {
    pub fn new<T: SolStruct>(domain: DomainData, value: &T) -> Self {
        Self {
            domain,
            primary_type: T::NAME,
            encoded_type: T::eip712_encode_type().into_owned(),
            encoded_data: value.eip712_encode_data().into(),
            struct_hash: value.eip712_hash_struct(),
        }
    }

    /// `keccak256(0x1901 ‖ domainSeparator ‖ structHash)`.
    pub fn signing_hash(&self) -> B256 {
        let mut digest = [0u8; 66];
        digest[..2].copy_from_slice(&[0x19, 0x01]);
        digest[2..34].copy_from_slice(self.domain.separator().as_slice());
        digest[34..].copy_from_slice(self.struct_hash.as_slice());
        keccak256(digest)
    }
}

/// Capability to sign EIP-712 typed data.
///
/// Key custody is entirely up to the implementation: local keys, hardware
/// wallets and remote signers are interchangeable.
pub trait TypedDataSigner: Send + Sync {
    /// Address the produced signatures recover to.
    fn address(&self) -> Address;

    /// Signs the request, returning the signature in the signer's own
    /// convention.
    fn sign_typed_data(
        &self,
        request: &TypedDataRequest,
    ) -> impl Future<Output = std::result::Result<Bytes, SignerError>> + Send;
}

impl<S: TypedDataSigner> TypedDataSigner for &S {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn sign_typed_data(
        &self,
        request: &TypedDataRequest,
    ) -> impl Future<Output = std::result::Result<Bytes, SignerError>> + Send {
        (**self).sign_typed_data(request)
    }
}

/// Order with an EIP-712 representation.
pub trait TypedOrder {
    type Typed: SolStruct;

    fn typed(&self) -> Self::Typed;

    /// Chain whose domain scopes the signature.
    fn domain_chain_id(&self) -> u64;
}

impl TypedOrder for CrossChainOrder {
    type Typed = typed::CrossChainOrder;

    fn typed(&self) -> Self::Typed {
        self.to_typed()
    }

    fn domain_chain_id(&self) -> u64 {
        self.target_chain_id()
    }
}

impl TypedOrder for LockOrder {
    type Typed = typed::LockOrder;

    fn typed(&self) -> Self::Typed {
        self.to_typed()
    }

    fn domain_chain_id(&self) -> u64 {
        self.target_chain_id()
    }
}

impl TypedOrder for CancelOrderRequest {
    type Typed = typed::DeleteOrder;

    fn typed(&self) -> Self::Typed {
        self.to_typed()
    }

    fn domain_chain_id(&self) -> u64 {
        self.chain_id()
    }
}

/// Order paired with its normalized signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signed<O> {
    order: O,
    signature: CanonicalSignature,
}

impl<O: TypedOrder> Signed<O> {
    pub fn new(order: O, signature: CanonicalSignature) -> Self {
        Self { order, signature }
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    pub fn signature(&self) -> &CanonicalSignature {
        &self.signature
    }

    pub fn into_parts(self) -> (O, CanonicalSignature) {
        (self.order, self.signature)
    }

    /// Recovers the signer the way the verifying contract does.
    pub fn recover_signer(&self, domain: &DomainData) -> Result<Address> {
        let request = TypedDataRequest::new(domain.clone(), &self.order.typed());
        Ok(self.signature.recover(&request.signing_hash())?)
    }
}

/// Signs orders with domains taken from the chain registry.
#[derive(Clone, Debug)]
pub struct OrderSigner<S> {
    chains: ChainRegistry,
    signer: S,
}

impl<S: TypedDataSigner> OrderSigner<S> {
    pub fn new(chains: ChainRegistry, signer: S) -> Self {
        Self { chains, signer }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chains(&self) -> &ChainRegistry {
        &self.chains
    }

    /// Signs `order`, leaving it untouched.
    ///
    /// Signer failures are returned as is and never retried. The normalized
    /// signature is checked to recover to the signer's address.
    pub async fn sign<O: TypedOrder>(&self, order: O) -> Result<Signed<O>> {
        let domain = self.chains.domain(order.domain_chain_id())?;
        let request = TypedDataRequest::new(domain, &order.typed());
        let digest = request.signing_hash();
        debug!(
            primary_type = request.primary_type,
            chain_id = request.domain.chain_id,
            %digest,
            "requesting typed data signature"
        );

        let raw = self.signer.sign_typed_data(&request).await?;
        let signature = normalize_signature(&raw)?;

        let expected = self.signer.address();
        let recovered = signature.recover(&digest)?;
        if recovered != expected {
            return Err(SignatureError::SignerMismatch {
                expected,
                recovered,
            }
            .into());
        }

        debug!(signer = %expected, ?signature, "order signed");
        Ok(Signed::new(order, signature))
    }
}
