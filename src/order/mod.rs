//! Authenticated order variants.
//!
//! Orders are value objects: constructed once through the builders, never
//! mutated. Each variant has a fixed field layout prefixed by its
//! [`OrderKind`] tag, see [`codec`] for the exact bytes and the canonical
//! hash. Signatures never become part of an order, they are attached by
//! [`crate::sign::Signed`].

mod builder;
pub mod codec;

use alloy::primitives::{Address, B256, U256};

pub use builder::{CrossChainOrderBuilder, LimitOrderBuilder, LockOrderBuilder};

use crate::{
    abi::typed,
    error::{Error, Result},
    num,
    types::Side,
};

/// Tag byte prepended to the packed encoding of each order variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OrderKind {
    CrossChain = 0x03,
    Lock = 0x04,
    Cancel = 0x05,
}

impl OrderKind {
    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for OrderKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x03 => Ok(OrderKind::CrossChain),
            0x04 => Ok(OrderKind::Lock),
            0x05 => Ok(OrderKind::Cancel),
            other => Err(Error::UnknownOrderKind(other)),
        }
    }
}

/// Limit order matched by the exchange, the body of a [`CrossChainOrder`].
///
/// Quantities are fixed-point with [`num::ORDER_DECIMALS`] decimals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LimitOrder {
    pub(crate) sender: Address,
    pub(crate) matcher: Address,
    pub(crate) base_asset: Address,
    pub(crate) quote_asset: Address,
    pub(crate) matcher_fee_asset: Address,
    pub(crate) amount: u64,
    pub(crate) price: u64,
    pub(crate) matcher_fee: u64,
    pub(crate) nonce: u64,
    pub(crate) expiration: u64,
    pub(crate) side: Side,
}

impl LimitOrder {
    pub fn builder() -> LimitOrderBuilder {
        LimitOrderBuilder::default()
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn matcher(&self) -> Address {
        self.matcher
    }

    pub fn base_asset(&self) -> Address {
        self.base_asset
    }

    pub fn quote_asset(&self) -> Address {
        self.quote_asset
    }

    pub fn matcher_fee_asset(&self) -> Address {
        self.matcher_fee_asset
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn matcher_fee(&self) -> u64 {
        self.matcher_fee
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Expiration timestamp, in milliseconds.
    pub fn expiration(&self) -> u64 {
        self.expiration
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub(crate) fn to_typed(self) -> typed::Order {
        typed::Order {
            senderAddress: self.sender,
            matcherAddress: self.matcher,
            baseAsset: self.base_asset,
            quoteAsset: self.quote_asset,
            matcherFeeAsset: self.matcher_fee_asset,
            amount: self.amount,
            price: self.price,
            matcherFee: self.matcher_fee,
            nonce: self.nonce,
            expiration: self.expiration,
            buySide: self.side.as_byte(),
        }
    }
}

/// Limit order executed on the target chain once the secret behind
/// `secret_hash` is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CrossChainOrder {
    pub(crate) limit_order: LimitOrder,
    pub(crate) target_chain_id: u32,
    pub(crate) secret_hash: B256,
    pub(crate) lock_order_expiration: u64,
}

impl CrossChainOrder {
    pub fn builder() -> CrossChainOrderBuilder {
        CrossChainOrderBuilder::default()
    }

    pub fn limit_order(&self) -> &LimitOrder {
        &self.limit_order
    }

    pub fn target_chain_id(&self) -> u64 {
        self.target_chain_id as u64
    }

    pub fn secret_hash(&self) -> B256 {
        self.secret_hash
    }

    pub fn lock_order_expiration(&self) -> u64 {
        self.lock_order_expiration
    }

    /// Canonical hash, see [`codec`].
    pub fn hash(&self) -> B256 {
        codec::order_hash(self)
    }

    pub(crate) fn to_typed(self) -> typed::CrossChainOrder {
        typed::CrossChainOrder {
            limitOrder: self.limit_order.to_typed(),
            chainId: self.target_chain_id,
            secretHash: self.secret_hash,
            lockOrderExpiration: self.lock_order_expiration,
        }
    }
}

/// Lock of `amount` of `asset` on the source chain, redeemable on the target
/// chain against the secret behind `secret_hash`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LockOrder {
    pub(crate) sender: Address,
    pub(crate) expiration: u64,
    pub(crate) asset: Address,
    pub(crate) amount: u64,
    pub(crate) target_chain_id: u32,
    pub(crate) secret_hash: B256,
}

impl LockOrder {
    pub fn builder() -> LockOrderBuilder {
        LockOrderBuilder::default()
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn expiration(&self) -> u64 {
        self.expiration
    }

    pub fn asset(&self) -> Address {
        self.asset
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn target_chain_id(&self) -> u64 {
        self.target_chain_id as u64
    }

    pub fn secret_hash(&self) -> B256 {
        self.secret_hash
    }

    /// Canonical hash, see [`codec`].
    pub fn hash(&self) -> B256 {
        codec::order_hash(self)
    }

    pub(crate) fn to_typed(self) -> typed::LockOrder {
        typed::LockOrder {
            sender: self.sender,
            expiration: self.expiration,
            asset: self.asset,
            amount: self.amount,
            targetChainId: self.target_chain_id,
            secretHash: self.secret_hash,
        }
    }
}

/// Request to cancel a previously placed order identified by its hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CancelOrderRequest {
    pub(crate) sender: Address,
    pub(crate) order_id: B256,
    pub(crate) chain_id: u32,
}

impl CancelOrderRequest {
    pub fn new(sender: Address, order_id: B256, chain_id: u64) -> Result<Self> {
        Ok(Self {
            sender,
            order_id,
            chain_id: num::narrow_u32("chain_id", U256::from(chain_id))?,
        })
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn order_id(&self) -> B256 {
        self.order_id
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id as u64
    }

    /// Canonical hash, see [`codec`].
    pub fn hash(&self) -> B256 {
        codec::order_hash(self)
    }

    pub(crate) fn to_typed(self) -> typed::DeleteOrder {
        typed::DeleteOrder {
            senderAddress: self.sender,
            id: self.order_id,
            chainId: self.chain_id,
        }
    }
}

/// Any authenticated order, dispatched by its [`OrderKind`] tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnyOrder {
    CrossChain(CrossChainOrder),
    Lock(LockOrder),
    Cancel(CancelOrderRequest),
}

impl AnyOrder {
    pub fn kind(&self) -> OrderKind {
        match self {
            AnyOrder::CrossChain(_) => OrderKind::CrossChain,
            AnyOrder::Lock(_) => OrderKind::Lock,
            AnyOrder::Cancel(_) => OrderKind::Cancel,
        }
    }

    /// Tagged packed encoding, see [`codec`].
    pub fn encode_packed(&self) -> Vec<u8> {
        match self {
            AnyOrder::CrossChain(o) => codec::encode_packed(o),
            AnyOrder::Lock(o) => codec::encode_packed(o),
            AnyOrder::Cancel(o) => codec::encode_packed(o),
        }
    }

    /// Canonical hash, see [`codec`].
    pub fn hash(&self) -> B256 {
        match self {
            AnyOrder::CrossChain(o) => o.hash(),
            AnyOrder::Lock(o) => o.hash(),
            AnyOrder::Cancel(o) => o.hash(),
        }
    }

    /// Decodes a tagged packed encoding produced by [`Self::encode_packed`].
    pub fn decode_packed(data: &[u8]) -> Result<Self> {
        codec::decode_packed(data)
    }
}

impl From<CrossChainOrder> for AnyOrder {
    fn from(value: CrossChainOrder) -> Self {
        AnyOrder::CrossChain(value)
    }
}

impl From<LockOrder> for AnyOrder {
    fn from(value: LockOrder) -> Self {
        AnyOrder::Lock(value)
    }
}

impl From<CancelOrderRequest> for AnyOrder {
    fn from(value: CancelOrderRequest) -> Self {
        AnyOrder::Cancel(value)
    }
}
