//! Canonical packed encoding and hashing of orders.
//!
//! The encoding is the tight concatenation of the variant's [`OrderKind`] tag
//! followed by its fields in declared order, each at its declared width,
//! integers big-endian, with no padding:
//!
//! ```text
//! limit order body : sender(20) matcher(20) baseAsset(20) quoteAsset(20) matcherFeeAsset(20)
//!                    amount(8) price(8) matcherFee(8) nonce(8) expiration(8) side(1)
//! CrossChainOrder  : 0x03 | limit order body | targetChainId(4) | secretHash(32) | lockOrderExpiration(8)
//! LockOrder        : 0x04 | sender(20) | expiration(8) | asset(20) | amount(8) | targetChainId(4) | secretHash(32)
//! CancelOrderRequest: 0x05 | sender(20) | orderId(32) | chainId(4)
//! ```
//!
//! The canonical hash is `keccak256` of the encoding. It never covers a
//! signature.

use alloy::{
    primitives::{Address, B256, FixedBytes, keccak256},
    sol_types::SolValue,
};

use super::{AnyOrder, CancelOrderRequest, CrossChainOrder, LimitOrder, LockOrder, OrderKind};
use crate::{
    error::{Error, Result},
    types::Side,
};

/// Order variant with a fixed packed layout.
pub trait PackedOrder: Sized {
    const KIND: OrderKind;

    /// Fields in declared order, without the tag.
    fn packed_fields(&self) -> Vec<u8>;

    /// Inverse of [`Self::packed_fields`], `fields` must be consumed exactly.
    fn from_packed_fields(fields: &mut FieldReader<'_>) -> Result<Self>;
}

/// Tagged packed encoding of `order`.
pub fn encode_packed<O: PackedOrder>(order: &O) -> Vec<u8> {
    let fields = order.packed_fields();
    let mut out = Vec::with_capacity(1 + fields.len());
    out.push(O::KIND.tag());
    out.extend_from_slice(&fields);
    out
}

/// Canonical order hash.
pub fn order_hash<O: PackedOrder>(order: &O) -> B256 {
    keccak256(encode_packed(order))
}

/// Decodes a tagged packed encoding, dispatching by the tag byte.
pub fn decode_packed(data: &[u8]) -> Result<AnyOrder> {
    let (&tag, fields) = data
        .split_first()
        .ok_or_else(|| Error::MalformedPayload("empty order encoding".to_string()))?;
    let mut reader = FieldReader::new(fields);
    let order = match OrderKind::try_from(tag)? {
        OrderKind::CrossChain => AnyOrder::CrossChain(CrossChainOrder::from_packed_fields(&mut reader)?),
        OrderKind::Lock => AnyOrder::Lock(LockOrder::from_packed_fields(&mut reader)?),
        OrderKind::Cancel => AnyOrder::Cancel(CancelOrderRequest::from_packed_fields(&mut reader)?),
    };
    reader.finish()?;
    Ok(order)
}

impl LimitOrder {
    fn from_packed_body(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            sender: fields.address()?,
            matcher: fields.address()?,
            base_asset: fields.address()?,
            quote_asset: fields.address()?,
            matcher_fee_asset: fields.address()?,
            amount: fields.u64()?,
            price: fields.u64()?,
            matcher_fee: fields.u64()?,
            nonce: fields.u64()?,
            expiration: fields.u64()?,
            side: Side::try_from(fields.u8()?)?,
        })
    }
}

impl PackedOrder for CrossChainOrder {
    const KIND: OrderKind = OrderKind::CrossChain;

    fn packed_fields(&self) -> Vec<u8> {
        let limit = &self.limit_order;
        (
            limit.sender,
            limit.matcher,
            limit.base_asset,
            limit.quote_asset,
            limit.matcher_fee_asset,
            limit.amount,
            limit.price,
            limit.matcher_fee,
            limit.nonce,
            limit.expiration,
            FixedBytes::<1>([limit.side.as_byte()]),
            self.target_chain_id,
            self.secret_hash,
            self.lock_order_expiration,
        )
            .abi_encode_packed()
    }

    fn from_packed_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            limit_order: LimitOrder::from_packed_body(fields)?,
            target_chain_id: fields.u32()?,
            secret_hash: fields.b256()?,
            lock_order_expiration: fields.u64()?,
        })
    }
}

impl PackedOrder for LockOrder {
    const KIND: OrderKind = OrderKind::Lock;

    fn packed_fields(&self) -> Vec<u8> {
        (
            self.sender,
            self.expiration,
            self.asset,
            self.amount,
            self.target_chain_id,
            self.secret_hash,
        )
            .abi_encode_packed()
    }

    fn from_packed_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            sender: fields.address()?,
            expiration: fields.u64()?,
            asset: fields.address()?,
            amount: fields.u64()?,
            target_chain_id: fields.u32()?,
            secret_hash: fields.b256()?,
        })
    }
}

impl PackedOrder for CancelOrderRequest {
    const KIND: OrderKind = OrderKind::Cancel;

    fn packed_fields(&self) -> Vec<u8> {
        (self.sender, self.order_id, self.chain_id).abi_encode_packed()
    }

    fn from_packed_fields(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            sender: fields.address()?,
            order_id: fields.b256()?,
            chain_id: fields.u32()?,
        })
    }
}

/// Sequential reader of fixed-width big-endian fields.
pub struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.offset + N;
        let bytes = self.data.get(self.offset..end).ok_or_else(|| {
            Error::MalformedPayload(format!(
                "order encoding truncated at byte {} of {}",
                self.offset,
                self.data.len()
            ))
        })?;
        self.offset = end;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn address(&mut self) -> Result<Address> {
        self.take::<20>().map(Address::from)
    }

    pub fn b256(&mut self) -> Result<B256> {
        self.take::<32>().map(B256::from)
    }

    pub fn u8(&mut self) -> Result<u8> {
        self.take::<1>().map(|b| b[0])
    }

    pub fn u32(&mut self) -> Result<u32> {
        self.take::<4>().map(u32::from_be_bytes)
    }

    pub fn u64(&mut self) -> Result<u64> {
        self.take::<8>().map(u64::from_be_bytes)
    }

    /// Fails if there are unread bytes left.
    pub fn finish(self) -> Result<()> {
        if self.offset != self.data.len() {
            return Err(Error::MalformedPayload(format!(
                "{} trailing bytes after order fields",
                self.data.len() - self.offset
            )));
        }
        Ok(())
    }
}
