use alloy::primitives::{Address, B256, U256};
use fastnum::UD64;

use super::{CrossChainOrder, LimitOrder, LockOrder};
use crate::{
    error::{Error, Result},
    num::{self, Converter},
    types::Side,
};

fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(Error::MissingField(field))
}

/// Quantity as set on a builder, converted to units by `build`.
#[derive(Clone, Copy, Debug)]
enum Quantity {
    Decimal(UD64),
    Units(U256),
}

fn order_units(value: Option<Quantity>, field: &'static str) -> Result<u64> {
    let units = match required(value, field)? {
        Quantity::Decimal(value) => Converter::orders().to_unsigned(field, value)?,
        Quantity::Units(units) => units,
    };
    num::narrow_u64(field, units)
}

/// Builder of [`LimitOrder`].
///
/// Quantities can be set either as decimals, scaled to
/// [`num::ORDER_DECIMALS`], or as raw fixed-point units. Values not fitting
/// their on-chain width, or finer than one unit, are rejected by
/// [`Self::build`].
#[derive(Clone, Debug, Default)]
pub struct LimitOrderBuilder {
    sender: Option<Address>,
    matcher: Option<Address>,
    base_asset: Option<Address>,
    quote_asset: Option<Address>,
    matcher_fee_asset: Option<Address>,
    amount: Option<Quantity>,
    price: Option<Quantity>,
    matcher_fee: Option<Quantity>,
    nonce: Option<u64>,
    expiration: Option<u64>,
    side: Option<Side>,
}

impl LimitOrderBuilder {
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn matcher(mut self, matcher: Address) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn base_asset(mut self, asset: Address) -> Self {
        self.base_asset = Some(asset);
        self
    }

    pub fn quote_asset(mut self, asset: Address) -> Self {
        self.quote_asset = Some(asset);
        self
    }

    pub fn matcher_fee_asset(mut self, asset: Address) -> Self {
        self.matcher_fee_asset = Some(asset);
        self
    }

    pub fn amount(mut self, amount: UD64) -> Self {
        self.amount = Some(Quantity::Decimal(amount));
        self
    }

    pub fn amount_units(mut self, amount: U256) -> Self {
        self.amount = Some(Quantity::Units(amount));
        self
    }

    pub fn price(mut self, price: UD64) -> Self {
        self.price = Some(Quantity::Decimal(price));
        self
    }

    pub fn price_units(mut self, price: U256) -> Self {
        self.price = Some(Quantity::Units(price));
        self
    }

    pub fn matcher_fee(mut self, fee: UD64) -> Self {
        self.matcher_fee = Some(Quantity::Decimal(fee));
        self
    }

    pub fn matcher_fee_units(mut self, fee: U256) -> Self {
        self.matcher_fee = Some(Quantity::Units(fee));
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Expiration timestamp, in milliseconds.
    pub fn expiration(mut self, expiration: u64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn build(self) -> Result<LimitOrder> {
        Ok(LimitOrder {
            sender: required(self.sender, "sender")?,
            matcher: required(self.matcher, "matcher")?,
            base_asset: required(self.base_asset, "base_asset")?,
            quote_asset: required(self.quote_asset, "quote_asset")?,
            matcher_fee_asset: required(self.matcher_fee_asset, "matcher_fee_asset")?,
            amount: order_units(self.amount, "amount")?,
            price: order_units(self.price, "price")?,
            matcher_fee: order_units(self.matcher_fee, "matcher_fee")?,
            nonce: required(self.nonce, "nonce")?,
            expiration: required(self.expiration, "expiration")?,
            side: required(self.side, "side")?,
        })
    }
}

/// Builder of [`CrossChainOrder`].
#[derive(Clone, Debug, Default)]
pub struct CrossChainOrderBuilder {
    limit_order: Option<LimitOrder>,
    target_chain_id: Option<u64>,
    secret_hash: Option<B256>,
    lock_order_expiration: Option<u64>,
}

impl CrossChainOrderBuilder {
    pub fn limit_order(mut self, order: LimitOrder) -> Self {
        self.limit_order = Some(order);
        self
    }

    pub fn target_chain_id(mut self, chain_id: u64) -> Self {
        self.target_chain_id = Some(chain_id);
        self
    }

    pub fn secret_hash(mut self, secret_hash: B256) -> Self {
        self.secret_hash = Some(secret_hash);
        self
    }

    pub fn lock_order_expiration(mut self, expiration: u64) -> Self {
        self.lock_order_expiration = Some(expiration);
        self
    }

    pub fn build(self) -> Result<CrossChainOrder> {
        let target_chain_id = required(self.target_chain_id, "target_chain_id")?;
        Ok(CrossChainOrder {
            limit_order: required(self.limit_order, "limit_order")?,
            target_chain_id: num::narrow_u32("target_chain_id", U256::from(target_chain_id))?,
            secret_hash: required(self.secret_hash, "secret_hash")?,
            lock_order_expiration: required(
                self.lock_order_expiration,
                "lock_order_expiration",
            )?,
        })
    }
}

/// Builder of [`LockOrder`].
#[derive(Clone, Debug, Default)]
pub struct LockOrderBuilder {
    sender: Option<Address>,
    expiration: Option<u64>,
    asset: Option<Address>,
    amount: Option<Quantity>,
    target_chain_id: Option<u64>,
    secret_hash: Option<B256>,
}

impl LockOrderBuilder {
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn expiration(mut self, expiration: u64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn asset(mut self, asset: Address) -> Self {
        self.asset = Some(asset);
        self
    }

    pub fn amount(mut self, amount: UD64) -> Self {
        self.amount = Some(Quantity::Decimal(amount));
        self
    }

    pub fn amount_units(mut self, amount: U256) -> Self {
        self.amount = Some(Quantity::Units(amount));
        self
    }

    pub fn target_chain_id(mut self, chain_id: u64) -> Self {
        self.target_chain_id = Some(chain_id);
        self
    }

    pub fn secret_hash(mut self, secret_hash: B256) -> Self {
        self.secret_hash = Some(secret_hash);
        self
    }

    pub fn build(self) -> Result<LockOrder> {
        let target_chain_id = required(self.target_chain_id, "target_chain_id")?;
        Ok(LockOrder {
            sender: required(self.sender, "sender")?,
            expiration: required(self.expiration, "expiration")?,
            asset: required(self.asset, "asset")?,
            amount: order_units(self.amount, "amount")?,
            target_chain_id: num::narrow_u32("target_chain_id", U256::from(target_chain_id))?,
            secret_hash: required(self.secret_hash, "secret_hash")?,
        })
    }
}
