use alloy::primitives::Address;

use crate::error::{Error, Result};

/// Liquidity venue family a hop is routed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Venue {
    /// Constant-product pools, direction-sensitive, natively multi-hop.
    UniswapV2,
    /// Stable-swap pools resolved through the chain's registry, single-hop only.
    Curve,
}

impl Venue {
    /// Whether the executor can run a contiguous run of hops of this venue
    /// within a single call.
    pub fn supports_multihop(&self) -> bool {
        match self {
            Venue::UniswapV2 => true,
            Venue::Curve => false,
        }
    }
}

/// One swap leg through a single liquidity pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SingleSwap {
    pub pool: Address,
    pub asset_in: Address,
    pub asset_out: Address,
}

impl SingleSwap {
    pub fn new(pool: Address, asset_in: Address, asset_out: Address) -> Self {
        Self {
            pool,
            asset_in,
            asset_out,
        }
    }
}

/// Hop of a [`Path`] along with the venue it is routed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwapHop {
    pub venue: Venue,
    pub swap: SingleSwap,
}

impl SwapHop {
    pub fn new(venue: Venue, swap: SingleSwap) -> Self {
        Self { venue, swap }
    }

    pub fn uniswap_v2(pool: Address, asset_in: Address, asset_out: Address) -> Self {
        Self::new(Venue::UniswapV2, SingleSwap::new(pool, asset_in, asset_out))
    }

    pub fn curve(pool: Address, asset_in: Address, asset_out: Address) -> Self {
        Self::new(Venue::Curve, SingleSwap::new(pool, asset_in, asset_out))
    }
}

/// Ordered sequence of hops, as declared by the router.
///
/// Hop `i`'s output asset is expected to be hop `i + 1`'s input asset,
/// see [`Path::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    hops: Vec<SwapHop>,
}

impl Path {
    pub fn new(hops: Vec<SwapHop>) -> Self {
        Self { hops }
    }

    pub fn hops(&self) -> &[SwapHop] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn hop(&self, index: usize) -> Option<&SwapHop> {
        self.hops.get(index)
    }

    /// Asset the path is entered with.
    pub fn asset_in(&self) -> Option<Address> {
        self.hops.first().map(|h| h.swap.asset_in)
    }

    /// Asset the path ends with.
    pub fn asset_out(&self) -> Option<Address> {
        self.hops.last().map(|h| h.swap.asset_out)
    }

    /// Rejects empty paths and paths whose hops do not chain.
    pub fn validate(&self) -> Result<()> {
        if self.hops.is_empty() {
            return Err(Error::EmptyPath);
        }
        for (index, pair) in self.hops.windows(2).enumerate() {
            if pair[0].swap.asset_out != pair[1].swap.asset_in {
                return Err(Error::BrokenPath {
                    index,
                    asset_out: pair[0].swap.asset_out,
                    asset_in: pair[1].swap.asset_in,
                });
            }
        }
        Ok(())
    }
}

impl From<Vec<SwapHop>> for Path {
    fn from(hops: Vec<SwapHop>) -> Self {
        Self::new(hops)
    }
}

impl FromIterator<SwapHop> for Path {
    fn from_iter<T: IntoIterator<Item = SwapHop>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Side of a limit order, always encoded as exactly one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_byte(&self) -> u8 {
        match self {
            Side::Buy => 1,
            Side::Sell => 0,
        }
    }
}

impl From<Side> for u8 {
    fn from(value: Side) -> Self {
        value.as_byte()
    }
}

impl TryFrom<u8> for Side {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Side::Buy),
            0 => Ok(Side::Sell),
            other => Err(Error::UnknownSide(other)),
        }
    }
}
