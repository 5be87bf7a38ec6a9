//! Venue adapters turning venue-specific swap parameters into swap executor
//! calldata.
//!
//! Every adapter returns raw ABI-encoded calldata, which still has to be
//! wrapped with [`crate::calls::encode_call_params`] before being placed into
//! the executor batch.
//!
//! * [`UniswapV2Adapter`] resolves pool orientation, one read per hop, and
//!   encodes a whole run of hops into one call.
//! * [`CurveAdapter`] resolves coin indices through the registry and encodes a
//!   single hop.
//! * [`erc20`], [`weth`] and [`fee`] are plain parameter encoders.

mod curve;
pub mod erc20;
pub mod fee;
mod uniswap_v2;
pub mod weth;

pub use curve::CurveAdapter;
pub use uniswap_v2::UniswapV2Adapter;
