//! Control word the swap executor reads in front of every call of a batch.
//!
//! Layout of a wrapped call:
//!
//! ```text
//! flags(1) | gas_limit(4)? | target(20)? | value(16)? | calldata
//! ```
//!
//! Optional parts are present only when the corresponding flag bit is set,
//! integers are big-endian.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use crate::{
    abi::executor::SwapExecutor,
    error::{Error, Result},
    num,
};

/// The full balance received by this step is forwarded as the amount
/// of the following step.
pub const FLAG_USE_FULL_BALANCE: u8 = 0x01;
pub const FLAG_VALUE: u8 = 0x10;
pub const FLAG_TARGET: u8 = 0x20;
pub const FLAG_GAS_LIMIT: u8 = 0x40;
/// Failure of this step reverts the whole batch.
pub const FLAG_MANDATORY: u8 = 0x80;

const KNOWN_FLAGS: u8 =
    FLAG_USE_FULL_BALANCE | FLAG_VALUE | FLAG_TARGET | FLAG_GAS_LIMIT | FLAG_MANDATORY;

const SELECTOR_LEN: usize = 4;

/// How the executor threads amounts between this step and the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AmountFlag {
    /// Amounts are taken as encoded in the calldata.
    #[default]
    Literal,
    /// Whatever this step produced becomes the amount of the next step.
    UseFullBalance,
}

/// Metadata attached to a generated call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallParams {
    pub amount_flag: AmountFlag,
    pub mandatory: bool,
    pub target: Option<Address>,
    pub gas_limit: Option<u32>,
    pub value: Option<U256>,
}

impl CallParams {
    pub fn literal() -> Self {
        Self::default()
    }

    pub fn use_full_balance() -> Self {
        Self {
            amount_flag: AmountFlag::UseFullBalance,
            ..Default::default()
        }
    }

    pub fn with_amount_flag(mut self, amount_flag: AmountFlag) -> Self {
        self.amount_flag = amount_flag;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn with_target(mut self, target: Address) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u32) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.amount_flag == AmountFlag::UseFullBalance {
            flags |= FLAG_USE_FULL_BALANCE;
        }
        if self.value.is_some() {
            flags |= FLAG_VALUE;
        }
        if self.target.is_some() {
            flags |= FLAG_TARGET;
        }
        if self.gas_limit.is_some() {
            flags |= FLAG_GAS_LIMIT;
        }
        if self.mandatory {
            flags |= FLAG_MANDATORY;
        }
        flags
    }
}

/// Wraps raw executor calldata with the control word described by `params`.
///
/// Absent params produce the default ([`AmountFlag::Literal`]) control word,
/// so every wrapped call is self-describing.
pub fn encode_call_params(raw_payload: &[u8], params: Option<&CallParams>) -> Result<Bytes> {
    if raw_payload.len() < SELECTOR_LEN {
        return Err(Error::MalformedPayload(format!(
            "calldata of {} bytes has no function selector",
            raw_payload.len()
        )));
    }
    let default_params = CallParams::default();
    let params = params.unwrap_or(&default_params);

    let mut out = Vec::with_capacity(1 + 4 + 20 + 16 + raw_payload.len());
    out.push(params.flags());
    if let Some(gas_limit) = params.gas_limit {
        out.extend_from_slice(&gas_limit.to_be_bytes());
    }
    if let Some(target) = params.target {
        out.extend_from_slice(target.as_slice());
    }
    if let Some(value) = params.value {
        let value = num::narrow_u128("value", value)?;
        out.extend_from_slice(&value.to_be_bytes());
    }
    out.extend_from_slice(raw_payload);
    Ok(out.into())
}

/// Splits a wrapped call back into its control word and raw calldata.
pub fn decode_call_params(wrapped: &[u8]) -> Result<(CallParams, Bytes)> {
    let (&flags, mut rest) = wrapped
        .split_first()
        .ok_or_else(|| Error::MalformedPayload("empty call".to_string()))?;
    if flags & !KNOWN_FLAGS != 0 {
        return Err(Error::MalformedPayload(format!(
            "unknown control flags {flags:#04x}"
        )));
    }

    let mut params = CallParams {
        amount_flag: if flags & FLAG_USE_FULL_BALANCE != 0 {
            AmountFlag::UseFullBalance
        } else {
            AmountFlag::Literal
        },
        mandatory: flags & FLAG_MANDATORY != 0,
        ..Default::default()
    };
    if flags & FLAG_GAS_LIMIT != 0 {
        let bytes = take::<4>(&mut rest, "gas limit")?;
        params.gas_limit = Some(u32::from_be_bytes(bytes));
    }
    if flags & FLAG_TARGET != 0 {
        let bytes = take::<20>(&mut rest, "target")?;
        params.target = Some(Address::from(bytes));
    }
    if flags & FLAG_VALUE != 0 {
        let bytes = take::<16>(&mut rest, "value")?;
        params.value = Some(U256::from(u128::from_be_bytes(bytes)));
    }
    if rest.len() < SELECTOR_LEN {
        return Err(Error::MalformedPayload(format!(
            "calldata of {} bytes has no function selector",
            rest.len()
        )));
    }
    Ok((params, Bytes::copy_from_slice(rest)))
}

/// Encodes the executor batch entry point over already wrapped calls.
pub fn encode_batch(calls: &[Bytes]) -> Bytes {
    SwapExecutor::executeCallsCall {
        calls: calls.to_vec(),
    }
    .abi_encode()
    .into()
}

fn take<const N: usize>(rest: &mut &[u8], what: &str) -> Result<[u8; N]> {
    if rest.len() < N {
        return Err(Error::MalformedPayload(format!("truncated {what}")));
    }
    let (head, tail) = rest.split_at(N);
    *rest = tail;
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    Ok(out)
}
