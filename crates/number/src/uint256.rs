//! Cairo's `Uint256 { low: felt, high: felt }` representation of a 256 bit
//! integer.

use {
    crate::{ParseError, serialization::HexOrDecimalU256, parse_u256},
    alloy::primitives::U256,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

/// A 256 bit integer split into two 128 bit halves,
/// `value = high * 2^128 + low`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(try_from = "RawHalves", into = "RawHalves")]
pub struct Uint256Halves {
    pub low: u128,
    pub high: u128,
}

impl Uint256Halves {
    pub fn new(low: u128, high: u128) -> Self {
        Self { low, high }
    }

    /// Parses both halves from decimal or 0x prefixed hex strings, failing
    /// if either of them does not fit into 128 bits.
    pub fn from_str_halves(low: &str, high: &str) -> Result<Self, ParseError> {
        Ok(Self {
            low: half("low", parse_u256(low)?)?,
            high: half("high", parse_u256(high)?)?,
        })
    }

    pub fn combine(self) -> U256 {
        combine(self.low, self.high)
    }
}

/// Combines two 128 bit halves into `high << 128 | low`. The result always
/// fits, so no overflow handling is required.
pub fn combine(low: u128, high: u128) -> U256 {
    (U256::from(high) << 128_usize) | U256::from(low)
}

/// Inverse of [`combine`].
pub fn split(value: U256) -> Uint256Halves {
    let bytes = value.to_be_bytes::<32>();
    let mut high = [0u8; 16];
    let mut low = [0u8; 16];
    high.copy_from_slice(&bytes[..16]);
    low.copy_from_slice(&bytes[16..]);
    Uint256Halves {
        low: u128::from_be_bytes(low),
        high: u128::from_be_bytes(high),
    }
}

fn half(name: &'static str, value: U256) -> Result<u128, ParseError> {
    match split(value) {
        Uint256Halves { low, high: 0 } => Ok(low),
        _ => Err(ParseError::HalfOutOfRange { half: name, value }),
    }
}

#[serde_as]
#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawHalves {
    #[serde_as(as = "HexOrDecimalU256")]
    low: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    high: U256,
}

impl TryFrom<RawHalves> for Uint256Halves {
    type Error = ParseError;

    fn try_from(raw: RawHalves) -> Result<Self, Self::Error> {
        Ok(Self {
            low: half("low", raw.low)?,
            high: half("high", raw.high)?,
        })
    }
}

impl From<Uint256Halves> for RawHalves {
    fn from(halves: Uint256Halves) -> Self {
        Self {
            low: U256::from(halves.low),
            high: U256::from(halves.high),
        }
    }
}
