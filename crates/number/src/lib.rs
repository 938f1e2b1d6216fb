//! 256 bit integer helpers: parsing, hex rendering and the `uint256`
//! representation as two 128 bit halves used by Cairo and Starknet.

pub mod serialization;
pub mod u256_ext;
pub mod uint256;

pub use {
    serialization::{HexOrDecimalU256, parse_u256},
    u256_ext::U256Ext,
    uint256::{Uint256Halves, combine, split},
};

use alloy::primitives::U256;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to parse {0:?} as a decimal or 0x prefixed hex integer")]
    Invalid(String),
    #[error("{half} half {value} does not fit into 128 bits")]
    HalfOutOfRange { half: &'static str, value: U256 },
}
