//! Hashes over the Stark field used by Starknet.
//!
//! Values are [`Felt`]s, integers modulo
//! `P = 2^251 + 17 * 2^192 + 1`. Inputs coming from outside (256 bit
//! integers, strings) are range checked instead of being silently reduced.

pub mod pedersen;
pub mod transaction;

pub use {
    pedersen::{compute_hash_on_elements, pedersen_hash},
    starknet_types_core::felt::Felt,
    transaction::{ChainId, CommonTransactionFields, L1HandlerMessage, TransactionHashPrefix},
};
use alloy::primitives::{U256, keccak256, uint};

/// The modulus of the Stark field.
pub const FIELD_PRIME: U256 =
    uint!(0x800000000000011000000000000000000000000000000000000000000000001_U256);

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0} is not smaller than the field modulus")]
    OutOfRange(U256),
    #[error(transparent)]
    Parse(#[from] number::ParseError),
}

/// Converts an integer into a field element, failing instead of reducing
/// when it is not smaller than [`FIELD_PRIME`].
pub fn felt_from_u256(value: U256) -> Result<Felt, DomainError> {
    if value >= FIELD_PRIME {
        return Err(DomainError::OutOfRange(value));
    }
    Ok(Felt::from_bytes_be(&value.to_be_bytes::<32>()))
}

/// Parses a field element from a decimal or 0x prefixed hex string.
pub fn parse_felt(s: &str) -> Result<Felt, DomainError> {
    felt_from_u256(number::parse_u256(s)?)
}

/// A variant of eth-keccak that computes a value that fits in a Starknet
/// field element: keccak256 truncated to its low 250 bits.
pub fn starknet_keccak(data: &[u8]) -> Felt {
    let mut hash = keccak256(data).0;
    hash[0] &= 0x03;
    Felt::from_bytes_be(&hash)
}

/// The entry point selector of a Cairo function.
pub fn selector_from_name(name: &str) -> Felt {
    starknet_keccak(name.as_bytes())
}

/// Field element hash of a non-negative integer, computed as the
/// [`starknet_keccak`] of its decimal representation.
///
/// The integer has to be a valid field element.
pub fn field_hash(value: U256) -> Result<Felt, DomainError> {
    felt_from_u256(value)?;
    let hash = starknet_keccak(value.to_string().as_bytes());
    tracing::trace!(%value, hash = %hash.to_hex_string(), "computed field hash");
    Ok(hash)
}
