//! Encoding of struct member values into 32 byte words.
//!
//! https://eips.ethereum.org/EIPS/eip-712#definition-of-encodedata

use {
    crate::{EncodedField, EncodingError, StructHash, WORD_SIZE},
    alloy::primitives::{Address, B256, I256, U256, keccak256},
};

/// The value of a single struct member, tagged with how it gets encoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    /// `uint8` to `uint256`, big endian.
    Uint(U256),
    /// `int8` to `int256`, two's complement sign extended to 256 bits.
    Int(I256),
    /// Encoded like a `uint256` of 0 or 1.
    Bool(bool),
    /// Left padded with zeros.
    Address(Address),
    /// `bytes1` to `bytes32`, right padded with zeros.
    FixedBytes(Vec<u8>),
    /// Dynamic `bytes`, encoded as their keccak256 hash.
    Bytes(Vec<u8>),
    /// Encoded as the keccak256 hash of the UTF-8 bytes.
    String(String),
    /// `T[]` or `T[n]`, encoded as the keccak256 hash of the concatenated
    /// element encodings.
    Array(Vec<FieldValue>),
    /// A member of a struct type, encoded as its already computed struct hash.
    Struct(StructHash),
}

impl FieldValue {
    /// Convenience constructor for a `bytes32` member.
    pub fn bytes32(word: B256) -> Self {
        Self::FixedBytes(word.to_vec())
    }

    pub fn encode(&self) -> Result<EncodedField, EncodingError> {
        let word = match self {
            Self::Uint(value) => value.to_be_bytes::<WORD_SIZE>(),
            Self::Int(value) => value.to_be_bytes::<WORD_SIZE>(),
            Self::Bool(value) => U256::from(u8::from(*value)).to_be_bytes::<WORD_SIZE>(),
            Self::Address(address) => {
                let mut word = [0u8; WORD_SIZE];
                word[12..].copy_from_slice(address.as_slice());
                word
            }
            Self::FixedBytes(bytes) => {
                if bytes.is_empty() || bytes.len() > WORD_SIZE {
                    return Err(EncodingError::FixedBytesLength { len: bytes.len() });
                }
                let mut word = [0u8; WORD_SIZE];
                word[..bytes.len()].copy_from_slice(bytes);
                word
            }
            Self::Bytes(bytes) => keccak256(bytes).0,
            Self::String(string) => keccak256(string.as_bytes()).0,
            Self::Array(elements) => {
                let mut encoded = Vec::with_capacity(WORD_SIZE * elements.len());
                for element in elements {
                    encoded.extend_from_slice(&element.encode()?.0);
                }
                keccak256(&encoded).0
            }
            Self::Struct(hash) => hash.0.0,
        };
        Ok(EncodedField(word))
    }
}

impl From<U256> for FieldValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<I256> for FieldValue {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Address> for FieldValue {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<B256> for FieldValue {
    fn from(word: B256) -> Self {
        Self::bytes32(word)
    }
}

impl From<&str> for FieldValue {
    fn from(string: &str) -> Self {
        Self::String(string.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(string: String) -> Self {
        Self::String(string)
    }
}

impl From<StructHash> for FieldValue {
    fn from(hash: StructHash) -> Self {
        Self::Struct(hash)
    }
}

impl<T> From<Vec<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(elements: Vec<T>) -> Self {
        Self::Array(elements.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{address, b256},
        hex_literal::hex,
    };

    fn encode(value: impl Into<FieldValue>) -> [u8; 32] {
        value.into().encode().unwrap().0
    }

    #[test]
    fn uint_is_big_endian() {
        assert_eq!(
            encode(1000u64),
            hex!("00000000000000000000000000000000000000000000000000000000000003e8")
        );
        assert_eq!(encode(U256::MAX), [0xff; 32]);
    }

    #[test]
    fn int_is_sign_extended() {
        assert_eq!(encode(I256::MINUS_ONE), [0xff; 32]);
        assert_eq!(encode(I256::ONE), encode(1u64));
    }

    #[test]
    fn bool_is_zero_or_one() {
        assert_eq!(encode(false), [0; 32]);
        assert_eq!(encode(true), encode(1u64));
    }

    #[test]
    fn address_is_left_padded() {
        assert_eq!(
            encode(address!("CD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826")),
            hex!("000000000000000000000000cd2a3d9f938e13cd947ec05abc7fe734df8dd826")
        );
    }

    #[test]
    fn fixed_bytes_are_right_padded() {
        assert_eq!(
            FieldValue::FixedBytes(hex!("deadbeef").to_vec())
                .encode()
                .unwrap()
                .0,
            hex!("deadbeef00000000000000000000000000000000000000000000000000000000")
        );
        let word = b256!("05d4f1ba301559254a7769068cceb2db6291b2cf83d79f52e3755145e9c322da");
        assert_eq!(encode(word), word.0);
    }

    #[test]
    fn fixed_bytes_must_fit_a_word() {
        for len in [0, 33] {
            assert!(matches!(
                FieldValue::FixedBytes(vec![1; len]).encode(),
                Err(EncodingError::FixedBytesLength { len: l }) if l == len
            ));
        }
    }

    #[test]
    fn dynamic_values_are_hashed() {
        assert_eq!(
            FieldValue::Bytes(hex!("deadbeef").to_vec())
                .encode()
                .unwrap()
                .0,
            hex!("d4fd4e189132273036449fc9e11198c739161b4c0116a9a2dccdfa1c492006f1")
        );
        assert_eq!(
            FieldValue::Bytes(Vec::new()).encode().unwrap().0,
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(encode("Hello, Bob!"), keccak256(b"Hello, Bob!").0);
    }

    #[test]
    fn array_hashes_concatenated_element_encodings() {
        assert_eq!(
            encode(vec![1000u64, 667]),
            hex!("1741fb0747352552d5e4bdf2c9a5fe430233a2dab7ed433252c996267ad6c4d3")
        );
    }

    #[test]
    fn array_propagates_element_errors() {
        let array = FieldValue::Array(vec![FieldValue::FixedBytes(vec![0; 40])]);
        assert!(matches!(
            array.encode(),
            Err(EncodingError::FixedBytesLength { len: 40 })
        ));
    }

    #[test]
    fn nested_struct_is_its_hash() {
        let hash = StructHash(b256!(
            "c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e"
        ));
        assert_eq!(encode(hash), hash.0.0);
    }
}
