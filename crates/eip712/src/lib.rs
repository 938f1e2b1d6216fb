//! Types and procedures defined by EIP-712 for hashing typed structured data.
//!
//! https://eips.ethereum.org/EIPS/eip-712
//!
//! The hashing is split the same way the standard splits it: a type signature
//! is hashed into a [`TypeHash`], every member value is encoded into a single
//! 32 byte word and [`hash_struct`] hashes the binary concatenation of both.

pub mod domain;
pub mod encoding;
pub mod typed_struct;

pub use {
    domain::{
        DomainSeparator,
        DomainVersion,
        Eip712Domain,
        hashed_eip712_message,
        hashed_ethsign_message,
    },
    encoding::FieldValue,
    typed_struct::{TypedField, TypedStruct},
};
use {
    alloy::primitives::{B256, keccak256},
    std::fmt::{self, Display, Formatter},
};

/// Size in bytes of a type hash, an encoded field and a struct hash.
pub const WORD_SIZE: usize = 32;

/// The encoded type of a struct, e.g.
/// `Mail(Person from,Person to,string contents)Person(string name,address wallet)`.
///
/// The signature is hashed verbatim. Callers are responsible for providing it
/// in canonical form: members in declaration order, no spaces around the
/// separating commas and referenced struct types appended sorted by name.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeSignature(String);

impl TypeSignature {
    /// Renders the canonical signature `Name(type1 name1,type2 name2)` of a
    /// struct from its ordered `(type, name)` members.
    pub fn new<'a>(name: &str, members: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let members = members
            .into_iter()
            .map(|(ty, name)| format!("{ty} {name}"))
            .collect::<Vec<_>>()
            .join(",");
        Self(format!("{name}({members})"))
    }

    /// Appends the signature of a struct type referenced by one of the
    /// members.
    pub fn with_referenced(mut self, referenced: &TypeSignature) -> Self {
        self.0.push_str(&referenced.0);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeSignature {
    fn from(signature: &str) -> Self {
        Self(signature.to_owned())
    }
}

impl From<String> for TypeSignature {
    fn from(signature: String) -> Self {
        Self(signature)
    }
}

impl Display for TypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `typeHash` as defined by EIP-712: the keccak256 digest of a
/// [`TypeSignature`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TypeHash(pub B256);

impl Display for TypeHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// `hashStruct` as defined by EIP-712.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct StructHash(pub B256);

impl Display for StructHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A single struct member encoded into one 32 byte word.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct EncodedField(pub [u8; WORD_SIZE]);

impl AsRef<[u8]> for EncodedField {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<B256> for EncodedField {
    fn from(word: B256) -> Self {
        Self(word.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("field {index} is {len} bytes long but encoded fields must be 32 bytes")]
    FieldLength { index: usize, len: usize },
    #[error("a fixed size byte array must hold 1 to 32 bytes, got {len}")]
    FixedBytesLength { len: usize },
    #[error("failed to encode field `{name}`")]
    Field {
        name: String,
        #[source]
        source: Box<EncodingError>,
    },
}

/// Computes the type hash of a struct from its signature.
pub fn type_hash(signature: &TypeSignature) -> TypeHash {
    TypeHash(keccak256(signature.as_str().as_bytes()))
}

/// Computes `keccak256(typeHash ‖ field_1 ‖ … ‖ field_n)`.
///
/// The fields have to be supplied in the order the type signature declares
/// them and each one has to be exactly [`WORD_SIZE`] bytes long.
pub fn hash_struct<F>(type_hash: &TypeHash, fields: &[F]) -> Result<StructHash, EncodingError>
where
    F: AsRef<[u8]>,
{
    let mut hash_data = Vec::with_capacity(WORD_SIZE * (1 + fields.len()));
    hash_data.extend_from_slice(type_hash.0.as_slice());
    for (index, field) in fields.iter().enumerate() {
        let field = field.as_ref();
        if field.len() != WORD_SIZE {
            return Err(EncodingError::FieldLength {
                index,
                len: field.len(),
            });
        }
        hash_data.extend_from_slice(field);
    }
    Ok(StructHash(keccak256(&hash_data)))
}
