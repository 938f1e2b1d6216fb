//! EIP-712 domains and the final signing digests.

use {
    crate::{EncodingError, FieldValue, StructHash, TypedStruct},
    alloy::primitives::{Address, B256, U256, keccak256},
    hex::{FromHex, FromHexError},
    std::fmt,
};

/// domainSeparator as defined by EIP-712.
///
/// https://eips.ethereum.org/EIPS/eip-712#definition-of-domainseparator
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct DomainSeparator(pub [u8; 32]);

impl std::str::FromStr for DomainSeparator {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(FromHex::from_hex(s.strip_prefix("0x").unwrap_or(s))?))
    }
}

impl fmt::Debug for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for DomainSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<StructHash> for DomainSeparator {
    fn from(hash: StructHash) -> Self {
        Self(hash.0.0)
    }
}

/// The `version` member of a domain. EIP-712 declares it as a `string` but
/// some applications use a `uint256` instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DomainVersion {
    String(String),
    Uint(U256),
}

/// The `EIP712Domain` struct. Only the members that are set become part of
/// the domain type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Eip712Domain {
    pub name: Option<String>,
    pub version: Option<DomainVersion>,
    pub chain_id: Option<U256>,
    pub verifying_contract: Option<Address>,
    pub salt: Option<B256>,
}

impl Eip712Domain {
    pub const TYPE_NAME: &'static str = "EIP712Domain";

    /// The commonly used domain with a name, a string version, a chain ID and
    /// a verifying contract.
    pub fn new(name: &str, version: &str, chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: Some(name.to_owned()),
            version: Some(DomainVersion::String(version.to_owned())),
            chain_id: Some(U256::from(chain_id)),
            verifying_contract: Some(verifying_contract),
            salt: None,
        }
    }

    /// Builds the `EIP712Domain` struct with its members in the order
    /// mandated by the standard.
    pub fn to_struct(&self) -> TypedStruct {
        let mut domain = TypedStruct::new(Self::TYPE_NAME);
        if let Some(name) = &self.name {
            domain = domain.field("string", "name", name.as_str());
        }
        match &self.version {
            Some(DomainVersion::String(version)) => {
                domain = domain.field("string", "version", version.as_str());
            }
            Some(DomainVersion::Uint(version)) => {
                domain = domain.field("uint256", "version", *version);
            }
            None => (),
        }
        if let Some(chain_id) = self.chain_id {
            domain = domain.field("uint256", "chainId", chain_id);
        }
        if let Some(verifying_contract) = self.verifying_contract {
            domain = domain.field("address", "verifyingContract", verifying_contract);
        }
        if let Some(salt) = self.salt {
            domain = domain.field("bytes32", "salt", FieldValue::bytes32(salt));
        }
        domain
    }

    pub fn separator(&self) -> Result<DomainSeparator, EncodingError> {
        self.to_struct().hash_struct().map(DomainSeparator::from)
    }
}

/// The digest that gets signed for a struct in the given domain:
/// `keccak256("\x19\x01" ‖ domainSeparator ‖ hashStruct(message))`.
pub fn hashed_eip712_message(domain_separator: &DomainSeparator, struct_hash: &StructHash) -> B256 {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(&domain_separator.0);
    message[34..66].copy_from_slice(struct_hash.0.as_slice());
    keccak256(message)
}

/// The EIP-712 digest wrapped in an EIP-191 `personal_sign` message, for
/// wallets that cannot sign typed data.
pub fn hashed_ethsign_message(domain_separator: &DomainSeparator, struct_hash: &StructHash) -> B256 {
    let mut message = [0u8; 60];
    message[..28].copy_from_slice(b"\x19Ethereum Signed Message:\n32");
    message[28..].copy_from_slice(hashed_eip712_message(domain_separator, struct_hash).as_slice());
    keccak256(message)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{TypeHash, TypeSignature, type_hash},
        alloy::primitives::{address, b256},
        hex_literal::hex,
        std::str::FromStr,
    };

    fn mail_hash() -> StructHash {
        StructHash(b256!(
            "c52c0ee5d84264471806290a3f2c4cecfc5490626bf912d01f240d7a274b371e"
        ))
    }

    fn ether_mail() -> Eip712Domain {
        Eip712Domain::new(
            "Ether Mail",
            "1",
            1,
            address!("CcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"),
        )
    }

    #[test]
    fn domain_separator_from_str() {
        assert!(
            DomainSeparator::from_str(
                "9d7e07ef92761aa9453ae5ff25083a2b19764131b15295d3c7e89f1f1b8c67d9"
            )
            .is_ok()
        );
        assert!(
            DomainSeparator::from_str(
                "0x9d7e07ef92761aa9453ae5ff25083a2b19764131b15295d3c7e89f1f1b8c67d9"
            )
            .is_ok()
        );
        assert!(DomainSeparator::from_str("9d7e07").is_err());
    }

    #[test]
    fn domain_separator_goerli() {
        let domain = Eip712Domain::new(
            "Gnosis Protocol",
            "v2",
            5,
            address!("9008D19f58AAbD9eD0D60971565AA8510560ab41"),
        );
        // domain separator is taken from goerli deployment at address 0x9008D19f58AAbD9eD0D60971565AA8510560ab41
        assert_eq!(
            domain.separator().unwrap(),
            DomainSeparator(hex!(
                "fb378b35457022ecc5709ae5dafad9393c1387ae6d8ce24913a0c969074c07fb"
            ))
        );
    }

    #[test]
    fn standard_domain_type() {
        assert_eq!(
            ether_mail().to_struct().signature().as_str(),
            "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)"
        );
        assert_eq!(
            ether_mail().to_struct().type_hash(),
            TypeHash(b256!(
                "8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f"
            ))
        );
    }

    #[test]
    fn partial_domain_with_uint_version() {
        let domain = Eip712Domain {
            name: Some("Cairo".to_owned()),
            version: Some(DomainVersion::Uint(U256::from(1))),
            chain_id: Some(U256::from(1)),
            ..Default::default()
        };
        let signature = domain.to_struct().signature();
        assert_eq!(
            signature,
            TypeSignature::from("EIP712Domain(string name,uint256 version,uint256 chainId)")
        );
        assert_eq!(
            type_hash(&signature),
            TypeHash(b256!(
                "5f12a0dcae00d34ac0cfbe4a162ec40900ab4f4f0239fb5bfd2ef745d3642742"
            ))
        );
    }

    #[test]
    fn salt_is_the_last_member() {
        let domain = Eip712Domain {
            salt: Some(B256::repeat_byte(1)),
            ..ether_mail()
        };
        assert!(
            domain
                .to_struct()
                .signature()
                .as_str()
                .ends_with("address verifyingContract,bytes32 salt)")
        );
        assert_ne!(domain.separator().unwrap(), ether_mail().separator().unwrap());
    }

    // Example from https://eips.ethereum.org/EIPS/eip-712
    #[test]
    fn mail_signing_digest() {
        let domain_separator = ether_mail().separator().unwrap();
        assert_eq!(
            domain_separator,
            DomainSeparator(hex!(
                "f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f"
            ))
        );
        assert_eq!(
            hashed_eip712_message(&domain_separator, &mail_hash()),
            b256!("be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2")
        );
    }

    #[test]
    fn mail_ethsign_digest() {
        let domain_separator = ether_mail().separator().unwrap();
        assert_eq!(
            hashed_ethsign_message(&domain_separator, &mail_hash()),
            b256!("110524f24641a25cd5812ed0c50117b67ab36be6cf7c9750d88665a710937a13")
        );
    }

    #[test]
    fn domain_separator_does_not_panic_in_debug() {
        println!("{:?}", DomainSeparator::default());
    }
}
