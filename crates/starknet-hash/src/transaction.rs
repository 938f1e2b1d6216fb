//! Starknet transaction hashes built from Pedersen hash chains.

use {
    crate::{DomainError, Felt, compute_hash_on_elements, parse_felt},
    alloy::primitives::Address,
    std::{fmt, str::FromStr},
    tracing::instrument,
};

/// Domain prefix of a transaction hash, the ASCII bytes of the transaction
/// type interpreted as a big endian integer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransactionHashPrefix {
    Declare,
    Deploy,
    DeployAccount,
    Invoke,
    L1Handler,
}

impl TransactionHashPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declare => "declare",
            Self::Deploy => "deploy",
            Self::DeployAccount => "deploy_account",
            Self::Invoke => "invoke",
            Self::L1Handler => "l1_handler",
        }
    }

    pub fn as_felt(&self) -> Felt {
        Felt::from_bytes_be_slice(self.as_str().as_bytes())
    }
}

/// Starknet network identifier, the ASCII bytes of the network name
/// interpreted as a big endian integer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ChainId {
    #[default]
    Mainnet,
    Sepolia,
    Goerli,
    Custom(Felt),
}

impl ChainId {
    pub fn as_felt(&self) -> Felt {
        match self {
            Self::Mainnet => Felt::from_bytes_be_slice(b"SN_MAIN"),
            Self::Sepolia => Felt::from_bytes_be_slice(b"SN_SEPOLIA"),
            Self::Goerli => Felt::from_bytes_be_slice(b"SN_GOERLI"),
            Self::Custom(value) => *value,
        }
    }
}

impl FromStr for ChainId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "mainnet" | "sn_main" => Self::Mainnet,
            "sepolia" | "sn_sepolia" => Self::Sepolia,
            "goerli" | "sn_goerli" => Self::Goerli,
            _ => Self::Custom(parse_felt(s)?),
        })
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("SN_MAIN"),
            Self::Sepolia => f.write_str("SN_SEPOLIA"),
            Self::Goerli => f.write_str("SN_GOERLI"),
            Self::Custom(value) => f.write_str(&value.to_hex_string()),
        }
    }
}

/// The fields shared by the Pedersen based (pre v3) transaction hashes.
#[derive(Clone, Debug)]
pub struct CommonTransactionFields<'a> {
    pub prefix: TransactionHashPrefix,
    pub version: Felt,
    pub contract_address: Felt,
    pub entry_point_selector: Felt,
    pub calldata: &'a [Felt],
    pub max_fee: Felt,
    pub chain_id: ChainId,
    pub additional_data: &'a [Felt],
}

impl CommonTransactionFields<'_> {
    pub fn hash(&self) -> Felt {
        let calldata_hash = compute_hash_on_elements(self.calldata);
        let mut data = vec![
            self.prefix.as_felt(),
            self.version,
            self.contract_address,
            self.entry_point_selector,
            calldata_hash,
            self.max_fee,
            self.chain_id.as_felt(),
        ];
        data.extend_from_slice(self.additional_data);
        compute_hash_on_elements(&data)
    }
}

/// A message sent from L1 to an L2 contract, which Starknet executes as an
/// `L1Handler` transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct L1HandlerMessage {
    /// The L1 contract sending the message.
    pub from_address: Address,
    /// The L2 contract receiving the message.
    pub to_address: Felt,
    /// Selector of the `#[l1_handler]` entry point.
    pub selector: Felt,
    pub nonce: Felt,
    pub payload: Vec<Felt>,
}

impl L1HandlerMessage {
    /// Hash of the L1 handler transaction the message gets turned into on
    /// the given network.
    #[instrument(skip_all, fields(chain_id = %chain_id))]
    pub fn tx_hash(&self, chain_id: ChainId) -> Felt {
        let mut calldata = Vec::with_capacity(self.payload.len() + 1);
        calldata.push(Felt::from_bytes_be_slice(self.from_address.as_slice()));
        calldata.extend_from_slice(&self.payload);

        let hash = CommonTransactionFields {
            prefix: TransactionHashPrefix::L1Handler,
            version: Felt::ZERO,
            contract_address: self.to_address,
            entry_point_selector: self.selector,
            calldata: &calldata,
            max_fee: Felt::ZERO,
            chain_id,
            additional_data: &[self.nonce],
        }
        .hash();
        tracing::debug!(hash = %hash.to_hex_string(), "computed l1 handler transaction hash");
        hash
    }
}
