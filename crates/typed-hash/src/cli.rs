//! CLI arguments for the `typed-hash` binary.

use {
    alloy::primitives::{Address, U256},
    clap::{Parser, Subcommand},
    starknet_hash::{ChainId, Felt},
    std::{path::PathBuf, str::FromStr},
};

/// Compute EIP-712 struct hashes and Starknet field element hashes
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// The log filter.
    #[arg(long, env, default_value = "warn,typed_hash=info")]
    pub log_filter: String,

    /// Output logs as JSON.
    #[arg(long, env)]
    pub use_json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the struct hash, the combined uint256 and the field hash on one
    /// line.
    Report {
        #[command(flatten)]
        call: StructArgs,

        #[command(flatten)]
        halves: HalvesArgs,

        /// Integer to compute the field hash of.
        #[arg(long, env, value_parser = number::parse_u256)]
        felt: U256,
    },
    /// Print the EIP-712 type hash of a type signature.
    TypeHash {
        /// Canonical EIP-712 type signature.
        #[arg(long, env)]
        type_signature: String,
    },
    /// Print the EIP-712 struct hash of already encoded fields.
    StructHash(StructArgs),
    /// Print the struct hash of a struct described in a TOML file. If the
    /// file configures a domain, the domain separator and the signing digest
    /// are printed as well.
    TypedData {
        /// Path to the typed data file. This file should be in TOML format.
        #[arg(long, env)]
        config: PathBuf,
    },
    /// Print the hex value of a `uint256 { low, high }` pair.
    Combine(HalvesArgs),
    /// Print the Starknet field element hash of an integer.
    FieldHash {
        #[arg(long, env, value_parser = number::parse_u256)]
        value: U256,
    },
    /// Print the hash of the L1 handler transaction executing an L1 to L2
    /// message.
    L1HandlerTxHash(L1HandlerArgs),
}

#[derive(clap::Args, Debug)]
pub struct StructArgs {
    /// Canonical EIP-712 type signature, e.g.
    /// `Call(bytes32 to,bytes32 selector,bytes32[] calldata)`.
    #[arg(long, env)]
    pub type_signature: String,

    /// Hex encoded 32 byte field values in the order of the type signature.
    #[arg(long = "field", env = "FIELDS", value_delimiter = ',')]
    pub fields: Vec<HexBytes>,
}

#[derive(clap::Args, Debug)]
pub struct HalvesArgs {
    /// Low 128 bits, decimal or 0x prefixed hex.
    #[arg(long, env)]
    pub low: String,

    /// High 128 bits, decimal or 0x prefixed hex.
    #[arg(long, env)]
    pub high: String,
}

#[derive(clap::Args, Debug)]
pub struct L1HandlerArgs {
    /// The L1 contract sending the message.
    #[arg(long, env)]
    pub from_address: Address,

    /// The L2 contract receiving the message.
    #[arg(long, env, value_parser = starknet_hash::parse_felt)]
    pub to_address: Felt,

    /// Selector of the L1 handler entry point.
    #[arg(long, env, value_parser = starknet_hash::parse_felt)]
    pub selector: Felt,

    #[arg(long, env, value_parser = starknet_hash::parse_felt)]
    pub nonce: Felt,

    #[arg(long, env, value_delimiter = ',', value_parser = starknet_hash::parse_felt)]
    pub payload: Vec<Felt>,

    /// `mainnet`, `sepolia`, `goerli` or the chain ID as a number.
    #[arg(long, env, default_value = "mainnet")]
    pub chain_id: ChainId,
}

/// Bytes given as a hex string with an optional 0x prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HexBytes(pub Vec<u8>);

impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.strip_prefix("0x").unwrap_or(s)).map(Self)
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
