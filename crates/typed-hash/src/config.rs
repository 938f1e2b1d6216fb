//! Typed data described in a TOML file.
//!
//! ```toml
//! primary-type = "Call"
//!
//! [[fields]]
//! name = "to"
//! type = "bytes32"
//! value = "0x05d4f1ba301559254a7769068cceb2db6291b2cf83d79f52e3755145e9c322da"
//!
//! [[fields]]
//! name = "calldata"
//! type = "uint256[]"
//! value = [1000, "0x29b"]
//!
//! [domain]
//! name = "Ether Mail"
//! version = "1"
//! chain-id = 1
//! verifying-contract = "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
//! ```

use {
    alloy::primitives::{Address, B256, I256, U256},
    anyhow::{Context, Result, anyhow, bail, ensure},
    eip712::{DomainVersion, Eip712Domain, FieldValue, TypedStruct},
    number::HexOrDecimalU256,
    serde::Deserialize,
    serde_with::serde_as,
    std::{path::Path, str::FromStr},
    toml::Value,
};

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// Name of the struct type being hashed.
    primary_type: String,

    /// The struct members in declaration order.
    #[serde(default)]
    fields: Vec<Field>,

    /// Optional domain. Only the configured members become part of the
    /// `EIP712Domain` type.
    domain: Option<Domain>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Field {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    value: Value,
}

#[serde_as]
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Domain {
    name: Option<String>,
    version: Option<Version>,
    #[serde_as(as = "Option<HexOrDecimalU256>")]
    chain_id: Option<U256>,
    verifying_contract: Option<Address>,
    salt: Option<B256>,
}

/// A TOML integer declares a `uint256` version, a string a `string` one.
#[derive(Deserialize)]
#[serde(untagged)]
enum Version {
    Uint(u64),
    String(String),
}

/// A message and the optional domain it is signed in.
#[derive(Clone, Debug)]
pub struct TypedData {
    pub message: TypedStruct,
    pub domain: Option<Eip712Domain>,
}

/// Load typed data from a TOML file.
pub fn load(path: &Path) -> Result<TypedData> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("I/O error while reading {path:?}"))?;
    load_str(&data).with_context(|| format!("invalid typed data in {path:?}"))
}

/// Load typed data from a TOML string.
pub fn load_str(data: &str) -> Result<TypedData> {
    let config = toml::de::from_str::<Config>(data).context("TOML syntax error")?;

    let mut message = TypedStruct::new(config.primary_type);
    for field in config.fields {
        let value = field_value(&field.ty, &field.value)
            .with_context(|| format!("field `{}` of type `{}`", field.name, field.ty))?;
        message = message.field(field.ty, field.name, value);
    }

    let domain = config.domain.map(|domain| Eip712Domain {
        name: domain.name,
        version: domain.version.map(|version| match version {
            Version::Uint(version) => DomainVersion::Uint(U256::from(version)),
            Version::String(version) => DomainVersion::String(version),
        }),
        chain_id: domain.chain_id,
        verifying_contract: domain.verifying_contract,
        salt: domain.salt,
    });

    Ok(TypedData { message, domain })
}

/// Interprets a TOML value as a member of the given Solidity type.
fn field_value(ty: &str, value: &Value) -> Result<FieldValue> {
    if let Some((element, length)) = array_type(ty)? {
        let elements = value
            .as_array()
            .ok_or_else(|| anyhow!("expected an array"))?;
        if let Some(length) = length {
            ensure!(
                elements.len() == length,
                "expected {length} elements, got {}",
                elements.len()
            );
        }
        return elements
            .iter()
            .enumerate()
            .map(|(i, element_value)| {
                field_value(element, element_value).with_context(|| format!("element {i}"))
            })
            .collect::<Result<Vec<_>>>()
            .map(FieldValue::Array);
    }

    Ok(match ty {
        "bool" => FieldValue::Bool(value.as_bool().ok_or_else(|| anyhow!("expected a boolean"))?),
        "address" => FieldValue::Address(Address::from_str(string(value)?)?),
        "string" => FieldValue::String(string(value)?.to_owned()),
        "bytes" => FieldValue::Bytes(hex_bytes(value)?),
        _ if ty.starts_with("uint") => {
            let bits = bit_width(&ty["uint".len()..])?;
            let value = uint(value)?;
            ensure!(
                bits == 256 || value >> bits == U256::ZERO,
                "{value} does not fit into {bits} bits"
            );
            FieldValue::Uint(value)
        }
        _ if ty.starts_with("int") => {
            let bits = bit_width(&ty["int".len()..])?;
            let value = int(value)?;
            // Magnitude bound 2^(bits - 1), inclusive for negative values.
            let bound = U256::from(1) << (bits - 1);
            let fits = if value.is_negative() {
                value.unsigned_abs() <= bound
            } else {
                value.into_raw() < bound
            };
            ensure!(fits, "{value} does not fit into {bits} bits");
            FieldValue::Int(value)
        }
        _ if ty.starts_with("bytes") => {
            let size: usize = ty["bytes".len()..]
                .parse()
                .with_context(|| format!("unsupported type `{ty}`"))?;
            ensure!((1..=32).contains(&size), "unsupported type `{ty}`");
            let bytes = hex_bytes(value)?;
            ensure!(
                bytes.len() == size,
                "expected {size} bytes, got {}",
                bytes.len()
            );
            FieldValue::FixedBytes(bytes)
        }
        _ => bail!("unsupported type `{ty}`"),
    })
}

/// Splits `T[]` and `T[n]` into the element type and the optional fixed
/// length.
fn array_type(ty: &str) -> Result<Option<(&str, Option<usize>)>> {
    let Some(stripped) = ty.strip_suffix(']') else {
        return Ok(None);
    };
    let open = stripped
        .rfind('[')
        .ok_or_else(|| anyhow!("unsupported type `{ty}`"))?;
    let length = &stripped[open + 1..];
    let length = if length.is_empty() {
        None
    } else {
        Some(length.parse().with_context(|| format!("unsupported type `{ty}`"))?)
    };
    Ok(Some((&stripped[..open], length)))
}

/// Bit width of an integer type suffix, `256` when it is omitted.
fn bit_width(suffix: &str) -> Result<usize> {
    if suffix.is_empty() {
        return Ok(256);
    }
    let bits: usize = suffix.parse().context("invalid integer type")?;
    ensure!(
        bits % 8 == 0 && (8..=256).contains(&bits),
        "invalid integer width {bits}"
    );
    Ok(bits)
}

fn string(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| anyhow!("expected a string"))
}

fn hex_bytes(value: &Value) -> Result<Vec<u8>> {
    let s = string(value)?;
    Ok(hex::decode(s.strip_prefix("0x").unwrap_or(s))?)
}

fn uint(value: &Value) -> Result<U256> {
    match value {
        Value::Integer(integer) => Ok(U256::from(
            u64::try_from(*integer).context("negative value for unsigned integer")?,
        )),
        Value::String(s) => Ok(number::parse_u256(s)?),
        _ => bail!("expected an integer"),
    }
}

fn int(value: &Value) -> Result<I256> {
    match value {
        Value::Integer(integer) => {
            I256::try_from(*integer).map_err(|_| anyhow!("{integer} does not fit into 256 bits"))
        }
        Value::String(s) => Ok(I256::from_dec_str(s)?),
        _ => bail!("expected an integer"),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::b256, std::io::Write};

    const CALL: &str = r#"
        primary-type = "Call"

        [[fields]]
        name = "to"
        type = "bytes32"
        value = "0x05d4f1ba301559254a7769068cceb2db6291b2cf83d79f52e3755145e9c322da"

        [[fields]]
        name = "selector"
        type = "bytes32"
        value = "0x030f842021fbf02caf80d09a113997c1e00a32870eee0c6136bed27acb348bea"

        [[fields]]
        name = "calldata"
        type = "uint256[]"
        value = [1000, "0x29b"]
    "#;

    #[test]
    fn loads_call() {
        let typed = load_str(CALL).unwrap();
        assert!(typed.domain.is_none());
        assert_eq!(
            typed.message.signature().as_str(),
            "Call(bytes32 to,bytes32 selector,uint256[] calldata)"
        );
        // uint256 and bytes32 words of the same value encode identically.
        assert_eq!(
            typed.message.hash_struct().unwrap().0,
            eip712::hash_struct(
                &typed.message.type_hash(),
                &[
                    b256!("05d4f1ba301559254a7769068cceb2db6291b2cf83d79f52e3755145e9c322da"),
                    b256!("030f842021fbf02caf80d09a113997c1e00a32870eee0c6136bed27acb348bea"),
                    b256!("1741fb0747352552d5e4bdf2c9a5fe430233a2dab7ed433252c996267ad6c4d3"),
                ]
            )
            .unwrap()
            .0
        );
    }

    #[test]
    fn loads_domain() {
        let typed = load_str(
            r#"
            primary-type = "Empty"

            [domain]
            name = "Ether Mail"
            version = "1"
            chain-id = 1
            verifying-contract = "0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"
            "#,
        )
        .unwrap();
        let domain = typed.domain.unwrap();
        assert_eq!(
            format!("{:?}", domain.separator().unwrap()),
            "f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f"
        );
    }

    #[test]
    fn integer_version_is_uint256() {
        let typed = load_str(
            r#"
            primary-type = "Empty"

            [domain]
            name = "Cairo"
            version = 1
            chain-id = "0x1"
            "#,
        )
        .unwrap();
        assert_eq!(
            typed.domain.unwrap().to_struct().signature().as_str(),
            "EIP712Domain(string name,uint256 version,uint256 chainId)"
        );
    }

    #[test]
    fn supports_all_member_types() {
        let typed = load_str(
            r#"
            primary-type = "All"
            fields = [
                { name = "a", type = "bool", value = true },
                { name = "b", type = "address", value = "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826" },
                { name = "c", type = "string", value = "Hello, Bob!" },
                { name = "d", type = "bytes", value = "0xdeadbeef" },
                { name = "e", type = "uint8", value = 255 },
                { name = "f", type = "int256", value = -1 },
                { name = "g", type = "bytes4", value = "0xdeadbeef" },
                { name = "h", type = "address[2]", value = ["0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826", "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"] },
            ]
            "#,
        )
        .unwrap();
        let values: Vec<_> = typed.message.fields.iter().map(|f| &f.value).collect();
        assert_eq!(values[0], &FieldValue::Bool(true));
        assert_eq!(values[4], &FieldValue::Uint(U256::from(255)));
        assert_eq!(values[5], &FieldValue::Int(I256::MINUS_ONE));
        assert_eq!(values[6], &FieldValue::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef]));
        assert!(matches!(values[7], FieldValue::Array(elements) if elements.len() == 2));
        assert!(typed.message.hash_struct().is_ok());
    }

    #[test]
    fn rejects_invalid_members() {
        for (ty, value) in [
            ("bytes4", r#""0xdeadbeefff""#),
            ("bytes33", r#""0x00""#),
            ("uint7", "1"),
            ("uint256", "-1"),
            ("uint8", "1000"),
            ("uint8", "256"),
            ("uint", r#""0x10000000000000000000000000000000000000000000000000000000000000000""#),
            ("int8", "-1000"),
            ("int8", "128"),
            ("int8", "-129"),
            ("int16[]", "[1, 40000]"),
            ("bool", "1"),
            ("address[1]", r#"["0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826", "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"]"#),
            ("tuple", "1"),
        ] {
            let config = format!(
                "primary-type = \"T\"\n[[fields]]\nname = \"x\"\ntype = \"{ty}\"\nvalue = {value}\n"
            );
            assert!(load_str(&config).is_err(), "{ty} = {value} should be rejected");
        }
    }

    #[test]
    fn accepts_integer_width_boundaries() {
        for (ty, value) in [
            ("uint8", "255"),
            ("uint8", "0"),
            ("uint128", r#""0xffffffffffffffffffffffffffffffff""#),
            ("uint", r#""0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff""#),
            ("int8", "127"),
            ("int8", "-128"),
            ("int64", "-9223372036854775808"),
            ("int256", r#""-57896044618658097711785492504343953926634992332820282019728792003956564819968""#),
        ] {
            let config = format!(
                "primary-type = \"T\"\n[[fields]]\nname = \"x\"\ntype = \"{ty}\"\nvalue = {value}\n"
            );
            assert!(load_str(&config).is_ok(), "{ty} = {value} should be accepted");
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(load_str("primary-type = \"T\"\nunknown = 1\n").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CALL.as_bytes()).unwrap();
        let typed = load(file.path()).unwrap();
        assert_eq!(typed.message.name, "Call");
        assert!(load(Path::new("/does/not/exist.toml")).is_err());
    }
}
