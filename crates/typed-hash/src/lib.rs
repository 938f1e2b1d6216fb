pub mod cli;
pub mod config;

use {
    anyhow::{Context, Result},
    clap::Parser,
    cli::{Command, HalvesArgs, StructArgs},
    eip712::{StructHash, TypeSignature},
    number::{U256Ext, Uint256Halves},
    starknet_hash::L1HandlerMessage,
    std::process::ExitCode,
};

/// Parses the arguments, runs the command and prints its result as a single
/// line on stdout.
pub fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = cli::Args::parse_from(args);
    let obs_config = observe::Config::new(&args.log_filter, args.use_json_logs);
    observe::tracing::initialize(&obs_config);
    tracing::info!("running typed-hash with {args:#?}");

    match run(&args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(?err, "command failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Executes a command and returns what should be printed.
pub fn run(command: &Command) -> Result<String> {
    Ok(match command {
        Command::Report { call, halves, felt } => {
            let struct_hash = struct_hash(call)?;
            let combined = combine(halves)?;
            let field_hash = starknet_hash::field_hash(*felt)?;
            format!("{struct_hash} {combined} {}", field_hash.to_hex_string())
        }
        Command::TypeHash { type_signature } => {
            eip712::type_hash(&TypeSignature::from(type_signature.as_str())).to_string()
        }
        Command::StructHash(call) => struct_hash(call)?.to_string(),
        Command::TypedData { config } => {
            let typed = config::load(config)?;
            let struct_hash = typed.message.hash_struct()?;
            tracing::debug!(signature = %typed.message.signature(), %struct_hash, "hashed typed data");
            match typed.domain {
                Some(domain) => {
                    let separator = domain.separator().context("domain")?;
                    let digest = eip712::hashed_eip712_message(&separator, &struct_hash);
                    format!("{struct_hash} {separator} {digest}")
                }
                None => struct_hash.to_string(),
            }
        }
        Command::Combine(halves) => combine(halves)?,
        Command::FieldHash { value } => starknet_hash::field_hash(*value)?.to_hex_string(),
        Command::L1HandlerTxHash(l1) => L1HandlerMessage {
            from_address: l1.from_address,
            to_address: l1.to_address,
            selector: l1.selector,
            nonce: l1.nonce,
            payload: l1.payload.clone(),
        }
        .tx_hash(l1.chain_id)
        .to_hex_string(),
    })
}

fn struct_hash(args: &StructArgs) -> Result<StructHash> {
    let signature = TypeSignature::from(args.type_signature.as_str());
    let hash = eip712::hash_struct(&eip712::type_hash(&signature), &args.fields)
        .with_context(|| format!("hashing {signature}"))?;
    Ok(hash)
}

fn combine(args: &HalvesArgs) -> Result<String> {
    let halves = Uint256Halves::from_str_halves(&args.low, &args.high)?;
    Ok(halves.combine().to_hex_string())
}
