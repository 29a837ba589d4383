#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use pix_brcode_model::{
    build_payload, build_payload_lenient, verify_payload, ChargeRequest, MerchantConfig,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use tracing_subscriber::EnvFilter;

pub const ENV_PIX_BRCODE_LOG: &str = "PIX_BRCODE_LOG";

#[derive(Parser)]
#[command(name = "pix-brcode", version)]
#[command(about = "Static PIX BR Code payload operations CLI")]
#[command(after_help = "Environment:\n  PIX_BRCODE_LOG   Log verbosity override")]
struct Cli {
    /// Machine-readable JSON output.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a merchant-presented payload from flags or a request file.
    Generate {
        #[arg(long, conflicts_with = "request", required_unless_present = "request")]
        key: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        txid: Option<String>,
        /// Read a ChargeRequest JSON document instead of flags.
        #[arg(long)]
        request: Option<PathBuf>,
        /// Reproduce the historical silent-degradation behavior.
        #[arg(long, default_value_t = false)]
        legacy: bool,
    },
    /// Check the framing and checksum of an existing payload.
    Verify { payload: String },
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
}

fn exit(code: ExitCode) -> ProcessExitCode {
    ProcessExitCode::from(code as u8)
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    run(&cli)
}

fn init_tracing(quiet: bool, verbose: u8) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_env(ENV_PIX_BRCODE_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> ProcessExitCode {
    match &cli.command {
        Commands::Generate { key, amount, name, city, txid, request, legacy } => {
            let request = match load_request(key, *amount, name, city, txid, request) {
                Ok(request) => request,
                Err(message) => {
                    emit_error(cli.json, "usage", &message);
                    return exit(ExitCode::Usage);
                }
            };
            let config = MerchantConfig::default();
            let payload = if *legacy {
                build_payload_lenient(&request, &config)
            } else {
                match build_payload(&request, &config) {
                    Ok(payload) => payload,
                    Err(err) => {
                        emit_error(cli.json, "validation", &err.to_string());
                        return exit(ExitCode::Validation);
                    }
                }
            };
            tracing::debug!(len = payload.len(), legacy, "payload assembled");
            if cli.json {
                let crc = &payload[payload.len() - 4..];
                println!("{}", json!({ "payload": payload, "crc": crc }));
            } else {
                println!("{payload}");
            }
            exit(ExitCode::Success)
        }
        Commands::Verify { payload } => match verify_payload(payload) {
            Ok(()) => {
                if cli.json {
                    let crc = &payload[payload.len() - 4..];
                    println!("{}", json!({ "valid": true, "crc": crc }));
                } else if !cli.quiet {
                    println!("ok");
                }
                exit(ExitCode::Success)
            }
            Err(err) => {
                emit_error(cli.json, "validation", &err.to_string());
                exit(ExitCode::Validation)
            }
        },
    }
}

fn load_request(
    key: &Option<String>,
    amount: Option<f64>,
    name: &Option<String>,
    city: &Option<String>,
    txid: &Option<String>,
    request: &Option<PathBuf>,
) -> Result<ChargeRequest, String> {
    if let Some(path) = request {
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("read {}: {err}", path.display()))?;
        return serde_json::from_str(&raw)
            .map_err(|err| format!("parse {}: {err}", path.display()));
    }
    let Some(key) = key else {
        return Err("either --key or --request is required".to_string());
    };
    Ok(ChargeRequest {
        pix_key: key.clone(),
        merchant_name: name.clone(),
        merchant_city: city.clone(),
        amount,
        txid: txid.clone(),
    })
}

fn emit_error(json_mode: bool, code: &str, message: &str) {
    if json_mode {
        println!(
            "{}",
            json!({ "code": code, "message": message, "details": {} })
        );
    } else {
        eprintln!("error: {message}");
    }
}
