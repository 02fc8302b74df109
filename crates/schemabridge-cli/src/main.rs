//! Command-line host for the SchemaBridge payload codec.
//!
//! Runs one `decode` or `encode` callback per invocation, the way a gateway
//! would for a single message.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemabridge_core::prelude::*;
use schemabridge_core::{decode_with, encode_with};

/// Environment variable switching logs to JSON.
const LOG_JSON_ENV: &str = "SCHEMABRIDGE_LOG_JSON";

/// SchemaBridge - translate device payloads to and from the normative schema.
#[derive(Parser, Debug)]
#[command(name = "schemabridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// TOML file with `inbound_topic` / `outbound_topic`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the inbound (device → gateway) topic.
    #[arg(long, global = true)]
    inbound_topic: Option<String>,

    /// Override the outbound (gateway → device) topic.
    #[arg(long, global = true)]
    outbound_topic: Option<String>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a device payload into the normative format.
    Decode {
        /// Topic the payload arrived on.
        #[arg(short, long)]
        topic: String,
        /// Payload file (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Translate a normative request into the device format.
    Encode {
        /// Topic the request is sent on.
        #[arg(short, long)]
        topic: String,
        /// Message file (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    tracing::debug!(
        inbound = %config.inbound_topic,
        outbound = %config.outbound_topic,
        "Codec topics"
    );
    let codec = SensorCodec::new(&config);

    let (status, out) = match &args.command {
        Command::Decode { topic, input } => {
            let payload = read_input(input.as_deref())?;
            let (status, out) = decode_with(&codec, topic, payload);
            (status, out.into_bytes())
        }
        Command::Encode { topic, input } => {
            let message = read_input(input.as_deref())?;
            encode_with(&codec, topic, message)
        }
    };

    match status {
        Status::Ok => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&out)?;
            stdout.write_all(b"\n")?;
            Ok(ExitCode::SUCCESS)
        }
        Status::Error => {
            eprintln!("{}", String::from_utf8_lossy(&out));
            Ok(ExitCode::from(status.code()))
        }
    }
}

/// Logs go to stderr; stdout carries only the translated payload.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let json_logging = std::env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "schemabridge={default_level},schemabridge_core={default_level},warn"
        ))
    });

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Defaults, then the config file, then environment, then flags.
fn load_config(args: &Args) -> Result<CodecConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str::<CodecConfig>(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
                .merge_lookup(|key| std::env::var(key).ok())
        }
        None => CodecConfig::from_env(),
    };

    if let Some(topic) = &args.inbound_topic {
        config = config.with_inbound_topic(topic);
    }
    if let Some(topic) = &args.outbound_topic {
        config = config.with_outbound_topic(topic);
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
