//! Tekimax CLI - local signing identity, approvals and verification.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{approve, canonicalize, hash, identity, sign, verify};

#[derive(Parser)]
#[command(name = "tekimax")]
#[command(about = "Tekimax local identity and approval attestation CLI")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the local public key, creating the identity on first use
    Identity {
        /// Identity directory (default: $TEKIMAX_HOME or ~/.tekimax/identity)
        #[arg(long)]
        store_dir: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the SHA-256 content hash of the input
    Hash {
        /// Input file (or stdin if not provided)
        input: Option<String>,
    },
    /// Show canonical bytes for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Sign raw payload text with the local identity
    Sign {
        /// Payload file (or stdin if not provided)
        input: Option<String>,
        /// Identity directory
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
    /// Sign an approval of content for an entity
    Approve {
        /// Kind of record, e.g. `goal`
        #[arg(long)]
        entity_type: String,
        /// Record identifier
        #[arg(long)]
        entity_id: String,
        /// Content file (or stdin if not provided)
        input: Option<String>,
        /// Identity directory
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
    /// Verify a signature over a payload
    Verify {
        /// Base64 public key of the signer
        #[arg(long)]
        public_key: String,
        /// Base64 signature
        #[arg(long)]
        signature: String,
        /// Payload text
        #[arg(conflicts_with = "payload_file")]
        payload: Option<String>,
        /// Read the payload from a file instead
        #[arg(long)]
        payload_file: Option<String>,
        /// Also check the approval's content hash against this file
        #[arg(long)]
        content_file: Option<String>,
        /// Exit with error code unless the verdict is valid
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Identity { store_dir, json } => identity::run(store_dir, json),
        Commands::Hash { input } => hash::run(input),
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Sign { input, store_dir } => sign::run(input, store_dir),
        Commands::Approve {
            entity_type,
            entity_id,
            input,
            store_dir,
        } => approve::run(entity_type, entity_id, input, store_dir),
        Commands::Verify {
            public_key,
            signature,
            payload,
            payload_file,
            content_file,
            strict,
            json,
        } => verify::run(
            public_key,
            signature,
            payload,
            payload_file,
            content_file,
            strict,
            json,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
