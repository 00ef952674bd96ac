//! Subcommand implementations.

pub mod approve;
pub mod canonicalize;
pub mod hash;
pub mod identity;
pub mod sign;
pub mod verify;

use std::io::{self, Read};
use std::path::PathBuf;
use tekimax_identity::{FileStore, IdentityConfig, IdentityManager};

/// Reads input from a file, or stdin if no path is given.
///
/// Content is used byte-for-byte; a trailing newline from stdin is part of it.
pub fn read_input(input: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e).into()),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Opens the identity manager for the given or configured directory.
pub fn open_manager(
    store_dir: Option<PathBuf>,
) -> Result<IdentityManager<FileStore>, Box<dyn std::error::Error>> {
    let config = match store_dir {
        Some(dir) => IdentityConfig::with_store_dir(dir),
        None => IdentityConfig::from_env()?,
    };
    let store = FileStore::open(&config)
        .map_err(|e| format!("Failed to open identity store {}: {}", config.store_dir.display(), e))?;
    tracing::debug!(store_dir = %store.dir().display(), "opened identity store");
    Ok(IdentityManager::new(store))
}
