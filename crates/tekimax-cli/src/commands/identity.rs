//! Identity command implementation.

use serde_json::json;
use std::path::PathBuf;

use super::open_manager;
use crate::output::format_json;

pub fn run(store_dir: Option<PathBuf>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manager = open_manager(store_dir)?;
    let identity = manager.ensure_identity()?;

    if json_output {
        println!(
            "{}",
            format_json(&json!({
                "publicKey": identity.public_key,
                "origin": format!("{:?}", identity.origin),
                "storeDir": manager.store().dir().display().to_string(),
            }))
        );
    } else {
        println!("{}", identity.public_key);
    }
    Ok(())
}
