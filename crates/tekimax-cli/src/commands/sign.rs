//! Sign command implementation.

use std::path::PathBuf;

use super::{open_manager, read_input};

pub fn run(input: Option<String>, store_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let payload = read_input(input)?;
    let identity = open_manager(store_dir)?.ensure_identity()?;
    println!("{}", tekimax_identity::sign(&payload, &identity.private_key));
    Ok(())
}
