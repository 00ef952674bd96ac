//! Approve command implementation.

use std::path::PathBuf;
use tekimax_identity::{sign_approval, ApprovalProof};

use super::{open_manager, read_input};
use crate::output::format_json;

pub fn run(
    entity_type: String,
    entity_id: String,
    input: Option<String>,
    store_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_input(input)?;
    let identity = open_manager(store_dir)?.ensure_identity()?;

    let signed = sign_approval(&entity_type, &entity_id, &content, &identity.private_key)
        .map_err(|e| format!("Failed to sign approval: {}", e))?;
    let proof = ApprovalProof::new(signed, identity.public_key);

    println!("{}", format_json(&serde_json::to_value(&proof)?));
    Ok(())
}
