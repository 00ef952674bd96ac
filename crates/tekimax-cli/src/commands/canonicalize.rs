//! Canonicalize command implementation.

use serde_json::Value;
use tekimax_canonical::Canonicalizer;

use super::read_input;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let canonicalizer = Canonicalizer::default();

    let json_str = read_input(input)?;
    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| format!("Invalid JSON: {}", e))?;

    let canonical = canonicalizer
        .canonicalize_to_string(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", canonical);
    Ok(())
}
