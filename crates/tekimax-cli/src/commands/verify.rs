//! Verify command implementation.

use serde_json::json;
use tekimax_identity::{verify_detailed, ApprovalProof, ApprovalVerdict};

use super::read_input;
use crate::output::{format_json, verdict_label};

pub fn run(
    public_key: String,
    signature: String,
    payload: Option<String>,
    payload_file: Option<String>,
    content_file: Option<String>,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = match (payload, payload_file) {
        (Some(text), _) => text,
        (None, file) => read_input(file)?,
    };
    let content = content_file.map(|path| read_input(Some(path))).transpose()?;

    let reason = verify_detailed(&public_key, &payload, &signature).err();
    let proof = ApprovalProof {
        signature,
        payload,
        public_key,
    };

    // Raw payloads only need a good signature; approval checks apply when
    // the payload is an approval or content was supplied.
    let verdict = match (&reason, &content) {
        (Some(_), _) => ApprovalVerdict::BadSignature,
        (None, Some(content)) => proof.verify(Some(content)),
        (None, None) if proof.approval().is_ok() => proof.verify(None),
        (None, None) => ApprovalVerdict::Valid,
    };

    if json_output {
        println!(
            "{}",
            format_json(&json!({
                "verdict": format!("{:?}", verdict),
                "reason": reason.as_ref().map(|r| r.to_string()),
            }))
        );
    } else {
        match &reason {
            Some(r) => println!("{} ({})", verdict_label(verdict), r),
            None => println!("{}", verdict_label(verdict)),
        }
    }

    if strict && verdict != ApprovalVerdict::Valid {
        std::process::exit(1);
    }

    Ok(())
}
