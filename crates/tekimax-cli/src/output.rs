//! Output formatting utilities.

use serde_json::Value;
use tekimax_identity::ApprovalVerdict;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Human-readable verdict.
pub fn verdict_label(verdict: ApprovalVerdict) -> &'static str {
    match verdict {
        ApprovalVerdict::Valid => "VALID",
        ApprovalVerdict::BadSignature => "INVALID: bad signature",
        ApprovalVerdict::MalformedPayload => "INVALID: malformed approval payload",
        ApprovalVerdict::ContentMismatch => "INVALID: content does not match",
    }
}
