//! The `AI_APPROVAL` payload: "this content was approved for this entity".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonicalizer::{CanonicalizationError, Canonicalizer};
use crate::digest::{hash_content, ContentHash};
use crate::identifiers::{EntityId, EntityType, TimestampMillis};

/// Discriminator carried in the `type` member of every approval payload.
pub const APPROVAL_TYPE: &str = "AI_APPROVAL";

/// Error returned when a stored payload cannot be accepted.
#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    /// Payload is not valid JSON or does not have the approval shape.
    #[error("malformed approval payload: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload carries a different (or no) discriminator.
    #[error("unexpected payload type '{0}'")]
    WrongType(String),
    /// Payload has the right members but not in canonical form.
    #[error("payload is not in canonical form")]
    NotCanonical,
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Logical schema of a signed approval.
///
/// Encoded with RFC 8785, so the wire order of members is
/// `contentHash, entityId, entityType, timestamp, type` no matter how the
/// struct is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CanonicalApproval {
    /// Always [`APPROVAL_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind of record being approved.
    pub entity_type: EntityType,
    /// Specific record being approved.
    pub entity_id: EntityId,
    /// Digest of the exact content that was approved.
    pub content_hash: ContentHash,
    /// Signing time.
    pub timestamp: TimestampMillis,
}

impl CanonicalApproval {
    /// Builds an approval over `content`, hashing it in the process.
    pub fn new(
        entity_type: EntityType,
        entity_id: EntityId,
        content: &str,
        timestamp: TimestampMillis,
    ) -> Self {
        Self::with_hash(entity_type, entity_id, hash_content(content), timestamp)
    }

    /// Builds an approval from an already computed content hash.
    pub fn with_hash(
        entity_type: EntityType,
        entity_id: EntityId,
        content_hash: ContentHash,
        timestamp: TimestampMillis,
    ) -> Self {
        Self {
            kind: APPROVAL_TYPE.to_string(),
            entity_type,
            entity_id,
            content_hash,
            timestamp,
        }
    }

    /// Canonical text of this approval. These are the bytes that get signed.
    pub fn to_canonical_string(
        &self,
        canonicalizer: &Canonicalizer,
    ) -> Result<String, CanonicalizationError> {
        canonicalizer.canonicalize_serializable(self)
    }

    /// Parses a stored payload.
    ///
    /// Only payloads that are byte-for-byte canonical are accepted; the same
    /// members in another order are rejected with [`PayloadError::NotCanonical`].
    pub fn parse(text: &str, canonicalizer: &Canonicalizer) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(text)?;
        match value.get("type").and_then(Value::as_str) {
            Some(APPROVAL_TYPE) => {}
            Some(other) => return Err(PayloadError::WrongType(other.to_string())),
            None => return Err(PayloadError::WrongType(String::new())),
        }
        if canonicalizer.canonicalize_to_string(&value)? != text {
            return Err(PayloadError::NotCanonical);
        }
        Ok(serde_json::from_value(value)?)
    }
}
