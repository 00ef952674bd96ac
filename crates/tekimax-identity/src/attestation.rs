//! Signed "a human approved this content" records.

use serde::{Deserialize, Serialize};
use tekimax_canonical::{
    CanonicalApproval, Canonicalizer, EntityId, EntityType, PayloadError, TimestampMillis,
};

use crate::errors::AttestationError;
use crate::keys::SigningHandle;
use crate::signer;

/// Signature plus the exact payload text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedApproval {
    /// Base64 Ed25519 signature.
    pub signature: String,
    /// Canonical approval JSON that was signed.
    pub payload: String,
}

/// Signs an approval of `content` for the given entity at the current time.
///
/// Callers must store the returned payload verbatim next to the signature
/// and the signer's public key.
pub fn sign_approval(
    entity_type: &str,
    entity_id: &str,
    content: &str,
    key: &SigningHandle,
) -> Result<SignedApproval, AttestationError> {
    sign_approval_at(entity_type, entity_id, content, key, TimestampMillis::now())
}

/// [`sign_approval`] with an explicit timestamp.
///
/// Entity strings are signed as given; only an `entity_id` longer than
/// [`MAX_ENTITY_ID_LEN`](tekimax_canonical::MAX_ENTITY_ID_LEN) bytes is
/// rejected.
pub fn sign_approval_at(
    entity_type: &str,
    entity_id: &str,
    content: &str,
    key: &SigningHandle,
    timestamp: TimestampMillis,
) -> Result<SignedApproval, AttestationError> {
    let approval = CanonicalApproval::new(
        EntityType::parse(entity_type)?,
        EntityId::parse(entity_id)?,
        content,
        timestamp,
    );
    let payload = approval.to_canonical_string(&Canonicalizer::default())?;
    let signature = signer::sign(&payload, key);
    tracing::debug!(
        entity_type,
        content_hash = %approval.content_hash,
        "signed approval"
    );
    Ok(SignedApproval { signature, payload })
}

/// Signs an approval of structured content.
///
/// The content is canonicalized first, so the same fields always hash the
/// same no matter how they were assembled.
pub fn sign_json_content<T: Serialize + ?Sized>(
    entity_type: &str,
    entity_id: &str,
    content: &T,
    key: &SigningHandle,
) -> Result<SignedApproval, AttestationError> {
    let content = Canonicalizer::default().canonicalize_serializable(content)?;
    sign_approval(entity_type, entity_id, &content, key)
}

/// The triple a record stores to prove an approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalProof {
    /// Base64 signature.
    pub signature: String,
    /// Exact signed payload.
    pub payload: String,
    /// Base64 public key of the signer.
    pub public_key: String,
}

/// Outcome of checking an [`ApprovalProof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalVerdict {
    /// Signature, payload and (if given) content all check out.
    Valid,
    /// Signature does not verify under the public key.
    BadSignature,
    /// Payload is signed but is not a canonical approval.
    MalformedPayload,
    /// Payload is valid but attests to different content.
    ContentMismatch,
}

impl ApprovalProof {
    /// Attaches the signer's public key to a signed approval.
    pub fn new(signed: SignedApproval, public_key: impl Into<String>) -> Self {
        Self {
            signature: signed.signature,
            payload: signed.payload,
            public_key: public_key.into(),
        }
    }

    /// Decodes the approval carried in the payload.
    pub fn approval(&self) -> Result<CanonicalApproval, PayloadError> {
        CanonicalApproval::parse(&self.payload, &Canonicalizer::default())
    }

    /// Verifies the proof, optionally against the content it claims to cover.
    pub fn verify(&self, content: Option<&str>) -> ApprovalVerdict {
        if !signer::verify(&self.public_key, &self.payload, &self.signature) {
            return ApprovalVerdict::BadSignature;
        }
        let Ok(approval) = self.approval() else {
            return ApprovalVerdict::MalformedPayload;
        };
        match content {
            Some(content) if !approval.content_hash.matches(content) => {
                ApprovalVerdict::ContentMismatch
            }
            _ => ApprovalVerdict::Valid,
        }
    }
}
