use tekimax_canonical::{CanonicalizationError, ValidationError};
use thiserror::Error;

/// Errors raised by an [`IdentityStore`](crate::IdentityStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while reading or writing a slot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The store location could not be determined.
    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// Stored private key material could not be turned back into a signing key.
#[derive(Error, Debug)]
pub enum KeyImportError {
    /// The stored text is not a JWK object.
    #[error("stored key is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JWK describes something other than an Ed25519 key.
    #[error("unsupported key type {kty}/{crv}")]
    Unsupported {
        /// JWK `kty` member.
        kty: String,
        /// JWK `crv` member.
        crv: String,
    },
    /// A key member is not base64url.
    #[error("JWK member '{0}' is not base64url")]
    Encoding(&'static str),
    /// A key member has the wrong length.
    #[error("JWK member '{field}' is {len} bytes, expected 32")]
    Length {
        /// JWK member name.
        field: &'static str,
        /// Decoded length.
        len: usize,
    },
    /// The public half does not belong to the private half.
    #[error("public key does not match private key")]
    PublicKeyMismatch,
}

/// Errors from [`IdentityManager`](crate::IdentityManager).
#[derive(Error, Debug)]
pub enum IdentityError {
    /// No cryptographically secure randomness is available.
    #[error("cryptographic provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Reading or writing the identity store failed.
    #[error("identity store error: {0}")]
    Store(#[from] StoreError),
    /// A freshly generated key could not be exported.
    #[error("key export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Errors from building an approval attestation.
#[derive(Error, Debug)]
pub enum AttestationError {
    /// Entity type or id failed validation.
    #[error("invalid approval input: {0}")]
    Validation(#[from] ValidationError),
    /// Payload or content could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Reason a signature did not verify.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerifyError {
    /// Public key is not standard base64.
    #[error("public key is not base64")]
    PublicKeyEncoding,
    /// Public key decodes to the wrong number of bytes.
    #[error("public key is {0} bytes, expected 32")]
    PublicKeyLength(usize),
    /// Public key bytes are not a valid Ed25519 point.
    #[error("public key is not a valid Ed25519 key")]
    InvalidPublicKey,
    /// Signature is not standard base64.
    #[error("signature is not base64")]
    SignatureEncoding,
    /// Signature decodes to the wrong number of bytes.
    #[error("signature is {0} bytes, expected 64")]
    SignatureLength(usize),
    /// Signature does not match payload and key.
    #[error("signature does not match")]
    BadSignature,
}
