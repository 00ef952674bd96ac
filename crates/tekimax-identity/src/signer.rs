use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer};

use crate::errors::VerifyError;
use crate::keys::{PublicKey, SigningHandle};

/// Signs the UTF-8 bytes of `payload`, returning a base64 signature.
///
/// Ed25519 is deterministic: the same key and payload always give the same
/// signature.
pub fn sign(payload: &str, key: &SigningHandle) -> String {
    let signature = key.signing_key().sign(payload.as_bytes());
    STANDARD.encode(signature.to_bytes())
}

/// Checks a base64 signature over the exact `payload` text.
///
/// Any malformed input yields `false`.
pub fn verify(public_key: &str, payload: &str, signature: &str) -> bool {
    verify_detailed(public_key, payload, signature).is_ok()
}

/// Like [`verify`], but reports why verification failed.
pub fn verify_detailed(
    public_key: &str,
    payload: &str,
    signature: &str,
) -> Result<(), VerifyError> {
    let key = PublicKey::from_base64(public_key)?;
    let bytes = STANDARD
        .decode(signature)
        .map_err(|_| VerifyError::SignatureEncoding)?;
    let bytes: [u8; 64] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| VerifyError::SignatureLength(bytes.len()))?;
    let signature = Signature::from_bytes(&bytes);
    key.verifying_key()
        .verify_strict(payload.as_bytes(), &signature)
        .map_err(|_| VerifyError::BadSignature)
}
