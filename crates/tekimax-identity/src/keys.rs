//! Ed25519 key handles and their stored representations.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

use crate::errors::{IdentityError, KeyImportError, VerifyError};

/// Length of Ed25519 secret seeds and public keys.
pub const ED25519_KEY_LEN: usize = 32;

const JWK_KTY: &str = "OKP";
const JWK_CRV: &str = "Ed25519";

/// Signing-capable private key.
///
/// Raw secret bytes never leave this type; the only export is
/// [`PrivateKeyJwk`].
#[derive(Clone)]
pub struct SigningHandle {
    key: SigningKey,
}

impl SigningHandle {
    /// Generates a key from the operating system CSPRNG.
    pub fn generate() -> Result<Self, IdentityError> {
        let mut secret = Zeroizing::new([0u8; ED25519_KEY_LEN]);
        getrandom::fill(secret.as_mut_slice())
            .map_err(|e| IdentityError::ProviderUnavailable(format!("CSPRNG failed: {e}")))?;
        Ok(Self::from_seed(&secret))
    }

    /// Builds a key from a known seed (test vectors, recovery tooling).
    pub fn from_seed(seed: &[u8; ED25519_KEY_LEN]) -> Self {
        Self {
            key: SigningKey::from_bytes(seed),
        }
    }

    /// Public half of this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.key.verifying_key())
    }

    /// Exports the key as a re-importable JWK.
    pub fn to_jwk(&self) -> PrivateKeyJwk {
        PrivateKeyJwk {
            kty: JWK_KTY.to_string(),
            crv: JWK_CRV.to_string(),
            x: URL_SAFE_NO_PAD.encode(self.key.verifying_key().as_bytes()),
            d: URL_SAFE_NO_PAD.encode(self.key.as_bytes()),
            key_ops: vec!["sign".to_string()],
            ext: Some(true),
        }
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.key
    }
}

impl fmt::Debug for SigningHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningHandle")
            .field("public_key", &self.public_key().to_base64())
            .finish_non_exhaustive()
    }
}

/// Ed25519 verifying key, exchanged as standard padded base64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Base64 (standard alphabet, padded) encoding of the 32 key bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0.as_bytes())
    }

    /// Decodes a base64 public key.
    pub fn from_base64(encoded: &str) -> Result<Self, VerifyError> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| VerifyError::PublicKeyEncoding)?;
        let bytes: [u8; ED25519_KEY_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| VerifyError::PublicKeyLength(bytes.len()))?;
        VerifyingKey::from_bytes(&bytes)
            .map(Self)
            .map_err(|_| VerifyError::InvalidPublicKey)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_KEY_LEN] {
        self.0.as_bytes()
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

/// RFC 8037 OKP JSON Web Key holding an Ed25519 private key.
///
/// Matches what browsers emit from `exportKey("jwk", ...)`, so identities
/// can move between the web client and native tooling.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeyJwk {
    /// Key type, always `OKP`.
    pub kty: String,
    /// Curve, always `Ed25519`.
    pub crv: String,
    /// Public key, base64url without padding.
    pub x: String,
    /// Private seed, base64url without padding.
    pub d: String,
    /// Permitted operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_ops: Vec<String>,
    /// Extractable flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
}

impl PrivateKeyJwk {
    /// Parses the stored JSON text.
    pub fn from_json(text: &str) -> Result<Self, KeyImportError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reconstructs a signing handle, checking that `x` belongs to `d`.
    pub fn import(&self) -> Result<SigningHandle, KeyImportError> {
        if self.kty != JWK_KTY || self.crv != JWK_CRV {
            return Err(KeyImportError::Unsupported {
                kty: self.kty.clone(),
                crv: self.crv.clone(),
            });
        }
        let seed = decode_member("d", &self.d)?;
        let public = decode_member("x", &self.x)?;
        let handle = SigningHandle::from_seed(&seed);
        if handle.public_key().as_bytes() != &*public {
            return Err(KeyImportError::PublicKeyMismatch);
        }
        Ok(handle)
    }
}

impl fmt::Debug for PrivateKeyJwk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyJwk")
            .field("kty", &self.kty)
            .field("crv", &self.crv)
            .field("x", &self.x)
            .field("d", &"<redacted>")
            .finish()
    }
}

/// Decodes a 32-byte JWK member; every intermediate buffer is wiped on drop.
fn decode_member(
    field: &'static str,
    value: &str,
) -> Result<Zeroizing<[u8; ED25519_KEY_LEN]>, KeyImportError> {
    let bytes = Zeroizing::new(
        URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|_| KeyImportError::Encoding(field))?,
    );
    if bytes.len() != ED25519_KEY_LEN {
        return Err(KeyImportError::Length {
            field,
            len: bytes.len(),
        });
    }
    let mut key = Zeroizing::new([0u8; ED25519_KEY_LEN]);
    key.copy_from_slice(&bytes);
    Ok(key)
}
