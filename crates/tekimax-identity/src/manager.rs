//! Get-or-create for the device's signing identity.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::errors::{IdentityError, KeyImportError};
use crate::keys::{PrivateKeyJwk, SigningHandle};
use crate::store::{IdentityStore, StorageSlot};

/// How [`IdentityManager::ensure_identity`] obtained the identity it returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityOrigin {
    /// Read back from the store.
    Loaded,
    /// Nothing was stored; a first identity was created.
    Generated,
    /// Stored material was corrupt or incomplete and has been replaced.
    /// Signatures made with the previous key can no longer be tied to this device.
    Regenerated,
}

/// The local identity: public key string plus signing capability.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Base64 public key, as stored and as handed to the backend.
    pub public_key: String,
    /// Signing handle for the matching private key.
    pub private_key: SigningHandle,
    /// Whether this identity was loaded or freshly minted.
    pub origin: IdentityOrigin,
}

/// Keeps exactly one identity per store.
///
/// The ensure path runs under an in-process lock, so concurrent callers in
/// the same process never mint two keys. Separate processes sharing a store
/// are not coordinated; the last writer wins.
pub struct IdentityManager<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: IdentityStore> IdentityManager<S> {
    /// Creates a manager over an injected store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored identity, creating and persisting one if none is usable.
    ///
    /// A stored private key that fails to import (or whose public half does
    /// not match the stored public key) is replaced rather than reported;
    /// the replacement is visible as [`IdentityOrigin::Regenerated`].
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::ProviderUnavailable`] if no secure randomness
    /// is available, and [`IdentityError::Store`] if the store cannot be read
    /// or written.
    pub fn ensure_identity(&self) -> Result<Identity, IdentityError> {
        let _guard = self.lock.lock();

        let stored_public = self.store.get(StorageSlot::PublicKey)?;
        let stored_private = self.store.get(StorageSlot::PrivateKey)?;

        let origin = match (stored_public, stored_private) {
            (Some(public_key), Some(private)) => match load(&public_key, &private) {
                Ok(private_key) => {
                    debug!(public_key = %public_key, "loaded stored identity");
                    return Ok(Identity {
                        public_key,
                        private_key,
                        origin: IdentityOrigin::Loaded,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "stored identity is unusable, generating a new one");
                    IdentityOrigin::Regenerated
                }
            },
            (None, None) => IdentityOrigin::Generated,
            _ => {
                warn!("identity store holds half a keypair, generating a new one");
                IdentityOrigin::Regenerated
            }
        };

        let private_key = SigningHandle::generate()?;
        let public_key = private_key.public_key().to_base64();
        let jwk = private_key.to_jwk().to_json()?;

        self.store.put(StorageSlot::PrivateKey, &jwk)?;
        self.store.put(StorageSlot::PublicKey, &public_key)?;
        info!(public_key = %public_key, ?origin, "generated signing identity");

        Ok(Identity {
            public_key,
            private_key,
            origin,
        })
    }

    /// Base64 public key of the local identity, creating it if needed.
    pub fn public_key(&self) -> Result<String, IdentityError> {
        Ok(self.ensure_identity()?.public_key)
    }
}

fn load(public_key: &str, private: &str) -> Result<SigningHandle, KeyImportError> {
    let handle = PrivateKeyJwk::from_json(private)?.import()?;
    if handle.public_key().to_base64() != public_key {
        return Err(KeyImportError::PublicKeyMismatch);
    }
    Ok(handle)
}
