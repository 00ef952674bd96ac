//! Local Ed25519 identity and approval attestations for Tekimax.
//!
//! This crate provides:
//! - A durable per-device keypair behind an injected [`IdentityStore`]
//! - Deterministic Ed25519 signing and verification over exact payload text
//! - `AI_APPROVAL` attestations that bind an entity to a content hash
//!
//! ## Quick Start
//!
//! ```rust
//! use tekimax_identity::{sign_approval, verify, IdentityManager, MemoryStore};
//!
//! let manager = IdentityManager::new(MemoryStore::new());
//! let identity = manager.ensure_identity()?;
//!
//! let signed = sign_approval("goal", "goal_123", "Increase MRR to $50k", &identity.private_key)?;
//! assert!(verify(&identity.public_key, &signed.payload, &signed.signature));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Verification always uses the stored payload string. Re-serializing its
//! fields is not guaranteed to reproduce the signed bytes.

#![deny(missing_docs)]

/// Signed approval records.
pub mod attestation;
/// Store location configuration.
pub mod config;
/// Error types for identity operations.
pub mod errors;
/// Key handles and stored key formats.
pub mod keys;
/// Identity get-or-create.
pub mod manager;
/// Signing and verification primitives.
pub mod signer;
/// Persistent slots for the identity.
pub mod store;

pub use attestation::{
    sign_approval, sign_approval_at, sign_json_content, ApprovalProof, ApprovalVerdict,
    SignedApproval,
};
pub use config::{IdentityConfig, HOME_ENV};
pub use errors::{AttestationError, IdentityError, KeyImportError, StoreError, VerifyError};
pub use keys::{PrivateKeyJwk, PublicKey, SigningHandle};
pub use manager::{Identity, IdentityManager, IdentityOrigin};
pub use signer::{sign, verify, verify_detailed};
pub use store::{FileStore, IdentityStore, MemoryStore, StorageSlot};
pub use tekimax_canonical::{hash_content, CanonicalApproval, ContentHash};
