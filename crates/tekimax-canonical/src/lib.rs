//! Canonical payload primitives for Tekimax approval attestations.
//!
//! Everything that ends up inside signed bytes lives in this crate: the
//! RFC 8785 canonicalizer, the content hasher, the identifiers and
//! the `AI_APPROVAL` payload itself. Signing and key handling live in
//! `tekimax-identity`.
//!
//! Core invariants:
//! - A payload is signed exactly as produced by [`Canonicalizer`]; verification
//!   always uses those bytes, never a re-serialization.
//! - Content hashes are lowercase hex SHA-256 over the UTF-8 bytes of the content.
//!
#![deny(missing_docs)]

/// Signed approval payload.
pub mod approval;
/// Canonicalization helpers for deterministic signing input.
pub mod canonicalizer;
/// Content hashing primitives.
pub mod digest;
/// Identifiers and newtypes that appear in signed payloads.
pub mod identifiers;
/// Validation helpers used by canonical types.
pub mod validation;

pub use approval::{CanonicalApproval, PayloadError, APPROVAL_TYPE};
pub use canonicalizer::{CanonicalizationError, Canonicalizer};
pub use digest::{hash_bytes, hash_content, ContentHash};
pub use identifiers::{EntityId, EntityType, TimestampMillis, MAX_ENTITY_ID_LEN};
pub use validation::ValidationError;
