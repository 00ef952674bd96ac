use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fmt;

use crate::validation::ValidationError;

/// Lowercase hex SHA-256 digest of some content (always 64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Parses a digest, accepting only 64 lowercase hex characters.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let re = Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex");
        if !re.is_match(&value) {
            return Err(ValidationError::PatternMismatch {
                field: "contentHash",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Hex representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if hashing `content` yields this digest.
    pub fn matches(&self, content: &str) -> bool {
        hash_content(content) == *self
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContentHash> for String {
    fn from(value: ContentHash) -> Self {
        value.0
    }
}

/// Hashes the UTF-8 bytes of `content`.
///
/// The empty string is valid input and yields the well-known
/// `e3b0c442...b855` digest.
pub fn hash_content(content: &str) -> ContentHash {
    hash_bytes(content.as_bytes())
}

/// Hashes raw bytes.
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    ContentHash(hex::encode(Sha256::digest(bytes)))
}
