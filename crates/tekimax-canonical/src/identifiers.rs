use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $check:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a value, applying its bounds.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                let check: fn(&str) -> Result<(), ValidationError> = $check;
                check(&s)?;
                Ok(Self(s))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Maximum size of an entity identifier in bytes.
pub const MAX_ENTITY_ID_LEN: usize = 1024;

newtype!(
    EntityType,
    "Kind of record being approved, e.g. `goal` or `businessModelCanvas`.\n\nAny string is accepted.",
    |_| Ok(())
);
newtype!(
    EntityId,
    "Identifier of the specific record being approved.\n\nCallers pass database ids as well as free text (an objective title,\na competitor name), possibly empty, so only length is bounded.",
    |value| {
        if value.len() > MAX_ENTITY_ID_LEN {
            return Err(ValidationError::OutOfBounds {
                field: "entityId",
                len: value.len(),
                max: MAX_ENTITY_ID_LEN,
            });
        }
        Ok(())
    }
);

/// Signing-time instant in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampMillis(pub u64);

impl TimestampMillis {
    /// Current wall-clock time.
    pub fn now() -> Self {
        // Clocks set before 1970 clamp to zero.
        Self(u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0))
    }

    /// Milliseconds since the epoch.
    pub fn as_millis(self) -> u64 {
        self.0
    }
}
