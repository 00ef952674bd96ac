use std::path::PathBuf;

use crate::errors::StoreError;

/// Environment variable that overrides the identity directory.
pub const HOME_ENV: &str = "TEKIMAX_HOME";

/// Where the local identity lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Directory holding one file per storage slot.
    pub store_dir: PathBuf,
}

impl IdentityConfig {
    /// Uses an explicit directory.
    pub fn with_store_dir(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
        }
    }

    /// `$TEKIMAX_HOME` if set, else `~/.tekimax/identity`.
    pub fn from_env() -> Result<Self, StoreError> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_store_dir(dir));
        }
        Ok(Self::with_store_dir(home_dir()?.join(".tekimax").join("identity")))
    }
}

fn home_dir() -> Result<PathBuf, StoreError> {
    let home = if cfg!(windows) {
        std::env::var("USERPROFILE").or_else(|_| std::env::var("HOME"))
    } else {
        std::env::var("HOME")
    };
    home.map(PathBuf::from)
        .map_err(|_| StoreError::Unavailable("cannot determine home directory".into()))
}
