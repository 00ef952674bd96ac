//! Persistent key-value slots holding the local identity.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::IdentityConfig;
use crate::errors::StoreError;

/// The two slots an identity occupies.
///
/// Names carry a version suffix so an incompatible format can move to new
/// slots without reading old data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageSlot {
    /// Base64 public key.
    PublicKey,
    /// JWK private key.
    PrivateKey,
}

impl StorageSlot {
    /// Both slots.
    pub const ALL: [StorageSlot; 2] = [StorageSlot::PublicKey, StorageSlot::PrivateKey];

    /// Fixed storage name of this slot.
    pub fn name(self) -> &'static str {
        match self {
            StorageSlot::PublicKey => "tekimax_public_key_v1",
            StorageSlot::PrivateKey => "tekimax_private_key_v1",
        }
    }
}

/// Device-local storage for identity slots.
pub trait IdentityStore: Send + Sync {
    /// Reads a slot; `None` if it was never written.
    fn get(&self, slot: StorageSlot) -> Result<Option<String>, StoreError>;
    /// Overwrites a slot.
    fn put(&self, slot: StorageSlot, value: &str) -> Result<(), StoreError>;
    /// Clears a slot. Removing an absent slot is not an error.
    fn remove(&self, slot: StorageSlot) -> Result<(), StoreError>;
}

impl<S: IdentityStore + ?Sized> IdentityStore for Arc<S> {
    fn get(&self, slot: StorageSlot) -> Result<Option<String>, StoreError> {
        (**self).get(slot)
    }

    fn put(&self, slot: StorageSlot, value: &str) -> Result<(), StoreError> {
        (**self).put(slot, value)
    }

    fn remove(&self, slot: StorageSlot) -> Result<(), StoreError> {
        (**self).remove(slot)
    }
}

/// In-process store; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<StorageSlot, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for MemoryStore {
    fn get(&self, slot: StorageSlot) -> Result<Option<String>, StoreError> {
        Ok(self.slots.lock().get(&slot).cloned())
    }

    fn put(&self, slot: StorageSlot, value: &str) -> Result<(), StoreError> {
        self.slots.lock().insert(slot, value.to_string());
        Ok(())
    }

    fn remove(&self, slot: StorageSlot) -> Result<(), StoreError> {
        self.slots.lock().remove(&slot);
        Ok(())
    }
}

/// Directory-backed store with one file per slot.
///
/// Each write lands in a temporary sibling first and is renamed into place,
/// so a slot is either the old value or the new one, never a torn write.
/// On unix the directory is created `0700` and slot files are `0600`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store at the configured directory, creating it if needed.
    pub fn open(config: &IdentityConfig) -> Result<Self, StoreError> {
        Self::open_at(config.store_dir.clone())
    }

    /// Opens the store at a specific directory.
    ///
    /// Directories created here are owner-only; an existing directory keeps
    /// its mode.
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a slot's file.
    pub fn slot_path(&self, slot: StorageSlot) -> PathBuf {
        self.dir.join(slot.name())
    }
}

impl IdentityStore for FileStore {
    fn get(&self, slot: StorageSlot) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            // Unreadable bytes are surfaced as a value the key import will reject.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(Some(String::new())),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, slot: StorageSlot, value: &str) -> Result<(), StoreError> {
        let target = self.slot_path(slot);
        let staging = self.dir.join(format!(".{}.tmp", slot.name()));
        let mut file = owner_only_file(&staging)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn remove(&self, slot: StorageSlot) -> Result<(), StoreError> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Opens `path` for writing, truncated, readable by the owner only.
fn owner_only_file(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let file = options.open(path)?;
        // A leftover staging file keeps its old mode, so tighten it explicitly.
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        Ok(file)
    }
    #[cfg(not(unix))]
    {
        options.open(path)
    }
}
