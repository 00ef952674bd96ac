//! Identity lifecycle against memory and file stores.

use std::sync::Arc;
use std::thread;

use tekimax_identity::{
    FileStore, IdentityConfig, IdentityError, IdentityManager, IdentityOrigin, IdentityStore,
    MemoryStore, PrivateKeyJwk, SigningHandle, StorageSlot, StoreError,
};
use tempfile::TempDir;

#[test]
fn ensure_identity_is_idempotent() {
    let manager = IdentityManager::new(MemoryStore::new());

    let first = manager.ensure_identity().unwrap();
    let second = manager.ensure_identity().unwrap();

    assert_eq!(first.origin, IdentityOrigin::Generated);
    assert_eq!(second.origin, IdentityOrigin::Loaded);
    assert_eq!(first.public_key, second.public_key);
    assert_eq!(
        first.private_key.public_key(),
        second.private_key.public_key()
    );
}

#[test]
fn generated_identity_is_persisted_in_both_slots() {
    let manager = IdentityManager::new(MemoryStore::new());
    let identity = manager.ensure_identity().unwrap();

    let stored_public = manager.store().get(StorageSlot::PublicKey).unwrap().unwrap();
    let stored_private = manager.store().get(StorageSlot::PrivateKey).unwrap().unwrap();

    assert_eq!(stored_public, identity.public_key);
    let restored = PrivateKeyJwk::from_json(&stored_private)
        .unwrap()
        .import()
        .unwrap();
    assert_eq!(restored.public_key().to_base64(), identity.public_key);
}

#[test]
fn corrupt_private_key_rotates_identity() {
    let manager = IdentityManager::new(MemoryStore::new());
    let original = manager.ensure_identity().unwrap();

    manager
        .store()
        .put(StorageSlot::PrivateKey, "{not a jwk")
        .unwrap();

    let healed = manager.ensure_identity().unwrap();
    assert_eq!(healed.origin, IdentityOrigin::Regenerated);
    assert_ne!(healed.public_key, original.public_key);

    // The replacement is what later calls load.
    let again = manager.ensure_identity().unwrap();
    assert_eq!(again.origin, IdentityOrigin::Loaded);
    assert_eq!(again.public_key, healed.public_key);
}

#[test]
fn mismatched_public_key_counts_as_corrupt() {
    let store = MemoryStore::new();
    let other = SigningHandle::from_seed(&[5u8; 32]);
    let mine = SigningHandle::from_seed(&[6u8; 32]);
    store
        .put(StorageSlot::PublicKey, &other.public_key().to_base64())
        .unwrap();
    store
        .put(StorageSlot::PrivateKey, &mine.to_jwk().to_json().unwrap())
        .unwrap();

    let identity = IdentityManager::new(store).ensure_identity().unwrap();
    assert_eq!(identity.origin, IdentityOrigin::Regenerated);
    assert_ne!(identity.public_key, other.public_key().to_base64());
    assert_ne!(identity.public_key, mine.public_key().to_base64());
}

#[test]
fn half_a_keypair_is_replaced() {
    let store = MemoryStore::new();
    store
        .put(StorageSlot::PublicKey, "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=")
        .unwrap();

    let manager = IdentityManager::new(store);
    let identity = manager.ensure_identity().unwrap();
    assert_eq!(identity.origin, IdentityOrigin::Regenerated);
    assert_eq!(
        manager.store().get(StorageSlot::PublicKey).unwrap().unwrap(),
        identity.public_key
    );
    assert!(manager.store().get(StorageSlot::PrivateKey).unwrap().is_some());
}

#[test]
fn imported_browser_style_identity_is_loaded() {
    let handle = SigningHandle::from_seed(&[42u8; 32]);
    let store = MemoryStore::new();
    store
        .put(StorageSlot::PublicKey, &handle.public_key().to_base64())
        .unwrap();
    store
        .put(StorageSlot::PrivateKey, &handle.to_jwk().to_json().unwrap())
        .unwrap();

    let identity = IdentityManager::new(store).ensure_identity().unwrap();
    assert_eq!(identity.origin, IdentityOrigin::Loaded);
    assert_eq!(identity.public_key, handle.public_key().to_base64());
}

#[test]
fn concurrent_callers_share_one_identity() {
    let manager = Arc::new(IdentityManager::new(MemoryStore::new()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.ensure_identity().unwrap().public_key)
        })
        .collect();
    let keys: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(keys.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(manager.public_key().unwrap(), keys[0]);
}

#[test]
fn file_store_survives_new_manager() {
    let temp_dir = TempDir::new().unwrap();
    let config = IdentityConfig::with_store_dir(temp_dir.path().join("identity"));

    let first = IdentityManager::new(FileStore::open(&config).unwrap())
        .ensure_identity()
        .unwrap();
    let second = IdentityManager::new(FileStore::open(&config).unwrap())
        .ensure_identity()
        .unwrap();

    assert_eq!(first.origin, IdentityOrigin::Generated);
    assert_eq!(second.origin, IdentityOrigin::Loaded);
    assert_eq!(first.public_key, second.public_key);
}

#[test]
fn file_store_uses_versioned_slot_names() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_at(temp_dir.path()).unwrap();
    IdentityManager::new(store.clone()).ensure_identity().unwrap();

    assert!(temp_dir.path().join("tekimax_public_key_v1").is_file());
    assert!(temp_dir.path().join("tekimax_private_key_v1").is_file());
    assert!(!temp_dir.path().join(".tekimax_private_key_v1.tmp").exists());
}

#[test]
fn file_store_heals_binary_garbage() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_at(temp_dir.path()).unwrap();
    let manager = IdentityManager::new(store.clone());
    let original = manager.ensure_identity().unwrap();

    std::fs::write(store.slot_path(StorageSlot::PrivateKey), [0xff, 0xfe, 0x00]).unwrap();

    let healed = manager.ensure_identity().unwrap();
    assert_eq!(healed.origin, IdentityOrigin::Regenerated);
    assert_ne!(healed.public_key, original.public_key);
}

#[test]
fn file_store_remove_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_at(temp_dir.path()).unwrap();
    store.put(StorageSlot::PublicKey, "value").unwrap();
    store.remove(StorageSlot::PublicKey).unwrap();
    store.remove(StorageSlot::PublicKey).unwrap();
    assert_eq!(store.get(StorageSlot::PublicKey).unwrap(), None);
}

#[cfg(unix)]
#[test]
fn file_store_keeps_private_key_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join("id");
    let store = FileStore::open_at(&dir).unwrap();
    IdentityManager::new(store.clone()).ensure_identity().unwrap();

    let dir_mode = std::fs::metadata(&dir).unwrap().permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
    for slot in StorageSlot::ALL {
        let mode = std::fs::metadata(store.slot_path(slot))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0, "{} is readable by others", slot.name());
    }
}

#[cfg(unix)]
#[test]
fn file_store_tightens_leftover_staging_file() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_at(temp_dir.path()).unwrap();
    let staging = temp_dir.path().join(".tekimax_private_key_v1.tmp");
    std::fs::write(&staging, "stale").unwrap();
    std::fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o644)).unwrap();

    store.put(StorageSlot::PrivateKey, "{}").unwrap();

    let mode = std::fs::metadata(store.slot_path(StorageSlot::PrivateKey))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.get(StorageSlot::PrivateKey).unwrap().as_deref(), Some("{}"));
}

struct ReadOnlyStore;

impl IdentityStore for ReadOnlyStore {
    fn get(&self, _slot: StorageSlot) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn put(&self, _slot: StorageSlot, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only".into()))
    }

    fn remove(&self, _slot: StorageSlot) -> Result<(), StoreError> {
        Ok(())
    }
}

#[test]
fn store_write_failure_propagates() {
    let result = IdentityManager::new(ReadOnlyStore).ensure_identity();
    assert!(matches!(result, Err(IdentityError::Store(_))));
}
