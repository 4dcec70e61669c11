//! Durable cart persistence.
//!
//! The cart survives between sessions as a single JSON document holding
//! the serialized entry array, read once when the store opens and
//! overwritten after every successful mutation. Writes are synchronous:
//! a mutation is not reported successful until the document is on disk.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use rocket_shoes_core::CartItem;

/// Errors that can occur reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored document is not a valid cart.
    #[error("stored cart is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Boundary responsible for durable storage of cart state.
pub trait CartStorage {
    /// Load the persisted cart.
    ///
    /// Returns `None` when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or
    /// decoded.
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError>;

    /// Overwrite the persisted cart with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError>;
}

// =============================================================================
// JsonFileStorage
// =============================================================================

/// File-backed cart storage.
///
/// One JSON file per cart. Saves write to a sibling temp file and rename
/// into place, so a crash mid-write never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the persisted document.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory cart storage for tests.
///
/// Round-trips entries through their JSON form so serialization behaves
/// exactly like the file-backed storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-seeded with `items`, as if a previous session
    /// had persisted them.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be serialized.
    pub fn seeded(items: &[CartItem]) -> Result<Self, StorageError> {
        let storage = Self::new();
        storage.save(items)?;
        Ok(storage)
    }

    /// The raw persisted document, if any.
    #[must_use]
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StorageError::Decode)
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let json = serde_json::to_string(items)?;
        *self
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use rocket_shoes_core::{Price, Product, ProductId};

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem::new(
            Product {
                id: ProductId::new(id),
                title: format!("Shoe {id}"),
                price: Price::new("99.9".parse().unwrap()),
                image: format!("https://cdn.rocketshoes.dev/images/shoes-{id}.jpg"),
            },
            amount,
        )
    }

    #[test]
    fn test_file_storage_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_reports_document_path() {
        let path = std::path::Path::new("/var/lib/rocket-shoes/cart.json");
        let storage = JsonFileStorage::new(path);
        assert_eq!(storage.path(), path);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        let items = vec![item(1, 2), item(5, 1)];
        storage.save(&items).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_file_storage_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.save(&[item(1, 2)]).unwrap();
        storage.save(&[item(5, 1)]).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, vec![item(5, 1)]);
    }

    #[test]
    fn test_file_storage_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.save(&[item(1, 1)]).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("cart.json")]);
    }

    #[test]
    fn test_file_storage_corrupt_document_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json").unwrap();

        let storage = JsonFileStorage::new(path);
        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::Decode(_)));
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::seeded(&[item(3, 4)]).unwrap();
        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded, vec![item(3, 4)]);
    }
}
