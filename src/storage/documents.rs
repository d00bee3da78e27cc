//! Per-user document store
//!
//! A minimal document database interface: JSON documents addressed by
//! user, collection and key, with change events broadcast to subscribers.
//! [`FsDocumentStore`] keeps documents on disk under
//! `<root>/users/<user>/<collection>/<key>.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use serde_json::Value;
use tracing::warn;

use super::file_io::{read_json, remove_file_if_exists, write_json_atomic};
use super::notify::ChangeNotifier;
use crate::error::{BudgetError, BudgetResult};
use crate::models::ids::is_safe_identifier;
use crate::models::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChangeKind {
    Put,
    Delete,
}

/// A single document write, as seen by subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    pub user: UserId,
    pub collection: String,
    pub key: String,
    pub kind: DocumentChangeKind,
}

pub trait DocumentStore: Send + Sync {
    fn get(&self, user: &UserId, collection: &str, key: &str) -> BudgetResult<Option<Value>>;

    /// Create or replace a document
    fn put(&self, user: &UserId, collection: &str, key: &str, document: &Value) -> BudgetResult<()>;

    /// Returns whether a document was removed
    fn delete(&self, user: &UserId, collection: &str, key: &str) -> BudgetResult<bool>;

    /// Every readable document in a collection, ordered by key
    fn list(&self, user: &UserId, collection: &str) -> BudgetResult<Vec<(String, Value)>>;

    /// Receive every change made through this store, for all users
    fn subscribe(&self) -> Receiver<DocumentChange>;
}

/// Document store backed by a directory tree
pub struct FsDocumentStore {
    root: PathBuf,
    notifier: ChangeNotifier<DocumentChange>,
}

impl FsDocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, user: &UserId, collection: &str) -> BudgetResult<PathBuf> {
        Ok(self
            .root
            .join("users")
            .join(checked_segment(user.as_str())?)
            .join(checked_segment(collection)?))
    }

    fn document_path(&self, user: &UserId, collection: &str, key: &str) -> BudgetResult<PathBuf> {
        Ok(self
            .collection_dir(user, collection)?
            .join(format!("{}.json", checked_segment(key)?)))
    }

    fn notify(&self, user: &UserId, collection: &str, key: &str, kind: DocumentChangeKind) {
        self.notifier.notify(DocumentChange {
            user: user.clone(),
            collection: collection.to_string(),
            key: key.to_string(),
            kind,
        });
    }
}

/// Path segments may not escape their parent directory
fn checked_segment(segment: &str) -> BudgetResult<&str> {
    if is_safe_identifier(segment) {
        Ok(segment)
    } else {
        Err(BudgetError::Storage(format!(
            "Invalid document path segment: {:?}",
            segment
        )))
    }
}

impl DocumentStore for FsDocumentStore {
    fn get(&self, user: &UserId, collection: &str, key: &str) -> BudgetResult<Option<Value>> {
        read_json(self.document_path(user, collection, key)?)
    }

    fn put(&self, user: &UserId, collection: &str, key: &str, document: &Value) -> BudgetResult<()> {
        write_json_atomic(self.document_path(user, collection, key)?, document)?;
        self.notify(user, collection, key, DocumentChangeKind::Put);
        Ok(())
    }

    fn delete(&self, user: &UserId, collection: &str, key: &str) -> BudgetResult<bool> {
        let removed = remove_file_if_exists(self.document_path(user, collection, key)?)?;
        if removed {
            self.notify(user, collection, key, DocumentChangeKind::Delete);
        }
        Ok(removed)
    }

    fn list(&self, user: &UserId, collection: &str) -> BudgetResult<Vec<(String, Value)>> {
        let dir = self.collection_dir(user, collection)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BudgetError::Storage(format!(
                    "Failed to list {}: {}",
                    dir.display(),
                    e
                )))
            }
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            match read_json::<Value, _>(&path) {
                Ok(Some(doc)) => documents.push((key, doc)),
                Ok(None) => {}
                Err(e) => warn!(collection, key = %key, error = %e, "skipping unreadable document"),
            }
        }

        documents.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(documents)
    }

    fn subscribe(&self) -> Receiver<DocumentChange> {
        self.notifier.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_store() -> (FsDocumentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        (FsDocumentStore::new(temp_dir.path().join("cloud")), temp_dir)
    }

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    #[test]
    fn test_put_get_delete() {
        let (store, _temp) = create_store();
        let alice = user("alice");

        store.put(&alice, "settings", "budget", &json!({"starting_balance": 100})).unwrap();
        assert_eq!(
            store.get(&alice, "settings", "budget").unwrap(),
            Some(json!({"starting_balance": 100}))
        );
        assert!(store
            .root()
            .join("users/alice/settings/budget.json")
            .exists());

        assert!(store.delete(&alice, "settings", "budget").unwrap());
        assert!(!store.delete(&alice, "settings", "budget").unwrap());
        assert_eq!(store.get(&alice, "settings", "budget").unwrap(), None);
    }

    #[test]
    fn test_users_are_isolated() {
        let (store, _temp) = create_store();
        store.put(&user("alice"), "transactions", "a", &json!(1)).unwrap();

        assert!(store.list(&user("bob"), "transactions").unwrap().is_empty());
        assert_eq!(store.list(&user("alice"), "transactions").unwrap().len(), 1);
    }

    #[test]
    fn test_list_sorted_and_skips_garbage() {
        let (store, _temp) = create_store();
        let alice = user("alice");
        store.put(&alice, "transactions", "b", &json!(2)).unwrap();
        store.put(&alice, "transactions", "a", &json!(1)).unwrap();

        let dir = store.root().join("users/alice/transactions");
        fs::write(dir.join("c.json"), "{ nope").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let keys: Vec<_> = store
            .list(&alice, "transactions")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_rejects_path_traversal() {
        let (store, _temp) = create_store();
        // Deserialized ids skip `UserId::new`, so the store checks again
        let sneaky: UserId = serde_json::from_value(json!("../bob")).unwrap();

        assert!(store.get(&sneaky, "settings", "budget").is_err());
        assert!(store.put(&user("alice"), "settings", "../x", &json!(1)).is_err());
    }

    #[test]
    fn test_changes_are_broadcast() {
        let (store, _temp) = create_store();
        let rx = store.subscribe();
        let alice = user("alice");

        store.put(&alice, "transactions", "k1", &json!({})).unwrap();
        store.delete(&alice, "transactions", "k1").unwrap();
        store.delete(&alice, "transactions", "k1").unwrap();

        let kinds: Vec<_> = rx.try_iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![DocumentChangeKind::Put, DocumentChangeKind::Delete]);
    }
}
