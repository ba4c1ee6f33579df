use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sled::IVec;

use crate::economy::errors::EconomyError;
use crate::economy::types::{UserRecord, USER_SCHEMA_VERSION};

const TREE_USERS: &str = "gamecoin_users";

/// Point lookup and whole-record save for per-user economy state.
///
/// `get` never fails for an unknown user: it returns a zeroed record that is
/// only persisted once passed to `save`. Saves are full overwrites.
pub trait UserStore {
    fn get(&self, user_id: &str) -> Result<UserRecord, EconomyError>;
    fn save(&self, record: &UserRecord) -> Result<(), EconomyError>;
}

impl<S: UserStore + ?Sized> UserStore for &S {
    fn get(&self, user_id: &str) -> Result<UserRecord, EconomyError> {
        (**self).get(user_id)
    }

    fn save(&self, record: &UserRecord) -> Result<(), EconomyError> {
        (**self).save(record)
    }
}

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct SledUserStoreBuilder {
    path: PathBuf,
    tree: String,
}

impl SledUserStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tree: TREE_USERS.to_string(),
        }
    }

    /// Keep records in a differently named tree (lets several bots share one database).
    pub fn tree(mut self, name: impl Into<String>) -> Self {
        self.tree = name.into();
        self
    }

    pub fn open(self) -> Result<SledUserStore, EconomyError> {
        SledUserStore::open_tree(self.path, &self.tree)
    }
}

/// Sled-backed user records, bincode encoded under `users:<id>` keys.
pub struct SledUserStore {
    _db: sled::Db,
    users: sled::Tree,
}

impl SledUserStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EconomyError> {
        Self::open_tree(path, TREE_USERS)
    }

    fn open_tree<P: AsRef<Path>>(path: P, tree: &str) -> Result<Self, EconomyError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let users = db.open_tree(tree)?;
        log::debug!("user store opened at {:?} (tree {})", path_ref, tree);
        Ok(Self { _db: db, users })
    }

    fn user_key(user_id: &str) -> Vec<u8> {
        format!("users:{}", user_id).into_bytes()
    }

    fn deserialize(bytes: IVec) -> Result<UserRecord, EconomyError> {
        Ok(bincode::deserialize::<UserRecord>(&bytes)?)
    }

    /// List all user ids that have a persisted record.
    pub fn list_user_ids(&self) -> Result<Vec<String>, EconomyError> {
        let mut ids = Vec::new();
        for entry in self.users.scan_prefix(b"users:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(id) = text.strip_prefix("users:") {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}

impl UserStore for SledUserStore {
    fn get(&self, user_id: &str) -> Result<UserRecord, EconomyError> {
        let key = Self::user_key(user_id);
        let Some(bytes) = self.users.get(&key)? else {
            return Ok(UserRecord::new(user_id));
        };
        let record = Self::deserialize(bytes)?;
        if record.schema_version != USER_SCHEMA_VERSION {
            return Err(EconomyError::SchemaMismatch {
                entity: "user",
                expected: USER_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    fn save(&self, record: &UserRecord) -> Result<(), EconomyError> {
        let mut record = record.clone();
        record.schema_version = USER_SCHEMA_VERSION;
        record.touch();
        let bytes = bincode::serialize(&record)?;
        self.users.insert(Self::user_key(&record.user_id), bytes)?;
        self.users.flush()?;
        Ok(())
    }
}

/// In-memory store for tests and dry runs. Counts saves so callers can check
/// how many writes an operation issued.
#[derive(Default)]
pub struct MemoryUserStore {
    records: Mutex<HashMap<String, UserRecord>>,
    saves: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Seed a record directly, bypassing the save counter.
    pub fn insert(&self, record: UserRecord) {
        let mut map = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.insert(record.user_id.clone(), record);
    }
}

impl UserStore for MemoryUserStore {
    fn get(&self, user_id: &str) -> Result<UserRecord, EconomyError> {
        let map = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(map
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserRecord::new(user_id)))
    }

    fn save(&self, record: &UserRecord) -> Result<(), EconomyError> {
        let mut map = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.insert(record.user_id.clone(), record.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
