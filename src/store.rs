//! Boundary to the external document store.

use crate::record::OrderRecord;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store rejected the write: {0}")]
    Rejected(String),

    #[error("Order '{0}' not found")]
    NotFound(String),
}

/// Opaque identifier handed back by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All-or-nothing per call: on `Err` nothing was stored.
pub trait OrderStore {
    fn insert(&self, record: &OrderRecord) -> Result<OrderId, StoreError>;
}

/// One pretty-printed JSON document per order in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    pub fn get(&self, id: &OrderId) -> Result<OrderRecord, StoreError> {
        let path = self.path_for(&id.0);
        if !path.exists() {
            return Err(StoreError::NotFound(id.0.clone()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl OrderStore for JsonDirStore {
    fn insert(&self, record: &OrderRecord) -> Result<OrderId, StoreError> {
        let id = Uuid::new_v4().to_string();
        let json = serde_json::to_vec_pretty(record)?;

        // A record file is either complete or absent.
        let tmp = self.root.join(format!(".{}.json.tmp", id));
        if let Err(e) = fs::write(&tmp, &json) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, self.path_for(&id)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!("Wrote order {} to {}", id, self.root.display());
        Ok(OrderId(id))
    }
}
