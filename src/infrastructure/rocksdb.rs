use crate::domain::ports::KeyValueStore;
use crate::error::{MarketError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the locally persisted collections.
pub const CF_LOCAL: &str = "local";

/// A persistent key-value store backed by RocksDB.
///
/// Every namespaced collection lives under its own key in the `local`
/// Column Family. `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_local = ColumnFamilyDescriptor::new(CF_LOCAL, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_local])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> MarketError {
        MarketError::InternalError(Box::new(std::io::Error::other(
            "Local column family not found",
        )))
    }
}

#[async_trait]
impl KeyValueStore for RocksDbStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cf = self.db.cf_handle(CF_LOCAL).ok_or_else(Self::missing_cf)?;

        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                MarketError::InternalError(Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Stored value is not UTF-8: {}", e),
                )))
            }),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let cf = self.db.cf_handle(CF_LOCAL).ok_or_else(Self::missing_cf)?;
        self.db.put_cf(&cf, key.as_bytes(), value.as_bytes())?;
        Ok(())
    }
}
