use crate::domain::ports::AuthResponseStore;
use crate::domain::transaction::AuthTransactionResponse;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};
use std::path::Path;
use std::sync::{Arc, Mutex};

type Db = DBWithThreadMode<MultiThreaded>;

/// A persistent transaction store backed by RocksDB.
///
/// The configured bucket maps to a column family, created on the first write.
/// Reads against a bucket that was never written report `NotFound`, the same
/// as a missing key. RocksDB applies each `put` atomically, so a reader never
/// sees a partially written record.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbAuthResponseStore {
    db: Arc<Db>,
    bucket: String,
    create_lock: Arc<Mutex<()>>,
}

impl RocksDbAuthResponseStore {
    /// Opens or creates a RocksDB instance at `path`, reopening every column
    /// family already present so earlier buckets stay readable.
    pub fn open<P: AsRef<Path>>(path: P, bucket: impl Into<String>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // Only a database that does not exist yet has no CF list.
        let existing = if path.as_ref().join("CURRENT").exists() {
            Db::list_cf(&opts, path.as_ref())?
        } else {
            Vec::new()
        };
        let descriptors = existing
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));

        let db = Db::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            bucket: bucket.into(),
            create_lock: Arc::default(),
        })
    }

    fn bucket_or_create(&self) -> Result<Arc<BoundColumnFamily<'_>>> {
        if let Some(cf) = self.db.cf_handle(&self.bucket) {
            return Ok(cf);
        }

        let _guard = self
            .create_lock
            .lock()
            .map_err(|_| StoreError::Backend("bucket creation lock poisoned".to_string()))?;
        if self.db.cf_handle(&self.bucket).is_none() {
            self.db.create_cf(&self.bucket, &Options::default())?;
        }

        self.db.cf_handle(&self.bucket).ok_or_else(|| {
            StoreError::Backend(format!("bucket {} missing after creation", self.bucket))
        })
    }
}

#[async_trait]
impl AuthResponseStore for RocksDbAuthResponseStore {
    async fn put(&self, tran_id: &str, rsp: &AuthTransactionResponse) -> Result<()> {
        let value = serde_json::to_vec(rsp)?;
        let cf = self.bucket_or_create()?;

        self.db.put_cf(&cf, tran_id.as_bytes(), value)?;

        Ok(())
    }

    async fn get(&self, tran_id: &str) -> Result<AuthTransactionResponse> {
        let Some(cf) = self.db.cf_handle(&self.bucket) else {
            return Err(StoreError::NotFound);
        };

        let bytes = self
            .db
            .get_pinned_cf(&cf, tran_id.as_bytes())?
            .ok_or(StoreError::NotFound)?;

        serde_json::from_slice(&bytes).map_err(|_| StoreError::NotFound)
    }
}
