use std::sync::Arc;

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded};
use tracing::{debug, error};

use crate::{
	types::StorageError,
	vault::common::{count_key, decode_count},
	Config, TallyId, TallyVaultHandler,
};

/// RocksDB implementation of the vault.
///
/// Counts survive process restarts. Each `save_count` is one atomic key write.
pub struct RocksDbVault {
	db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksDbVault {
	/// Creates a new `RocksDbVault` with the provided database instance.
	pub fn with_db(db: Arc<DBWithThreadMode<MultiThreaded>>) -> Self {
		Self { db }
	}

	/// Opens (or creates) the database at `path`.
	pub fn open(path: &str) -> Result<Self, StorageError> {
		let db = DBWithThreadMode::<MultiThreaded>::open_default(path)
			.map_err(StorageError::RocksDb)?;
		Ok(Self { db: Arc::new(db) })
	}

	/// Creates a new `RocksDbVault` with default configuration.
	pub fn open_default() -> Result<Self, StorageError> {
		let path = std::env::var("ROCKSDB_PATH").unwrap_or_else(|_| "rocksdb_data".to_string());
		Self::open(&path)
	}
}

#[async_trait]
impl<T: Config> TallyVaultHandler<T> for RocksDbVault {
	type Error = StorageError;

	fn new() -> Self {
		Self::open_default().expect("Failed to open RocksDB vault")
	}

	async fn get_count<TID: TallyId>(
		&self,
		tally_id: &TID,
	) -> Result<Option<T::Value>, Self::Error> {
		let key = count_key(&tally_id.base_key());
		match self.db.get(key.as_bytes()) {
			Ok(Some(value)) => decode_count(&value).map(Some),
			Ok(None) => Ok(None),
			Err(e) => {
				error!("Failed to get count from {} key: {}", key, e);
				Err(StorageError::RocksDb(e))
			},
		}
	}

	async fn save_count<TID: TallyId>(
		&self,
		tally_id: &TID,
		count: T::Value,
	) -> Result<(), Self::Error> {
		let key = count_key(&tally_id.base_key());
		self.db.put(key.as_bytes(), count.to_string()).map_err(|e| {
			error!("Failed to save count to {} key: {}", key, e);
			StorageError::RocksDb(e)
		})?;

		debug!("Saved count to {} key", key);

		Ok(())
	}
}
