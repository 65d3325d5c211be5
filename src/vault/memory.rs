use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
	types::StorageError,
	vault::common::{count_key, decode_count},
	Config, TallyId, TallyVaultHandler,
};

/// In-memory implementation of the vault.
///
/// Keeps every count in a process-local map with the same decimal string encoding as the durable
/// backends, so it can stand in for them in tests and in builds without a durable store. State
/// does not survive a restart.
pub struct InMemoryVault {
	cells: RwLock<HashMap<String, String>>,
}

impl InMemoryVault {
	pub fn new() -> Self {
		Self { cells: RwLock::new(HashMap::new()) }
	}
}

impl Default for InMemoryVault {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl<T: Config> TallyVaultHandler<T> for InMemoryVault {
	type Error = StorageError;

	fn new() -> Self {
		InMemoryVault::new()
	}

	async fn get_count<TID: TallyId>(
		&self,
		tally_id: &TID,
	) -> Result<Option<T::Value>, Self::Error> {
		let cells = self.cells.read().await;
		match cells.get(&count_key(&tally_id.base_key())) {
			Some(raw) => decode_count(raw.as_bytes()).map(Some),
			None => Ok(None),
		}
	}

	async fn save_count<TID: TallyId>(
		&self,
		tally_id: &TID,
		count: T::Value,
	) -> Result<(), Self::Error> {
		self.cells.write().await.insert(count_key(&tally_id.base_key()), count.to_string());
		Ok(())
	}
}
