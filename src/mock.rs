use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{types::StorageError, Config, InMemoryVault, TallyId, TallyVaultHandler};

#[derive(Debug, Clone)]
pub struct TestTallyId(pub &'static str);

impl TallyId for TestTallyId {
	fn base_key(&self) -> String {
		self.0.to_string()
	}
}

/// Config used across the core tests: 64-bit counts held in memory.
#[derive(Debug)]
pub struct TestApp;

impl Config for TestApp {
	type Value = i64;
	type Vault = InMemoryVault;
}

/// A vault whose every operation fails, for fault-propagation tests.
pub struct FailingVault;

#[async_trait]
impl<T: Config> TallyVaultHandler<T> for FailingVault {
	type Error = StorageError;

	fn new() -> Self {
		Self
	}

	async fn get_count<TID: TallyId>(
		&self,
		_tally_id: &TID,
	) -> Result<Option<T::Value>, Self::Error> {
		Err(StorageError::Unavailable("vault offline".to_string()))
	}

	async fn save_count<TID: TallyId>(
		&self,
		_tally_id: &TID,
		_count: T::Value,
	) -> Result<(), Self::Error> {
		Err(StorageError::Unavailable("vault offline".to_string()))
	}
}

#[derive(Debug)]
pub struct FailingApp;

impl Config for FailingApp {
	type Value = i64;
	type Vault = FailingVault;
}

/// A vault that counts committed writes, for observing write-through behavior.
pub struct RecordingVault {
	inner: InMemoryVault,
	pub saves: AtomicUsize,
}

#[async_trait]
impl<T: Config> TallyVaultHandler<T> for RecordingVault {
	type Error = StorageError;

	fn new() -> Self {
		Self { inner: InMemoryVault::new(), saves: AtomicUsize::new(0) }
	}

	async fn get_count<TID: TallyId>(
		&self,
		tally_id: &TID,
	) -> Result<Option<T::Value>, Self::Error> {
		TallyVaultHandler::<T>::get_count(&self.inner, tally_id).await
	}

	async fn save_count<TID: TallyId>(
		&self,
		tally_id: &TID,
		count: T::Value,
	) -> Result<(), Self::Error> {
		self.saves.fetch_add(1, Ordering::SeqCst);
		TallyVaultHandler::<T>::save_count(&self.inner, tally_id, count).await
	}
}

#[derive(Debug)]
pub struct RecordingApp;

impl Config for RecordingApp {
	type Value = i64;
	type Vault = RecordingVault;
}
