use std::{collections::HashMap, sync::Arc};

use num_traits::{SaturatingAdd, SaturatingSub, Zero};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument, trace};

use crate::{
	types::{Delta, KeeperError},
	Config, TallyId, TallyVaultHandler,
};

/// The machine that drives every tally operation.
///
/// One `Keeper` serves all tallies. It owns the vault handle and a registry of per-name slots; a
/// slot serializes every operation against its name for the operation's full duration, reads
/// included. That serialization is what makes the read-modify-write in [`Keeper::increment`] and
/// [`Keeper::decrement`] safe without any compare-and-swap or retry at the storage layer.
/// Operations against distinct names never share a slot and proceed independently.
pub struct Keeper<T: Config> {
	pub vault: T::Vault,
	slots: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

enum Adjustment {
	Raise,
	Lower,
}

impl<T: Config> Keeper<T> {
	/// Creates a new instance of `Keeper` with the vault the [`Config`] selects.
	pub fn new() -> Self {
		Self {
			vault: <T::Vault as TallyVaultHandler<T>>::new(),
			slots: RwLock::new(HashMap::new()),
		}
	}

	/// Creates a `Keeper` over an already-constructed vault.
	pub fn with_vault(vault: T::Vault) -> Self {
		Self { vault, slots: RwLock::new(HashMap::new()) }
	}

	/// Reads the current count for `tally_id`.
	///
	/// A name that has never been written reads as zero. The read holds the name's slot, so it
	/// cannot observe the middle of an in-flight read-modify-write.
	#[instrument(skip(self))]
	pub async fn get<TID: TallyId>(&self, tally_id: TID) -> Result<T::Value, KeeperError> {
		let slot = self.slot(&tally_id.base_key()).await;
		let _guard = slot.lock().await;

		let current = self.vault.get_count(&tally_id).await.map_err(Into::into)?;
		Ok(current.unwrap_or_else(T::Value::zero))
	}

	/// Raises the count for `tally_id` by `delta` and returns the committed total.
	///
	/// A delta carrying no amount steps by one. A negative amount is permitted and behaves as a
	/// decrement.
	#[instrument(skip(self))]
	pub async fn increment<TID: TallyId>(
		&self,
		tally_id: TID,
		delta: Delta<T::Value>,
	) -> Result<T::Value, KeeperError> {
		self.adjust(&tally_id, delta, Adjustment::Raise).await
	}

	/// Lowers the count for `tally_id` by `delta` and returns the committed total.
	///
	/// Same permissiveness as [`Keeper::increment`]: no amount steps by one, and a negative
	/// amount behaves as an increment.
	#[instrument(skip(self))]
	pub async fn decrement<TID: TallyId>(
		&self,
		tally_id: TID,
		delta: Delta<T::Value>,
	) -> Result<T::Value, KeeperError> {
		self.adjust(&tally_id, delta, Adjustment::Lower).await
	}

	/// Read current value, apply the step, write the full new value back.
	///
	/// Runs entirely under the name's slot, which holds across both vault suspension points. A
	/// zero step still commits: every operation is a full write of the new value, even when it
	/// equals the old one. Arithmetic saturates at the representation limits.
	async fn adjust<TID: TallyId>(
		&self,
		tally_id: &TID,
		delta: Delta<T::Value>,
		adjustment: Adjustment,
	) -> Result<T::Value, KeeperError> {
		let step = delta.amount_or_step();

		let slot = self.slot(&tally_id.base_key()).await;
		let _guard = slot.lock().await;

		trace!("Fetching current count for ID: {:?}", tally_id);

		let current = self
			.vault
			.get_count(tally_id)
			.await
			.map_err(Into::into)?
			.unwrap_or_else(T::Value::zero);

		let next = match adjustment {
			Adjustment::Raise => current.saturating_add(&step),
			Adjustment::Lower => current.saturating_sub(&step),
		};

		self.vault.save_count(tally_id, next).await.map_err(Into::into)?;

		debug!("Committed count {} for ID: {:?}", next, tally_id);

		Ok(next)
	}

	/// Returns the serialization slot for `base_key`, creating it on first access.
	///
	/// Lookup takes the registry read lock; only the first operation against a new name takes the
	/// write lock to insert its slot.
	async fn slot(&self, base_key: &str) -> Arc<Mutex<()>> {
		if let Some(slot) = self.slots.read().await.get(base_key) {
			return slot.clone();
		}

		let mut slots = self.slots.write().await;
		slots.entry(base_key.to_string()).or_default().clone()
	}
}

impl<T: Config> Default for Keeper<T> {
	fn default() -> Self {
		Self::new()
	}
}
