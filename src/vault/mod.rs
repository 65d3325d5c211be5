use std::fmt::{Debug, Display};

use async_trait::async_trait;

use crate::{types::KeeperError, Config, TallyId};

pub(crate) mod common;
pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;

/// A storage handler trait designed for persisting one count per tally.
///
/// # Usage
///
/// Implementations of `TallyVaultHandler` should provide the storage and retrieval mechanisms
/// tailored to specific use-cases or storage backends, such as databases, file systems, or
/// in-memory stores. Each tally owns exactly one key in the backend; no two tallies ever address
/// the same key, and nothing outside the vault sees the key at all.
///
/// Every `save_count` must be a single atomic key write: a fault mid-operation leaves the backend
/// holding either the pre-operation or the post-operation value, never a torn one.
#[async_trait]
pub trait TallyVaultHandler<T: Config>: Send + Sync {
	/// Defines the error type returned by the handler methods.
	type Error: Debug + Display + Into<KeeperError> + Send;

	fn new() -> Self;

	/// Retrieves the persisted count for `tally_id`.
	///
	/// Returns `None` if the tally has never been written. The caller owns the mapping of `None`
	/// to zero, so the backend keeps the distinction between "never written" and "written as
	/// zero" even though the public contract erases it.
	async fn get_count<TID: TallyId>(&self, tally_id: &TID)
		-> Result<Option<T::Value>, Self::Error>;

	/// Persists `count` as the tally's authoritative value.
	async fn save_count<TID: TallyId>(
		&self,
		tally_id: &TID,
		count: T::Value,
	) -> Result<(), Self::Error>;
}
