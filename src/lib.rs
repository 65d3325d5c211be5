//! Durable named counters, one independently persisted tally per caller-chosen name.
//!
//! An HTTP entry point (the [`service`] module) routes each request to one of many counter
//! instances, selected by a caller-supplied name. Every instance supports read, increment, and
//! decrement of a single signed integer value, with the value persisted across requests and across
//! process restarts.
//!
//! Central to the crate is the [`Keeper`], which drives every tally operation. The
//! [`TallyVaultHandler`] defines the interface for persisting and retrieving counts from a storage
//! backend; out of the box the crate ships [`InMemoryVault`] and, behind the `rocksdb` feature, a
//! RocksDB-backed vault. Operations against the same name are serialized through a per-name slot
//! inside the [`Keeper`], so the read-modify-write each mutation performs can never lose an update
//! and never observes a stale count, while operations against distinct names proceed concurrently
//! with no coordination.
//!
//! Effective utilization of the crate necessitates the implementation of the [`Config`] trait,
//! which wires the numeric representation of a count and the vault backend together.
//!
//! Should there be a need to integrate a distinct storage backend, you have the flexibility to
//! create a custom handler by implementing the [`TallyVaultHandler`] trait and injecting it into
//! the [`Config::Vault`] associated type.
//!
//! # Example
//!
//! ```ignore
//! use tally_keeper::{Config, Delta, InMemoryVault, Keeper, TallyName};
//!
//! #[derive(Debug)]
//! struct PageViews;
//!
//! impl Config for PageViews {
//!     type Value = i64;
//!     type Vault = InMemoryVault;
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let keeper = Keeper::<PageViews>::new();
//!     let page = TallyName::new("landing");
//!
//!     // First access of a name reads as zero.
//!     assert_eq!(keeper.get(page.clone()).await.unwrap(), 0);
//!
//!     // Mutations return the committed running total.
//!     assert_eq!(keeper.increment(page.clone(), Delta::of(5)).await.unwrap(), 5);
//!     assert_eq!(keeper.decrement(page, Delta::default()).await.unwrap(), 4);
//! }
//! ```

use std::{
	fmt::{Debug, Display},
	str::FromStr,
};

use num_traits::{FromPrimitive, PrimInt, SaturatingAdd, SaturatingSub, Signed};

pub mod architecture;
pub mod keeper;
pub mod service;
pub mod types;
pub mod vault;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use keeper::Keeper;
pub use types::{Delta, KeeperError, StorageError};
#[cfg(feature = "rocksdb")]
pub use vault::rocksdb::RocksDbVault;
pub use vault::{memory::InMemoryVault, TallyVaultHandler};

/// Represents a unique identifier for one tally.
///
/// The `TallyId` trait abstractly represents tally identities, providing a method for generating a
/// standardized key under which the tally's count is stored by a [`TallyVaultHandler`]. Names are
/// opaque to the crate: no validation, normalization, or length constraint is imposed.
pub trait TallyId: Debug + Clone + Send + Sync + 'static {
	/// Returns the base key.
	///
	/// This method should produce a unique string identifier that will serve as the storage key
	/// prefix for the tally's persisted count.
	fn base_key(&self) -> String;
}

/// Stock [`TallyId`] over a plain string name taken verbatim from the caller.
///
/// This is the identity the HTTP dispatcher constructs from the `name` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TallyName(String);

impl TallyName {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl TallyId for TallyName {
	fn base_key(&self) -> String {
		self.0.clone()
	}
}

/// The numeric representation of a tally's count.
///
/// Counts are fixed-width signed integers; arithmetic at the representation limits saturates
/// rather than wrapping. The `FromStr`/`Display` bounds give every backend a common decimal string
/// encoding, and `FromPrimitive` admits amounts decoded from untrusted JSON payloads.
pub trait TallyValue:
	PrimInt
	+ Signed
	+ SaturatingAdd
	+ SaturatingSub
	+ FromPrimitive
	+ FromStr
	+ Display
	+ Debug
	+ Send
	+ Sync
	+ 'static
{
}

impl<V> TallyValue for V where
	V: PrimInt
		+ Signed
		+ SaturatingAdd
		+ SaturatingSub
		+ FromPrimitive
		+ FromStr
		+ Display
		+ Debug
		+ Send
		+ Sync
		+ 'static
{
}

/// A trait consisting of the main configuration parameters for a [`Keeper`].
pub trait Config: Sized + Send + Sync + 'static {
	/// The numeric representation of a count.
	///
	/// The service binary fixes this to `i64`; narrower widths work the same way and saturate
	/// sooner.
	type Value: TallyValue;
	/// Storage backend for persisting counts.
	///
	/// This can simply be a struct that implements [`TallyVaultHandler`], such as the provided
	/// [`InMemoryVault`] or the RocksDB vault behind the `rocksdb` feature. The [`Keeper`] does
	/// not care how you store and retrieve your data.
	type Vault: TallyVaultHandler<Self>;
}
