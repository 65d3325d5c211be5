use num_traits::{FromPrimitive, One, Zero};
use serde_json::Value;

use crate::TallyValue;

/// Errors surfaced by [`Keeper`](crate::Keeper) operations.
///
/// The keeper never swallows a persistence fault and never substitutes a best-guess count after
/// one: a failed vault read or write propagates here unchanged.
#[derive(Debug, thiserror::Error)]
pub enum KeeperError {
	/// The vault failed to read or write a count.
	#[error("storage error: {0}")]
	Storage(#[from] StorageError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
	#[cfg(feature = "rocksdb")]
	#[error("RocksDB error: {0}")]
	RocksDb(rocksdb::Error),
	#[error("parsing error")]
	Parsing,
	#[error("storage backend unavailable: {0}")]
	Unavailable(String),
}

/// The signed amount an increment or decrement operation applies to a tally.
///
/// `Delta` is the typed product of decoding an untrusted request payload. The decode is
/// deliberately tolerant: malformed input never aborts an operation, it falls back to a defined
/// amount instead. A delta carrying no amount resolves to the default step of one, so an
/// increment with an empty payload behaves exactly like `increment(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta<V>(Option<V>);

impl<V> Default for Delta<V> {
	fn default() -> Self {
		Self(None)
	}
}

impl<V: TallyValue> Delta<V> {
	/// A delta carrying an explicit amount.
	///
	/// Zero and negative amounts are permitted: an increment by a negative amount behaves as a
	/// decrement, and vice versa.
	pub fn of(amount: V) -> Self {
		Self(Some(amount))
	}

	/// Decodes a delta from an untrusted request body.
	///
	/// An empty or malformed body carries no amount at all and resolves to the default step. A
	/// body that parses as JSON is inspected for an integral `amount` member; a missing,
	/// non-numeric, or non-integral `amount` (and any non-object payload) decodes to zero.
	pub fn from_json_bytes(body: &[u8]) -> Self {
		if body.is_empty() {
			return Self(None);
		}

		match serde_json::from_slice::<Value>(body) {
			Ok(payload) => Self(Some(
				payload
					.get("amount")
					.and_then(Value::as_i64)
					.and_then(V::from_i64)
					.unwrap_or_else(V::zero),
			)),
			Err(_) => Self(None),
		}
	}

	/// The amount to apply, falling back to the default step of one.
	pub fn amount_or_step(self) -> V {
		self.0.unwrap_or_else(V::one)
	}
}

impl<V: TallyValue> From<V> for Delta<V> {
	fn from(amount: V) -> Self {
		Self::of(amount)
	}
}
