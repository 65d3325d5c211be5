// common.rs

use crate::{types::StorageError, TallyValue};

/// The fixed key label a tally's count is stored under.
pub(crate) const COUNT_KEY: &str = "COUNT";

/// Composes the storage key for a tally's count.
pub(crate) fn count_key(base_key: &str) -> String {
	format!("{}:{}", base_key, COUNT_KEY)
}

/// Decodes a count persisted as a decimal string.
pub(crate) fn decode_count<V: TallyValue>(bytes: &[u8]) -> Result<V, StorageError> {
	let raw = std::str::from_utf8(bytes).map_err(|_| StorageError::Parsing)?;
	raw.parse::<V>().map_err(|_| StorageError::Parsing)
}
