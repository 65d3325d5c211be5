use std::collections::HashMap;

use async_trait::async_trait;
use tally_keeper::{
	Config, Delta, Keeper, KeeperError, StorageError, TallyId, TallyVaultHandler,
};
use tokio::sync::RwLock;

// Define a simple TallyId
#[derive(Debug, Clone)]
struct RoomId(String);

impl TallyId for RoomId {
	fn base_key(&self) -> String {
		format!("room:{}", self.0)
	}
}

// Define a simple vault
struct ScratchVault {
	cells: RwLock<HashMap<String, i64>>,
}

#[async_trait]
impl TallyVaultHandler<RoomCounter> for ScratchVault {
	type Error = StorageError;

	fn new() -> Self {
		Self { cells: RwLock::new(HashMap::new()) }
	}

	async fn get_count<TID: TallyId>(&self, tally_id: &TID) -> Result<Option<i64>, Self::Error> {
		Ok(self.cells.read().await.get(&tally_id.base_key()).copied())
	}

	async fn save_count<TID: TallyId>(&self, tally_id: &TID, count: i64) -> Result<(), Self::Error> {
		self.cells.write().await.insert(tally_id.base_key(), count);
		Ok(())
	}
}

// Define the configuration
#[derive(Debug)]
struct RoomCounter;

impl Config for RoomCounter {
	type Value = i64;
	type Vault = ScratchVault;
}

#[tokio::main]
async fn main() -> Result<(), KeeperError> {
	// Create a Keeper instance
	let keeper = Keeper::<RoomCounter>::new();

	// Create a TallyId
	let room = RoomId("lobby".to_string());

	// Apply some deltas
	let occupancy = keeper.increment(room.clone(), Delta::of(2)).await?;
	println!("Occupancy after arrivals: {}", occupancy);

	// A delta carrying no amount steps by one
	let occupancy = keeper.decrement(room.clone(), Delta::default()).await?;
	println!("Occupancy after a departure: {}", occupancy);

	println!("Current occupancy: {}", keeper.get(room).await?);

	Ok(())
}
