use std::sync::{atomic::Ordering, Arc};

use futures::future::join_all;

use crate::{
	mock::{FailingApp, RecordingApp, TestApp, TestTallyId},
	Delta, InMemoryVault, Keeper, KeeperError, TallyVaultHandler,
};

#[tokio::test]
async fn fresh_name_reads_zero() {
	let keeper = Keeper::<TestApp>::new();
	assert_eq!(keeper.get(TestTallyId("fresh")).await.unwrap(), 0);
}

#[tokio::test]
async fn operations_return_running_totals() {
	let keeper = Keeper::<TestApp>::new();
	let id = TestTallyId("totals");

	assert_eq!(keeper.increment(id.clone(), Delta::of(5)).await.unwrap(), 5);
	assert_eq!(keeper.increment(id.clone(), Delta::of(2)).await.unwrap(), 7);
	assert_eq!(keeper.decrement(id.clone(), Delta::of(3)).await.unwrap(), 4);
	assert_eq!(keeper.get(id).await.unwrap(), 4);
}

#[tokio::test]
async fn negative_increment_behaves_as_decrement() {
	let keeper = Keeper::<TestApp>::new();
	let id = TestTallyId("symmetry");

	assert_eq!(keeper.increment(id.clone(), Delta::of(-4)).await.unwrap(), -4);
	assert_eq!(keeper.decrement(id.clone(), Delta::of(-4)).await.unwrap(), 0);
	assert_eq!(keeper.decrement(id.clone(), Delta::of(7)).await.unwrap(), -7);
	assert_eq!(keeper.increment(id, Delta::of(-3)).await.unwrap(), -10);
}

#[tokio::test]
async fn missing_delta_steps_by_one() {
	let keeper = Keeper::<TestApp>::new();
	let id = TestTallyId("step");

	assert_eq!(keeper.increment(id.clone(), Delta::default()).await.unwrap(), 1);
	assert_eq!(keeper.increment(id.clone(), Delta::of(1)).await.unwrap(), 2);
	assert_eq!(keeper.decrement(id, Delta::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn concurrent_increments_lose_no_updates() {
	let keeper = Arc::new(Keeper::<TestApp>::new());
	let id = TestTallyId("contended");

	let tasks: Vec<_> = (0..64)
		.map(|_| {
			let keeper = keeper.clone();
			let id = id.clone();
			tokio::spawn(async move { keeper.increment(id, Delta::of(1)).await.unwrap() })
		})
		.collect();

	let mut returned: Vec<i64> =
		join_all(tasks).await.into_iter().map(|task| task.unwrap()).collect();
	returned.sort_unstable();

	// Every intermediate total appears exactly once: nothing skipped, nothing duplicated.
	assert_eq!(returned, (1..=64).collect::<Vec<i64>>());
	assert_eq!(keeper.get(id).await.unwrap(), 64);
}

#[tokio::test]
async fn distinct_names_are_isolated() {
	let keeper = Keeper::<TestApp>::new();

	keeper.increment(TestTallyId("left"), Delta::of(3)).await.unwrap();
	keeper.increment(TestTallyId("right"), Delta::of(11)).await.unwrap();
	keeper.decrement(TestTallyId("left"), Delta::of(1)).await.unwrap();

	assert_eq!(keeper.get(TestTallyId("left")).await.unwrap(), 2);
	assert_eq!(keeper.get(TestTallyId("right")).await.unwrap(), 11);
}

#[tokio::test]
async fn storage_fault_propagates() {
	let keeper = Keeper::<FailingApp>::new();
	let id = TestTallyId("offline");

	assert!(matches!(keeper.get(id.clone()).await, Err(KeeperError::Storage(_))));
	assert!(matches!(
		keeper.increment(id.clone(), Delta::of(1)).await,
		Err(KeeperError::Storage(_))
	));
	assert!(matches!(keeper.decrement(id, Delta::of(1)).await, Err(KeeperError::Storage(_))));
}

#[tokio::test]
async fn zero_delta_still_commits() {
	let keeper = Keeper::<RecordingApp>::new();
	let id = TestTallyId("noop");

	assert_eq!(keeper.increment(id.clone(), Delta::of(0)).await.unwrap(), 0);
	assert_eq!(keeper.vault.saves.load(Ordering::SeqCst), 1);
	assert_eq!(keeper.get(id).await.unwrap(), 0);
}

#[tokio::test]
async fn saturates_at_the_representation_limits() {
	let keeper = Keeper::<TestApp>::new();
	let id = TestTallyId("edge");

	assert_eq!(keeper.increment(id.clone(), Delta::of(i64::MAX)).await.unwrap(), i64::MAX);
	assert_eq!(keeper.increment(id.clone(), Delta::of(1)).await.unwrap(), i64::MAX);
	assert_eq!(keeper.decrement(id, Delta::of(1)).await.unwrap(), i64::MAX - 1);
}

#[tokio::test]
async fn never_written_and_written_zero_differ_in_storage() {
	let vault = InMemoryVault::new();
	let id = TestTallyId("zero");

	assert_eq!(TallyVaultHandler::<TestApp>::get_count(&vault, &id).await.unwrap(), None);

	TallyVaultHandler::<TestApp>::save_count(&vault, &id, 0).await.unwrap();
	assert_eq!(TallyVaultHandler::<TestApp>::get_count(&vault, &id).await.unwrap(), Some(0));
}

#[test]
fn delta_decode_falls_back_by_shape() {
	// No payload at all resolves to the default step.
	assert_eq!(Delta::<i64>::from_json_bytes(b"").amount_or_step(), 1);
	assert_eq!(Delta::<i64>::from_json_bytes(b"definitely not json").amount_or_step(), 1);

	// A parsed payload without a usable amount is a zero delta.
	assert_eq!(Delta::<i64>::from_json_bytes(b"{}").amount_or_step(), 0);
	assert_eq!(Delta::<i64>::from_json_bytes(br#"{"amount": "5"}"#).amount_or_step(), 0);
	assert_eq!(Delta::<i64>::from_json_bytes(br#"{"amount": 1.5}"#).amount_or_step(), 0);
	assert_eq!(Delta::<i64>::from_json_bytes(br#"{"amount": true}"#).amount_or_step(), 0);
	assert_eq!(Delta::<i64>::from_json_bytes(b"[1, 2]").amount_or_step(), 0);
	assert_eq!(Delta::<i64>::from_json_bytes(b"5").amount_or_step(), 0);

	// Integral amounts come through as-is, sign included.
	assert_eq!(Delta::<i64>::from_json_bytes(br#"{"amount": 5}"#).amount_or_step(), 5);
	assert_eq!(Delta::<i64>::from_json_bytes(br#"{"amount": -2}"#).amount_or_step(), -2);
	assert_eq!(Delta::<i64>::from_json_bytes(br#"{"amount": 0}"#).amount_or_step(), 0);
}
