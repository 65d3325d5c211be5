use std::error::Error;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::fmt;

use tally_keeper::{
	service::{serve, AppState},
	Config, Keeper,
};

#[derive(Parser, Debug)]
struct Args {
	/// Socket address to serve the dispatcher on.
	#[arg(long, default_value = "127.0.0.1:8787")]
	listen: String,
	/// Log level
	#[arg(long, default_value = "info")]
	log_level: Level,
}

/// The service's [`Config`]: 64-bit counts over the durable vault when one is compiled in.
#[derive(Debug)]
struct TallyService;

impl Config for TallyService {
	type Value = i64;
	#[cfg(feature = "rocksdb")]
	type Vault = tally_keeper::RocksDbVault;
	#[cfg(not(feature = "rocksdb"))]
	type Vault = tally_keeper::InMemoryVault;
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	let subscriber = fmt::Subscriber::builder().with_max_level(args.log_level).finish();
	tracing::subscriber::set_global_default(subscriber)?;

	info!(task = "tracing_setup", result = "success", "tracing successfully set up",);

	dotenv::dotenv().ok();

	info!(task = "dotenv_setup", result = "success", "dotenv loaded successfully");

	let state = AppState { keeper: Keeper::<TallyService>::new() };

	serve(state, &args.listen).await?;

	Ok(())
}
