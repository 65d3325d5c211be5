//! HTTP dispatcher for the keeper.
//!
//! Routes each inbound request to a tally selected by the `name` query parameter, decodes the
//! optional amount payload, invokes the keeper, and renders the committed count. All request
//! leniency lives here: missing names short-circuit to a guidance message before any tally is
//! touched, and body decoding goes through [`Delta::from_json_bytes`] so malformed input never
//! aborts a request. Persistence faults are the one thing never downgraded: they surface as a
//! generic 500.

use actix_web::{web, App, HttpResponse, HttpServer, ResponseError};
use serde::Deserialize;
use tracing::{error, info};

use crate::{
	types::{Delta, KeeperError},
	Config, Keeper, TallyName,
};

/// Shared application state handed to every handler.
pub struct AppState<T: Config> {
	pub keeper: Keeper<T>,
}

/// Query parameters accepted on every route.
#[derive(Debug, Deserialize)]
struct NameQuery {
	name: Option<String>,
}

const NAME_GUIDANCE: &str =
	"Select a Durable Object to contact by using the `name` URL query string parameter, e.g. /?name=A";

fn guidance() -> HttpResponse {
	HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(NAME_GUIDANCE)
}

fn render_count<V: std::fmt::Display>(name: &str, count: V) -> HttpResponse {
	HttpResponse::Ok()
		.content_type("text/plain; charset=utf-8")
		.body(format!("Durable Object '{}' count: {}", name, count))
}

async fn not_found() -> HttpResponse {
	HttpResponse::NotFound().body("Not found")
}

async fn read_count<T: Config>(
	state: web::Data<AppState<T>>,
	query: web::Query<NameQuery>,
) -> Result<HttpResponse, KeeperError> {
	let Some(name) = query.into_inner().name else { return Ok(guidance()) };

	let count = state.keeper.get(TallyName::new(name.clone())).await?;
	Ok(render_count(&name, count))
}

async fn increment_count<T: Config>(
	state: web::Data<AppState<T>>,
	query: web::Query<NameQuery>,
	body: web::Bytes,
) -> Result<HttpResponse, KeeperError> {
	let Some(name) = query.into_inner().name else { return Ok(guidance()) };

	let delta = Delta::from_json_bytes(&body);
	let count = state.keeper.increment(TallyName::new(name.clone()), delta).await?;
	Ok(render_count(&name, count))
}

async fn decrement_count<T: Config>(
	state: web::Data<AppState<T>>,
	query: web::Query<NameQuery>,
	body: web::Bytes,
) -> Result<HttpResponse, KeeperError> {
	let Some(name) = query.into_inner().name else { return Ok(guidance()) };

	let delta = Delta::from_json_bytes(&body);
	let count = state.keeper.decrement(TallyName::new(name.clone()), delta).await?;
	Ok(render_count(&name, count))
}

/// Mounts the dispatcher's routes.
///
/// Anything not mounted here must go through a 404 default service; [`serve`] wires one up, and
/// tests do the same.
pub fn routes<T: Config>(cfg: &mut web::ServiceConfig) {
	cfg.service(web::resource("/").route(web::get().to(read_count::<T>)))
		.service(web::resource("/incr").route(web::post().to(increment_count::<T>)))
		.service(web::resource("/decr").route(web::post().to(decrement_count::<T>)));
}

/// Serves the dispatcher on `addr` until the process is stopped.
pub async fn serve<T: Config>(state: AppState<T>, addr: &str) -> std::io::Result<()> {
	let state = web::Data::new(state);

	info!("Listening on {}", addr);

	HttpServer::new(move || {
		App::new()
			.app_data(state.clone())
			.configure(routes::<T>)
			.default_service(web::route().to(not_found))
	})
	.bind(addr)?
	.run()
	.await
}

impl ResponseError for KeeperError {
	fn error_response(&self) -> HttpResponse {
		error!("Tally operation failed: {}", self);
		HttpResponse::InternalServerError().body("Internal error")
	}
}
