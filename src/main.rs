#![warn(clippy::pedantic)]

mod config;
mod database;
mod error;
mod extract;
mod openapi;
mod ratelimit;
mod route;
mod trace;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use aide::{axum::ApiRouter, openapi::OpenApi};
use argon2::Argon2;
use axum::{body::Body, http::Response, Extension, Router};
use tokio::signal;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Span;

pub use database::Database;

pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the database connection pool and the password hasher.
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
}

impl State {
	pub fn new(database: Database) -> Self {
		Self {
			database,
			hasher: Argon2::default(),
		}
	}
}

/// Builds the application router, including the `OpenAPI` document.
pub fn app(state: State) -> Router {
	let mut api = OpenApi::default();

	ApiRouter::new()
		.nest("/users", route::user::routes())
		.nest("/posts", route::post::routes())
		.nest("/likes", route::like::routes())
		.nest_api_service("/docs", route::docs::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(Extension(Arc::new(api)))
		.layer(
			ServiceBuilder::new()
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(TraceLayer::new_for_http().on_response(
					|response: &Response<Body>, latency: Duration, _span: &Span| {
						tracing::info!(
							histogram.latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
							status = response.status().as_u16(),
							"finished processing request"
						);
					},
				))
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(CorsLayer::permissive()),
		)
		.with_state(state)
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(error) = signal::ctrl_c().await {
			tracing::error!(%error, "failed to listen for ctrl-c");
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut stream) => {
				stream.recv().await;
			}
			Err(error) => {
				tracing::error!(%error, "failed to listen for SIGTERM");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = config::Config::from_env()?;
	let _guard = trace::init_tracing_subscriber(&config)?;

	let database =
		database::connect(&config.database_url, config.database_max_connections).await?;

	let governor = ratelimit::from_config(config.rate_limit)
		.ok_or("RATE_LIMIT_PERIOD_SECONDS and RATE_LIMIT_BURST must be greater than zero")?;

	ratelimit::cleanup_old_limits(&[&governor]);

	let app = app(State::new(database.clone())).layer(GovernorLayer { config: governor });

	let listener = tokio::net::TcpListener::bind((config.host, config.port)).await?;

	tracing::info!("listening on {}:{}", config.host, config.port);

	axum::serve(
		listener,
		app.into_make_service_with_connect_info::<SocketAddr>(),
	)
	.with_graceful_shutdown(shutdown_signal())
	.await?;

	database.close().await;

	Ok(())
}
