use std::{net::IpAddr, str::FromStr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://blogs.db";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{key} must be a valid {expected}, got {value:?}")]
	Invalid {
		key: &'static str,
		expected: &'static str,
		value: String,
	},
}

/// Process configuration, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub database_max_connections: u32,
	pub host: IpAddr,
	pub port: u16,
	pub rate_limit: RateLimit,
	/// Fallback log filter, used when `RUST_LOG` is not set.
	pub log_level: String,
	/// When set, traces and metrics are exported over OTLP.
	pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
	/// Seconds it takes to replenish a single request of quota.
	pub period_seconds: u64,
	pub burst_size: u32,
}

impl Config {
	/// Loads `.env` and reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, Error> {
		dotenvy::dotenv().ok();

		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads the configuration through `lookup`, which maps a variable
	/// name to its value.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		Ok(Self {
			database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
			database_max_connections: parse(&lookup, "DATABASE_MAX_CONNECTIONS", "integer", 5)?,
			host: parse(&lookup, "HOST", "ip address", IpAddr::from([127, 0, 0, 1]))?,
			port: parse(&lookup, "PORT", "port", 3000)?,
			rate_limit: RateLimit {
				period_seconds: parse(&lookup, "RATE_LIMIT_PERIOD_SECONDS", "integer", 1)?,
				burst_size: parse(&lookup, "RATE_LIMIT_BURST", "integer", 50)?,
			},
			log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
			otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|value| !value.is_empty()),
		})
	}
}

fn parse<T: FromStr>(
	lookup: &impl Fn(&str) -> Option<String>,
	key: &'static str,
	expected: &'static str,
	default: T,
) -> Result<T, Error> {
	let Some(value) = lookup(key) else {
		return Ok(default);
	};

	value.trim().parse().map_err(|_| Error::Invalid {
		key,
		expected,
		value,
	})
}
