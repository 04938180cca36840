use std::borrow::Cow;

use aide::OperationOutput;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
	Json,
};
use schemars::JsonSchema;
use serde::Serialize;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// Error type for failures that are not specific to a single route.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("rate limited: {0}")]
	RateLimit(#[from] tower_governor::GovernorError),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

/// A single error entry sent to the client.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'a> {
	/// A machine-readable error code, such as `post_not_found`.
	pub code: Cow<'a, str>,
	/// A human-readable description of the error.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content: Option<Cow<'a, str>>,
	/// The request field the error refers to, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'a, str>>,
	/// Additional structured context.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

impl<'a> Message<'a> {
	pub fn new(code: impl Into<Cow<'a, str>>) -> Self {
		Self {
			code: code.into(),
			content: None,
			field: None,
			details: None,
		}
	}

	pub fn content(mut self, content: impl Into<Cow<'a, str>>) -> Self {
		self.content = Some(content.into());
		self
	}

	pub fn field(mut self, field: impl Into<Cow<'a, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Self> {
		vec![self]
	}
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse {
	pub success: bool,
	pub errors: Vec<Message<'static>>,
}

/// Describes how an error is presented to the client.
pub trait ErrorShape: std::fmt::Debug {
	fn status(&self) -> StatusCode;
	fn into_errors(self) -> Vec<Message<'static>>;
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::Path(..) => StatusCode::BAD_REQUEST,
			Self::RateLimit(..) => StatusCode::TOO_MANY_REQUESTS,
			Self::Database(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn into_errors(self) -> Vec<Message<'static>> {
		match self {
			Self::Validation(errors) => errors
				.field_errors()
				.into_keys()
				.map(|field| {
					Message::new("missing_field")
						.content("Missing required fields")
						.field(field.to_string())
				})
				.collect(),
			Self::Json(error) => Message::new("invalid_body")
				.content(error.body_text())
				.into_vec(),
			Self::Path(error) => Message::new("invalid_path")
				.content(error.body_text())
				.into_vec(),
			Self::RateLimit(error) => Message::new("rate_limited")
				.content(error.to_string())
				.into_vec(),
			Self::Database(error) => {
				tracing::error!(%error, "unhandled database error");
				Vec::new()
			}
		}
	}
}

/// Builds the response for any [`ErrorShape`].
fn shape_response(error: impl ErrorShape) -> Response<Body> {
	let status = error.status();

	(
		status,
		Json(ErrorResponse {
			success: false,
			errors: error.into_errors(),
		}),
	)
		.into_response()
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		shape_response(self)
	}
}

impl OperationOutput for AppError {
	type Inner = Self;
}

/// The error returned by a route handler: either a cross-cutting
/// [`AppError`] or the route module's own error type.
#[derive(Debug)]
pub enum RouteError<T> {
	App(AppError),
	Route(T),
}

impl<T> From<AppError> for RouteError<T> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<T> From<sqlx::Error> for RouteError<T> {
	fn from(error: sqlx::Error) -> Self {
		Self::App(error.into())
	}
}

impl<T> From<validator::ValidationErrors> for RouteError<T> {
	fn from(error: validator::ValidationErrors) -> Self {
		Self::App(error.into())
	}
}

impl<T: ErrorShape> IntoResponse for RouteError<T> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::App(error) => shape_response(error),
			Self::Route(error) => shape_response(error),
		}
	}
}

impl<T> OperationOutput for RouteError<T> {
	type Inner = Self;
}
