use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("user_not_found")]
	UnknownUser(i64),
	#[error("email_taken")]
	EmailTaken,
	#[error("password hashing failed: {0}")]
	Argon(#[from] argon2::Error),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route("/", post_with(create_user, create_user_docs))
		.api_route(
			"/:id",
			get_with(get_user, get_user_docs)
				.put_with(update_user, update_user_docs)
				.delete_with(delete_user, delete_user_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownUser(..) => StatusCode::NOT_FOUND,
			Self::EmailTaken => StatusCode::BAD_REQUEST,
			Self::Argon(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		let message = error::Message::new(self.to_string());

		match self {
			Self::UnknownUser(user) => message
				.content("User not found")
				.detail("user", user)
				.into_vec(),
			Self::EmailTaken => message
				.content("Email already exists")
				.field("email")
				.into_vec(),
			Self::Argon(error) => {
				tracing::error!(%error, "failed to hash password");
				Vec::new()
			}
		}
	}
}
