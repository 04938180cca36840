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
	#[error("like_not_found")]
	UnknownLike(i64),
	#[error("post_or_user_not_found")]
	UnknownPostOrUser { post_id: i64, user_id: i64 },
	#[error("access_denied")]
	AccessDenied(i64),
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
		.api_route("/", post_with(create_like, create_like_docs))
		.api_route(
			"/:id",
			get_with(get_like, get_like_docs)
				.put_with(update_like, update_like_docs)
				.delete_with(delete_like, delete_like_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownLike(..) | Self::UnknownPostOrUser { .. } => StatusCode::NOT_FOUND,
			Self::AccessDenied(..) => StatusCode::FORBIDDEN,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		let message = error::Message::new(self.to_string());

		match self {
			Self::UnknownLike(like) => message
				.content("Like not found")
				.detail("like", like)
				.into_vec(),
			Self::UnknownPostOrUser { post_id, user_id } => message
				.content("Post or user not found")
				.detail("post", post_id)
				.detail("user", user_id)
				.into_vec(),
			Self::AccessDenied(like) => message
				.content("Access denied")
				.detail("like", like)
				.into_vec(),
		}
	}
}
