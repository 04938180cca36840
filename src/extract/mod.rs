mod requester;

use std::{convert::Infallible, marker::PhantomData};

pub use requester::{RequesterId, REQUESTER_HEADER};

use aide::OperationIo;
use axum::{
	body::Body,
	extract::{FromRequest, FromRequestParts, Request},
	http::{request, Response},
	response::IntoResponse,
};
use serde::de;

use crate::error::AppError;

/// Extractor that deserializes a JSON body and validates it.
///
/// T must implement [`serde::de::DeserializeOwned`] and [`validator::Validate`]
/// in order to be used in an extractor.
///
/// ```rust
/// async fn route(Json(user): Json<User>) {
///   // ...
/// }
/// ```
#[derive(OperationIo)]
#[aide(
	input_with = "axum::Json<T>",
	output_with = "axum::Json<T>",
	json_schema
)]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
	T: serde::Serialize,
{
	fn into_response(self) -> Response<Body> {
		axum::Json(self.0).into_response()
	}
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
	T: de::DeserializeOwned + validator::Validate,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		let result = axum::Json::<T>::from_request(req, state).await?.0;

		result.validate().map_err(Self::Rejection::Validation)?;
		Ok(Self(result))
	}
}

/// Extractor that holds on to the request body until the handler asks for it.
///
/// Used by handlers that must confirm the target record exists (and that the
/// requester may change it) before the body is looked at. A missing or
/// malformed body is only reported once [`DeferredJson::parse`] is called.
///
/// ```rust
/// async fn route(body: DeferredJson<User>) -> Result<(), AppError> {
///   // lookups first
///   let user = body.parse().await?;
///   Ok(())
/// }
/// ```
#[derive(OperationIo)]
#[aide(input_with = "axum::Json<T>", json_schema)]
pub struct DeferredJson<T>(Request, PhantomData<fn() -> T>);

#[axum::async_trait]
impl<T, S> FromRequest<S> for DeferredJson<T>
where
	S: Send + Sync,
{
	type Rejection = Infallible;

	async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
		Ok(Self(req, PhantomData))
	}
}

impl<T> DeferredJson<T>
where
	T: de::DeserializeOwned + validator::Validate,
{
	/// Deserializes the body and validates it.
	pub async fn parse(self) -> Result<T, AppError> {
		let result = axum::Json::<T>::from_request(self.0, &()).await?.0;

		result.validate()?;
		Ok(result)
	}
}

/// Extractor that deserializes a path parameter and validates it.
#[derive(OperationIo)]
#[aide(input_with = "axum::extract::Path<T>", json_schema)]
pub struct Path<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
	T: de::DeserializeOwned + validator::Validate + Send,
	S: Send + Sync,
{
	type Rejection = AppError;

	async fn from_request_parts(
		parts: &mut request::Parts,
		state: &S,
	) -> Result<Self, Self::Rejection> {
		let result = axum::extract::Path::<T>::from_request_parts(parts, state)
			.await?
			.0;

		result.validate().map_err(Self::Rejection::Validation)?;
		Ok(Self(result))
	}
}
