use std::convert::Infallible;

use aide::OperationInput;
use axum::{extract::FromRequestParts, http::request};

use crate::openapi::SECURITY_SCHEME_REQUESTER;

pub const REQUESTER_HEADER: &str = "User-Id";

/// The identity a client claims through the `User-Id` header.
///
/// The header is trusted verbatim and is not a security boundary: any
/// client can claim to be any user. A missing or non-UTF-8 header yields
/// an anonymous requester, which owns nothing.
///
/// ```rust
/// async fn route(requester: RequesterId) {
///   println!("{:?}", requester.0);
/// }
/// ```
#[derive(Debug, Default)]
pub struct RequesterId(pub Option<String>);

impl RequesterId {
	/// Returns `true` if the requester claims to be `owner`.
	///
	/// The comparison is textual, so `"7"` owns a record of user 7 but
	/// `"07"` does not. A record without an owner is owned by nobody.
	pub fn owns(&self, owner: Option<i64>) -> bool {
		match (self.0.as_deref(), owner) {
			(Some(claimed), Some(owner)) if !claimed.is_empty() => claimed == owner.to_string(),
			_ => false,
		}
	}
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequesterId
where
	S: Sync + Send,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		let claimed = parts
			.headers
			.get(REQUESTER_HEADER)
			.and_then(|value| value.to_str().ok())
			.map(str::to_owned);

		Ok(Self(claimed))
	}
}

impl OperationInput for RequesterId {
	/// Operation input for the requester extractor.
	///
	/// This adds the `User-Id` header requirement to the `OpenAPI` operation.
	fn operation_input(_ctx: &mut aide::gen::GenContext, operation: &mut aide::openapi::Operation) {
		operation.security.push(
			[(SECURITY_SCHEME_REQUESTER.to_string(), Vec::new())]
				.into_iter()
				.collect(),
		);
	}
}

#[cfg(test)]
mod test {
	use super::RequesterId;

	#[test]
	fn test_owns_matches_textually() {
		let requester = RequesterId(Some("7".into()));

		assert!(requester.owns(Some(7)));
		assert!(!requester.owns(Some(8)));
		assert!(!RequesterId(Some("07".into())).owns(Some(7)));
	}

	#[test]
	fn test_anonymous_owns_nothing() {
		assert!(!RequesterId(None).owns(Some(1)));
		assert!(!RequesterId(Some(String::new())).owns(Some(1)));
		assert!(!RequesterId(Some("1".into())).owns(None));
	}
}
