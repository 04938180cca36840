use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	/// The unique identifier of the record.
	pub id: i64,
}

/// Rejects an id of zero, which a client sends in place of a missing one.
///
/// Negative ids are let through so they fail the lookup instead.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn non_zero(id: &i64) -> Result<(), ValidationError> {
	if *id == 0 {
		return Err(ValidationError::new("non_zero"));
	}

	Ok(())
}

/// Acknowledges a successful write.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Confirmation {
	pub message: String,
	/// The identifier of the created record, for create operations.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
}

impl Confirmation {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			id: None,
		}
	}

	pub fn created(message: impl Into<String>, id: i64) -> Self {
		Self {
			message: message.into(),
			id: Some(id),
		}
	}
}

#[cfg(test)]
mod test {
	use super::{non_zero, Confirmation};

	#[test]
	fn test_non_zero_allows_negative_ids() {
		assert!(non_zero(&0).is_err());
		assert!(non_zero(&-1).is_ok());
		assert!(non_zero(&7).is_ok());
	}

	#[test]
	fn test_confirmation_omits_missing_id() {
		let value = serde_json::to_value(Confirmation::new("Post deleted successfully")).unwrap();

		assert_eq!(value, serde_json::json!({ "message": "Post deleted successfully" }));
	}

	#[test]
	fn test_confirmation_with_id() {
		let value =
			serde_json::to_value(Confirmation::created("Post created successfully", 3)).unwrap();

		assert_eq!(value["id"], 3);
	}
}
