pub use crate::route::model::{Confirmation, IdInput};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single registered user.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct User {
	/// The unique identifier of the user.
	pub id: i64,
	/// The user's display name.
	pub name: String,
	/// The user's email address, unique across all users.
	pub email: String,
}

/// The fields accepted when creating or replacing a user.
///
/// All three are required on every write, including updates.
#[derive(Deserialize, Validate, JsonSchema)]
pub struct UserInput {
	#[serde(default)]
	#[validate(length(min = 1))]
	pub name: String,
	#[serde(default)]
	#[validate(length(min = 1))]
	pub email: String,
	#[serde(default)]
	#[validate(length(min = 1))]
	pub password: String,
}
