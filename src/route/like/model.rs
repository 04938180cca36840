pub use crate::route::model::{Confirmation, IdInput};

use crate::route::model::non_zero;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single user's like on a single post.
///
/// Either reference is `null` once the post or user it pointed to has been deleted.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Like {
	/// The unique identifier of the like.
	pub id: i64,
	/// The liked post.
	pub post_id: Option<i64>,
	/// The user that owns the like.
	pub user_id: Option<i64>,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct LikeInput {
	#[serde(default)]
	#[validate(custom(function = "non_zero"))]
	pub post_id: i64,
	#[serde(default)]
	#[validate(custom(function = "non_zero"))]
	pub user_id: i64,
}
