pub use crate::route::model::{Confirmation, IdInput};

use crate::route::model::non_zero;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single post, created by a user.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post.
	pub id: i64,
	/// The title of the post.
	pub title: String,
	/// A short summary of the post.
	pub description: String,
	/// The body of the post.
	pub content: String,
	/// The creation time of the post, assigned by the server.
	pub creation_date: chrono::DateTime<chrono::Utc>,
	/// The number of likes on the post.
	pub likes_count: i64,
	/// The user that created the post, if it still exists.
	#[serde(skip)]
	pub user_id: Option<i64>,
	#[serde(skip)]
	pub is_private: Option<bool>,
}

impl Post {
	/// A post is private only if its flag is explicitly set; a cleared
	/// flag reads as public.
	pub fn is_private(&self) -> bool {
		self.is_private.unwrap_or(false)
	}
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct CreatePostInput {
	#[serde(default)]
	#[validate(length(min = 1))]
	pub title: String,
	#[serde(default)]
	#[validate(length(min = 1))]
	pub description: String,
	#[serde(default)]
	#[validate(length(min = 1))]
	pub content: String,
	/// The user that authors the post.
	#[serde(default)]
	#[validate(custom(function = "non_zero"))]
	pub user_id: i64,
	/// Whether only the author may read the post.
	#[serde(default)]
	pub is_private: bool,
}

#[derive(Deserialize, Validate, JsonSchema)]
pub struct UpdatePostInput {
	#[serde(default)]
	#[validate(length(min = 1))]
	pub title: String,
	#[serde(default)]
	#[validate(length(min = 1))]
	pub description: String,
	#[serde(default)]
	#[validate(length(min = 1))]
	pub content: String,
	/// Replaces the stored flag as given. Omitting it clears the flag,
	/// which makes the post public.
	#[serde(default)]
	pub is_private: Option<bool>,
}
