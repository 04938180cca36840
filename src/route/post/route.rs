use axum::extract::State;
use macros::route;

use crate::{
	database::{self, Database},
	extract::{DeferredJson, Json, Path, RequesterId},
	openapi::tag,
};

use super::{model, Error, RouteError};

/// Selects every post column along with the number of likes referencing it.
const SELECT_POST: &str = r#"
	SELECT
		post.id, post.title, post.description, post.content, post.creation_date,
		post.user_id, post.is_private,
		(SELECT COUNT(*) FROM "like" WHERE "like".post_id = post.id) AS likes_count
	FROM post
"#;

async fn find_post(database: &Database, post_id: i64) -> Result<Option<model::Post>, sqlx::Error> {
	sqlx::query_as::<_, model::Post>(&format!("{SELECT_POST} WHERE post.id = ?"))
		.bind(post_id)
		.fetch_optional(database)
		.await
}

/// Get all posts
/// Returns every post with its like count, including private posts.
#[route(tag = tag::POST)]
pub async fn get_posts(
	State(database): State<Database>,
) -> Result<Json<Vec<model::Post>>, RouteError> {
	let posts = sqlx::query_as::<_, model::Post>(&format!("{SELECT_POST} ORDER BY post.id"))
		.fetch_all(&database)
		.await?;

	Ok(Json(posts))
}

/// Get single post
/// Returns a single post by its unique id. Private posts are only returned to their author.
#[route(
	tag = tag::POST,
	response(status = 403, description = "The post is private and the requester is not its author."),
	response(status = 404, description = "The post does not exist.")
)]
pub async fn get_post(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	requester: RequesterId,
) -> Result<Json<model::Post>, RouteError> {
	let post = find_post(&database, path.id)
		.await?
		.ok_or(Error::UnknownPost(path.id))?;

	if post.is_private() && !requester.owns(post.user_id) {
		return Err(Error::AccessDenied(path.id).into());
	}

	Ok(Json(post))
}

/// Create post
/// Creates a new post on behalf of an existing user.
#[route(tag = tag::POST)]
pub async fn create_post(
	State(database): State<Database>,
	Json(input): Json<model::CreatePostInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	if !database::user_exists(&database, input.user_id).await? {
		return Err(Error::UnknownUser(input.user_id).into());
	}

	let id = sqlx::query(
		r#"
			INSERT INTO post (title, description, content, creation_date, user_id, is_private)
			VALUES (?, ?, ?, ?, ?, ?)
		"#,
	)
	.bind(&input.title)
	.bind(&input.description)
	.bind(&input.content)
	.bind(chrono::Utc::now())
	.bind(input.user_id)
	.bind(input.is_private)
	.execute(&database)
	.await?
	.last_insert_rowid();

	tracing::info!(post = id, user = input.user_id, "post created");

	Ok(Json(model::Confirmation::created(
		"Post created successfully",
		id,
	)))
}

/// Update post
/// Replaces the title, description, content and privacy flag of an existing post.
#[route(tag = tag::POST)]
pub async fn update_post(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	body: DeferredJson<model::UpdatePostInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	// Unlike deletion, updates are not restricted to the author.
	if !database::post_exists(&database, path.id).await? {
		return Err(Error::UnknownPost(path.id).into());
	}

	let input = body.parse().await?;

	sqlx::query(
		r#"
			UPDATE post
			SET title = ?, description = ?, content = ?, is_private = ?
			WHERE id = ?
		"#,
	)
	.bind(&input.title)
	.bind(&input.description)
	.bind(&input.content)
	.bind(input.is_private)
	.bind(path.id)
	.execute(&database)
	.await?;

	Ok(Json(model::Confirmation::new("Post updated successfully")))
}

/// Delete post
/// Deletes an existing post by its unique id. Only the author may delete a post.
#[route(
	tag = tag::POST,
	response(status = 403, description = "The requester is not the author of the post."),
	response(status = 404, description = "The post does not exist.")
)]
pub async fn delete_post(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	requester: RequesterId,
) -> Result<Json<model::Confirmation>, RouteError> {
	let owner = sqlx::query_scalar::<_, Option<i64>>("SELECT user_id FROM post WHERE id = ?")
		.bind(path.id)
		.fetch_optional(&database)
		.await?
		.ok_or(Error::UnknownPost(path.id))?;

	if !requester.owns(owner) {
		return Err(Error::AccessDenied(path.id).into());
	}

	sqlx::query("DELETE FROM post WHERE id = ?")
		.bind(path.id)
		.execute(&database)
		.await?;

	tracing::info!(post = path.id, "post deleted");

	Ok(Json(model::Confirmation::new("Post deleted successfully")))
}
