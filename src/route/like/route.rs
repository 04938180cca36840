use axum::extract::State;
use macros::route;

use crate::{
	database::{self, Database},
	extract::{DeferredJson, Json, Path, RequesterId},
	openapi::tag,
};

use super::{model, Error, RouteError};

async fn find_like(database: &Database, like_id: i64) -> Result<Option<model::Like>, sqlx::Error> {
	sqlx::query_as::<_, model::Like>(r#"SELECT id, post_id, user_id FROM "like" WHERE id = ?"#)
		.bind(like_id)
		.fetch_optional(database)
		.await
}

/// Fails unless both the post and the user exist.
async fn ensure_references(database: &Database, input: &model::LikeInput) -> Result<(), RouteError> {
	let post = database::post_exists(database, input.post_id).await?;
	let user = database::user_exists(database, input.user_id).await?;

	if !(post && user) {
		return Err(Error::UnknownPostOrUser {
			post_id: input.post_id,
			user_id: input.user_id,
		}
		.into());
	}

	Ok(())
}

/// Fetches a like and checks that the requester owns it.
async fn find_owned_like(
	database: &Database,
	like_id: i64,
	requester: &RequesterId,
) -> Result<model::Like, RouteError> {
	let like = find_like(database, like_id)
		.await?
		.ok_or(Error::UnknownLike(like_id))?;

	if !requester.owns(like.user_id) {
		return Err(Error::AccessDenied(like_id).into());
	}

	Ok(like)
}

/// Create like
/// Records a like by a user on a post. A user may like the same post more than once.
#[route(tag = tag::LIKE)]
pub async fn create_like(
	State(database): State<Database>,
	Json(input): Json<model::LikeInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	ensure_references(&database, &input).await?;

	let id = sqlx::query(r#"INSERT INTO "like" (post_id, user_id) VALUES (?, ?)"#)
		.bind(input.post_id)
		.bind(input.user_id)
		.execute(&database)
		.await?
		.last_insert_rowid();

	tracing::info!(like = id, post = input.post_id, user = input.user_id, "like created");

	Ok(Json(model::Confirmation::created(
		"Like created successfully",
		id,
	)))
}

/// Get like
/// Returns a single like by its unique id.
#[route(tag = tag::LIKE)]
pub async fn get_like(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Like>, RouteError> {
	let like = find_like(&database, path.id).await?;

	Ok(Json(like.ok_or(Error::UnknownLike(path.id))?))
}

/// Update like
/// Moves a like to another post and user. Only the current owner of the like may update it.
#[route(
	tag = tag::LIKE,
	response(status = 403, description = "The requester does not own the like."),
	response(status = 404, description = "The like does not exist.")
)]
pub async fn update_like(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	requester: RequesterId,
	body: DeferredJson<model::LikeInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	find_owned_like(&database, path.id, &requester).await?;

	let input = body.parse().await?;
	ensure_references(&database, &input).await?;

	sqlx::query(r#"UPDATE "like" SET post_id = ?, user_id = ? WHERE id = ?"#)
		.bind(input.post_id)
		.bind(input.user_id)
		.bind(path.id)
		.execute(&database)
		.await?;

	Ok(Json(model::Confirmation::new("Like updated successfully")))
}

/// Delete like
/// Deletes an existing like by its unique id. Only the owner of the like may delete it.
#[route(
	tag = tag::LIKE,
	response(status = 403, description = "The requester does not own the like."),
	response(status = 404, description = "The like does not exist.")
)]
pub async fn delete_like(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	requester: RequesterId,
) -> Result<Json<model::Confirmation>, RouteError> {
	find_owned_like(&database, path.id, &requester).await?;

	sqlx::query(r#"DELETE FROM "like" WHERE id = ?"#)
		.bind(path.id)
		.execute(&database)
		.await?;

	Ok(Json(model::Confirmation::new("Like deleted successfully")))
}
