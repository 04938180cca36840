use argon2::Argon2;
use axum::extract::State;
use macros::route;
use uuid::Uuid;

use crate::{
	database::{self, Database},
	extract::{DeferredJson, Json, Path},
	openapi::tag,
	AppState,
};

use super::{model, Error, RouteError};

pub const SALT_LENGTH: usize = 16;
pub const KEY_LENGTH: usize = 32;

/// Hashes a password with Argon2 under a fresh random salt.
///
/// The stored value is the salt followed by the derived key.
fn hash_password(hasher: &Argon2, password: &str) -> Result<Vec<u8>, argon2::Error> {
	let salt = Uuid::new_v4();
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), salt.as_bytes(), &mut hash)?;

	let mut stored = Vec::with_capacity(SALT_LENGTH + KEY_LENGTH);
	stored.extend_from_slice(salt.as_bytes());
	stored.extend_from_slice(&hash);

	Ok(stored)
}

fn map_unique_email(error: sqlx::Error) -> RouteError {
	if database::is_unique_violation(&error) {
		Error::EmailTaken.into()
	} else {
		error.into()
	}
}

/// Create user
/// Registers a new user. The email address must not belong to another user.
#[route(tag = tag::USER)]
pub async fn create_user(
	State(state): State<AppState>,
	Json(input): Json<model::UserInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	let password = hash_password(&state.hasher, &input.password).map_err(Error::Argon)?;

	let id = sqlx::query(
		r#"
			INSERT INTO "user" (name, email, password)
			VALUES (?, ?, ?)
		"#,
	)
	.bind(&input.name)
	.bind(&input.email)
	.bind(&password)
	.execute(&state.database)
	.await
	.map_err(map_unique_email)?
	.last_insert_rowid();

	tracing::info!(user = id, "user created");

	Ok(Json(model::Confirmation::created(
		"User created successfully",
		id,
	)))
}

/// Get user
/// Returns a single user by its unique id. The password is never included.
#[route(tag = tag::USER)]
pub async fn get_user(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::User>, RouteError> {
	let user = sqlx::query_as::<_, model::User>(
		r#"
			SELECT id, name, email FROM "user"
			WHERE id = ?
		"#,
	)
	.bind(path.id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(user.ok_or(Error::UnknownUser(path.id))?))
}

/// Update user
/// Replaces the name, email and password of an existing user. All three fields are required.
#[route(tag = tag::USER)]
pub async fn update_user(
	State(state): State<AppState>,
	Path(path): Path<model::IdInput>,
	body: DeferredJson<model::UserInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	if !database::user_exists(&state.database, path.id).await? {
		return Err(Error::UnknownUser(path.id).into());
	}

	let input = body.parse().await?;

	let password = hash_password(&state.hasher, &input.password).map_err(Error::Argon)?;

	sqlx::query(
		r#"
			UPDATE "user"
			SET name = ?, email = ?, password = ?
			WHERE id = ?
		"#,
	)
	.bind(&input.name)
	.bind(&input.email)
	.bind(&password)
	.bind(path.id)
	.execute(&state.database)
	.await
	.map_err(map_unique_email)?;

	Ok(Json(model::Confirmation::new("User updated successfully")))
}

/// Delete user
/// Deletes an existing user by its unique id. Their posts and likes are kept without an owner.
#[route(tag = tag::USER)]
pub async fn delete_user(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::Confirmation>, RouteError> {
	let status = sqlx::query(r#"DELETE FROM "user" WHERE id = ?"#)
		.bind(path.id)
		.execute(&database)
		.await?;

	if status.rows_affected() == 0 {
		return Err(Error::UnknownUser(path.id).into());
	}

	tracing::info!(user = path.id, "user deleted");

	Ok(Json(model::Confirmation::new("User deleted successfully")))
}
