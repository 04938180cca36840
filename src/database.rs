use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub type Database = sqlx::SqlitePool;

/// Tables are created on startup if they are missing. There is no
/// migration step, so changing a definition here has no effect on an
/// existing database file.
///
/// Foreign keys are `ON DELETE SET NULL`: deleting a user or post leaves
/// its dependents in place without an owner.
const SCHEMA: &[&str] = &[
	r#"
	CREATE TABLE IF NOT EXISTS "user" (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		name TEXT NOT NULL,
		email TEXT NOT NULL UNIQUE,
		password BLOB NOT NULL
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS post (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		title TEXT NOT NULL,
		description TEXT NOT NULL,
		content TEXT NOT NULL,
		creation_date DATETIME NOT NULL,
		user_id INTEGER REFERENCES "user" (id) ON DELETE SET NULL,
		is_private BOOLEAN DEFAULT FALSE
	)
	"#,
	r#"
	CREATE TABLE IF NOT EXISTS "like" (
		id INTEGER PRIMARY KEY AUTOINCREMENT,
		post_id INTEGER REFERENCES post (id) ON DELETE SET NULL,
		user_id INTEGER REFERENCES "user" (id) ON DELETE SET NULL
	)
	"#,
	r#"CREATE INDEX IF NOT EXISTS idx_like_post_id ON "like" (post_id)"#,
];

/// Connects to the database at `url`, creating the file and the schema
/// if they do not exist yet.
pub async fn connect(url: &str, max_connections: u32) -> Result<Database, sqlx::Error> {
	if url.contains(":memory:") {
		return connect_in_memory().await;
	}

	let options = SqliteConnectOptions::from_str(url)?
		.create_if_missing(true)
		.foreign_keys(true);

	let database = SqlitePoolOptions::new()
		.max_connections(max_connections)
		.connect_with(options)
		.await?;

	create_schema(&database).await?;

	Ok(database)
}

/// Opens a private in-memory database.
///
/// Every SQLite connection to `:memory:` gets its own database, so the pool
/// is pinned to one connection that is never closed for being idle or old.
pub async fn connect_in_memory() -> Result<Database, sqlx::Error> {
	let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

	let database = SqlitePoolOptions::new()
		.max_connections(1)
		.min_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect_with(options)
		.await?;

	create_schema(&database).await?;

	Ok(database)
}

pub async fn create_schema(database: &Database) -> Result<(), sqlx::Error> {
	for statement in SCHEMA {
		sqlx::query(statement).execute(database).await?;
	}

	tracing::debug!(tables = SCHEMA.len(), "database schema ready");

	Ok(())
}

pub async fn user_exists(database: &Database, user_id: i64) -> Result<bool, sqlx::Error> {
	let found = sqlx::query_scalar::<_, i64>(r#"SELECT id FROM "user" WHERE id = ?"#)
		.bind(user_id)
		.fetch_optional(database)
		.await?;

	Ok(found.is_some())
}

pub async fn post_exists(database: &Database, post_id: i64) -> Result<bool, sqlx::Error> {
	let found = sqlx::query_scalar::<_, i64>("SELECT id FROM post WHERE id = ?")
		.bind(post_id)
		.fetch_optional(database)
		.await?;

	Ok(found.is_some())
}

/// Returns `true` if `error` was caused by a `UNIQUE` constraint.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
	matches!(error, sqlx::Error::Database(error) if error.is_unique_violation())
}

#[cfg(test)]
mod test {
	use super::*;

	#[tokio::test]
	async fn test_schema_is_idempotent() {
		let database = connect_in_memory().await.unwrap();

		create_schema(&database).await.unwrap();

		let tables = sqlx::query_scalar::<_, String>(
			"SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('user', 'post', 'like') ORDER BY name",
		)
		.fetch_all(&database)
		.await
		.unwrap();

		assert_eq!(tables, ["like", "post", "user"]);
	}

	#[tokio::test]
	async fn test_exists_lookups() {
		let database = connect_in_memory().await.unwrap();

		assert!(!user_exists(&database, 1).await.unwrap());
		assert!(!post_exists(&database, 1).await.unwrap());

		sqlx::query(r#"INSERT INTO "user" (name, email, password) VALUES ('a', 'a@x.com', x'00')"#)
			.execute(&database)
			.await
			.unwrap();

		assert!(user_exists(&database, 1).await.unwrap());
	}

	#[tokio::test]
	async fn test_unique_violation_is_detected() {
		let database = connect_in_memory().await.unwrap();
		let insert = r#"INSERT INTO "user" (name, email, password) VALUES ('a', 'a@x.com', x'00')"#;

		sqlx::query(insert).execute(&database).await.unwrap();
		let error = sqlx::query(insert).execute(&database).await.unwrap_err();

		assert!(is_unique_violation(&error));
		assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
	}
}
