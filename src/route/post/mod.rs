use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("post_not_found")]
	UnknownPost(i64),
	#[error("user_not_found")]
	UnknownUser(i64),
	#[error("access_denied")]
	AccessDenied(i64),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route(
			"/:id",
			get_with(get_post, get_post_docs)
				.put_with(update_post, update_post_docs)
				.delete_with(delete_post, delete_post_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) | Self::UnknownUser(..) => StatusCode::NOT_FOUND,
			Self::AccessDenied(..) => StatusCode::FORBIDDEN,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		let message = error::Message::new(self.to_string());

		match self {
			Self::UnknownPost(post) => message
				.content("Post not found")
				.detail("post", post)
				.into_vec(),
			Self::UnknownUser(user) => message
				.content("User not found")
				.field("user_id")
				.detail("user", user)
				.into_vec(),
			Self::AccessDenied(post) => message
				.content("Access denied")
				.detail("post", post)
				.into_vec(),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[tokio::test]
	async fn test_create_and_read_public_post() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;

		let response = app
			.post("/posts")
			.json(&json!({
				"title": "Hello",
				"description": "A first post",
				"content": "Lorem ipsum",
				"user_id": author,
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let created = response.json::<Value>();
		assert_eq!(created["message"], "Post created successfully");
		let id = created["id"].as_i64().unwrap();

		let response = app.get(&format!("/posts/{id}")).await;
		assert_eq!(response.status_code(), 200);

		let post = response.json::<Value>();
		assert_eq!(post["id"], id);
		assert_eq!(post["title"], "Hello");
		assert_eq!(post["description"], "A first post");
		assert_eq!(post["content"], "Lorem ipsum");
		assert_eq!(post["likes_count"], 0);
		assert!(post["creation_date"].is_string());
		assert!(post.get("user_id").is_none());
		assert!(post.get("is_private").is_none());
	}

	#[tokio::test]
	async fn test_create_post_for_unknown_user() {
		let pool = pool().await;
		let app = app(pool.clone());

		let response = app
			.post("/posts")
			.json(&json!({
				"title": "t",
				"description": "d",
				"content": "c",
				"user_id": 99,
			}))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 404);

		let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post")
			.fetch_one(&pool)
			.await
			.unwrap();

		assert_eq!(count, 0);
	}

	#[tokio::test]
	async fn test_negative_user_id_is_looked_up() {
		let app = app(pool().await);

		let response = app
			.post("/posts")
			.json(&json!({
				"title": "t",
				"description": "d",
				"content": "c",
				"user_id": -1,
			}))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>()["errors"][0]["code"], "user_not_found");

		let response = app
			.post("/posts")
			.json(&json!({
				"title": "t",
				"description": "d",
				"content": "c",
				"user_id": 0,
			}))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_create_post_requires_fields() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;

		for body in [
			json!({ "description": "d", "content": "c", "user_id": author }),
			json!({ "title": "t", "description": "", "content": "c", "user_id": author }),
			json!({ "title": "t", "description": "d", "user_id": author }),
			json!({ "title": "t", "description": "d", "content": "c" }),
			json!({ "title": "t", "description": "d", "content": "c", "user_id": 0 }),
		] {
			let response = app.post("/posts").json(&body).expect_failure().await;

			assert_eq!(response.status_code(), 400, "{body}");
		}
	}

	#[tokio::test]
	async fn test_private_post_visibility() {
		let app = app(pool().await);
		let owner = create_user(&app, "a@x.com").await;
		let other = create_user(&app, "b@x.com").await;
		let post = create_post(&app, owner, true).await;

		let response = app
			.get(&format!("/posts/{post}"))
			.add_header(user_id(), owner.into())
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app
			.get(&format!("/posts/{post}"))
			.add_header(user_id(), other.into())
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 403);
		assert_eq!(response.json::<Value>()["errors"][0]["content"], "Access denied");

		let response = app
			.get(&format!("/posts/{post}"))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 403);
	}

	#[tokio::test]
	async fn test_get_unknown_post() {
		let app = app(pool().await);

		let response = app.get("/posts/5").expect_failure().await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>()["errors"][0]["code"], "post_not_found");
	}

	#[tokio::test]
	async fn test_non_numeric_id_is_rejected() {
		let app = app(pool().await);

		let response = app.get("/posts/abc").expect_failure().await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_likes_count_matches_likes() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;
		let fan = create_user(&app, "b@x.com").await;
		let liked = create_post(&app, author, false).await;
		let other = create_post(&app, author, false).await;

		create_like(&app, liked, fan).await;
		create_like(&app, liked, fan).await;
		create_like(&app, liked, author).await;
		create_like(&app, other, fan).await;

		let response = app.get(&format!("/posts/{liked}")).await;
		assert_eq!(response.json::<Value>()["likes_count"], 3);

		let response = app.get(&format!("/posts/{other}")).await;
		assert_eq!(response.json::<Value>()["likes_count"], 1);
	}

	#[tokio::test]
	async fn test_list_includes_private_posts() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;
		let public = create_post(&app, author, false).await;
		let private = create_post(&app, author, true).await;
		create_like(&app, private, author).await;

		let response = app.get("/posts").await;

		assert_eq!(response.status_code(), 200);

		let posts = response.json::<Vec<Value>>();
		let ids = posts
			.iter()
			.map(|post| post["id"].as_i64().unwrap())
			.collect::<Vec<_>>();

		assert_eq!(ids, [public, private]);
		assert_eq!(posts[0]["likes_count"], 0);
		assert_eq!(posts[1]["likes_count"], 1);
	}

	#[tokio::test]
	async fn test_list_empty() {
		let app = app(pool().await);

		let response = app.get("/posts").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>(), json!([]));
	}

	#[tokio::test]
	async fn test_update_post() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;
		let post = create_post(&app, author, false).await;

		let response = app
			.put(&format!("/posts/{post}"))
			.json(&json!({
				"title": "Edited",
				"description": "Edited description",
				"content": "Edited content",
				"is_private": false,
			}))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["message"], "Post updated successfully");

		let updated = app.get(&format!("/posts/{post}")).await.json::<Value>();
		assert_eq!(updated["title"], "Edited");
		assert_eq!(updated["description"], "Edited description");
		assert_eq!(updated["content"], "Edited content");
	}

	#[tokio::test]
	async fn test_update_without_flag_makes_post_public() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;
		let post = create_post(&app, author, true).await;

		let response = app
			.put(&format!("/posts/{post}"))
			.json(&json!({ "title": "t", "description": "d", "content": "c" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app.get(&format!("/posts/{post}")).await;
		assert_eq!(response.status_code(), 200);
	}

	#[tokio::test]
	async fn test_update_skips_ownership_check() {
		let app = app(pool().await);
		let author = create_user(&app, "a@x.com").await;
		let stranger = create_user(&app, "b@x.com").await;
		let post = create_post(&app, author, false).await;

		let response = app
			.put(&format!("/posts/{post}"))
			.add_header(user_id(), stranger.into())
			.json(&json!({ "title": "t", "description": "d", "content": "c", "is_private": true }))
			.await;

		assert_eq!(response.status_code(), 200);
	}

	#[tokio::test]
	async fn test_update_checks_existence_before_fields() {
		let app = app(pool().await);

		let response = app
			.put("/posts/3")
			.json(&json!({}))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 404);

		let author = create_user(&app, "a@x.com").await;
		let post = create_post(&app, author, false).await;

		let response = app
			.put(&format!("/posts/{post}"))
			.json(&json!({ "title": "t", "content": "c" }))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[tokio::test]
	async fn test_update_unknown_post_without_body() {
		let app = app(pool().await);

		let response = app.put("/posts/3").expect_failure().await;

		assert_eq!(response.status_code(), 404);
		assert_eq!(response.json::<Value>()["errors"][0]["code"], "post_not_found");
	}

	#[tokio::test]
	async fn test_delete_requires_owner() {
		let pool = pool().await;
		let app = app(pool.clone());
		let owner = create_user(&app, "a@x.com").await;
		let other = create_user(&app, "b@x.com").await;
		let post = create_post(&app, owner, false).await;

		let response = app
			.delete(&format!("/posts/{post}"))
			.add_header(user_id(), other.into())
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 403);
		assert!(crate::database::post_exists(&pool, post).await.unwrap());

		let response = app
			.delete(&format!("/posts/{post}"))
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 403);

		let response = app
			.delete(&format!("/posts/{post}"))
			.add_header(user_id(), owner.into())
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["message"], "Post deleted successfully");
		assert!(!crate::database::post_exists(&pool, post).await.unwrap());

		let response = app
			.delete(&format!("/posts/{post}"))
			.add_header(user_id(), owner.into())
			.expect_failure()
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[tokio::test]
	async fn test_end_to_end_private_post_and_like() {
		let app = app(pool().await);

		let response = app
			.post("/users")
			.json(&json!({ "name": "A", "email": "a@x.com", "password": "p" }))
			.await;
		assert_eq!(response.status_code(), 200);
		let first = response.json::<Value>()["id"].as_i64().unwrap();

		let response = app
			.post("/users")
			.json(&json!({ "name": "A2", "email": "a@x.com", "password": "p" }))
			.expect_failure()
			.await;
		assert_eq!(response.status_code(), 400);

		let response = app
			.post("/posts")
			.json(&json!({
				"title": "Secret",
				"description": "Only for me",
				"content": "...",
				"user_id": first,
				"is_private": true,
			}))
			.await;
		assert_eq!(response.status_code(), 200);
		let post = response.json::<Value>()["id"].as_i64().unwrap();

		let response = app
			.get(&format!("/posts/{post}"))
			.add_header(user_id(), first.into())
			.await;
		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["likes_count"], 0);

		let response = app
			.get(&format!("/posts/{post}"))
			.expect_failure()
			.await;
		assert_eq!(response.status_code(), 403);

		let second = create_user(&app, "b@x.com").await;
		assert_ne!(first, second);

		let response = app
			.post("/likes")
			.json(&json!({ "post_id": post, "user_id": second }))
			.await;
		assert_eq!(response.status_code(), 200);

		let response = app
			.get(&format!("/posts/{post}"))
			.add_header(user_id(), first.into())
			.await;
		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<Value>()["likes_count"], 1);
	}
}
