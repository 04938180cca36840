use aide::{
	openapi::{ApiKeyLocation, SecurityScheme, Tag},
	transform::TransformOpenApi,
};

use crate::{
	error::{ErrorResponse, Message},
	extract::{Json, REQUESTER_HEADER},
};

pub const SECURITY_SCHEME_REQUESTER: &str = "Requester";

pub mod tag {
	pub const USER: &str = "User";
	pub const POST: &str = "Post";
	pub const LIKE: &str = "Like";
}

pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("Blog API")
		.summary("Users, posts and likes for a small blog")
		.description(
			"CRUD endpoints for users, posts and likes. Ownership checks rely on \
			 the `User-Id` header, which is trusted as sent and is not an \
			 authentication mechanism.",
		)
		.tag(Tag {
			name: tag::USER.into(),
			description: Some("User management".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::POST.into(),
			description: Some("Post management".into()),
			..Default::default()
		})
		.tag(Tag {
			name: tag::LIKE.into(),
			description: Some("Like management".into()),
			..Default::default()
		})
		.security_scheme(
			SECURITY_SCHEME_REQUESTER,
			SecurityScheme::ApiKey {
				location: ApiKeyLocation::Header,
				name: REQUESTER_HEADER.into(),
				description: Some("The id of the user making the request".into()),
				extensions: Default::default(),
			},
		)
		.default_response_with::<Json<ErrorResponse>, _>(|res| {
			res.example(ErrorResponse {
				success: false,
				errors: Message::new("post_not_found")
					.content("Post not found")
					.detail("post", 1)
					.into_vec(),
			})
		})
}
