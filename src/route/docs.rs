use std::sync::Arc;

use aide::{
	axum::{routing::get_with, ApiRouter, IntoApiResponse},
	openapi::OpenApi,
};
use axum::{response::IntoResponse, Extension};

pub fn routes() -> ApiRouter {
	ApiRouter::new().api_route(
		"/api.json",
		get_with(serve_docs, |op| {
			op.summary("OpenAPI document")
				.description("Returns the OpenAPI document describing this API.")
		}),
	)
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
	axum::Json(api.as_ref()).into_response()
}
