pub mod docs;
pub mod like;
pub mod model;
pub mod post;
pub mod user;
