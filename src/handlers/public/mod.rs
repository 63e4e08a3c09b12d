// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, registration and read-only listings of media and likes.
// Registration may still look at an optional bearer token to allow admins to
// create other admins.

pub mod auth;
pub mod likes;
pub mod media;
pub mod users;
