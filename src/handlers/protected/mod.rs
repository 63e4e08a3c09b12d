// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind jwt_auth_middleware, so handlers take an
// `AuthUser` argument. Owners are always taken from that identity, never from
// the request body.

pub mod auth;
pub mod likes;
pub mod media;
pub mod users;
