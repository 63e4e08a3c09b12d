pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser, OptionalAuthUser};
pub use extract::{ApiJson, ApiMultipart, ApiPath};
pub use response::{Ack, ApiResponse, ApiResult};
