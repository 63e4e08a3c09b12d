pub mod like;
pub mod media_item;
pub mod user;

pub use like::Like;
pub use media_item::{MediaChanges, MediaItem, MediaItemView, NewMediaItem};
pub use user::{NewUser, User, UserChanges, UserCredentials, ADMIN_LEVEL, STANDARD_LEVEL};
