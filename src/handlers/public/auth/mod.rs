// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login; // POST /api/auth/login - verify credentials and get JWT

pub use login::login_post;
