// handlers/protected/auth/mod.rs - Authenticated session handlers

pub mod me; // GET /api/auth/me - identity carried by the current token

pub use me::me_get;
