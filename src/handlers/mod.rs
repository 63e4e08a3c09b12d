// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) → Protected (bearer token required)
pub mod protected; // Tier 2: JWT authentication required, mounted behind jwt_auth_middleware
pub mod public; // Tier 1: No authentication required
