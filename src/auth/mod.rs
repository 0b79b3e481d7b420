//! # Authentication
//!
//! Credential verification (bcrypt), JWT issuing/validation and the axum
//! guard middleware that re-resolves the admin on every request.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{AdminClaims, JwtManager};
pub use middleware::{CurrentAdmin, auth, require_superadmin};
