//! JWT token management
//!
//! Issues and validates the signed, time-boxed admin tokens. The payload
//! carries the admin identity and privilege flag; there is no refresh
//! mechanism, re-login is required after expiry.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Claims carried by an admin access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin id.
    pub sub: i32,
    pub name: String,
    pub username: String,
    pub is_superadmin: bool,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// JWT token manager
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: i64,
}

impl JwtManager {
    #[must_use]
    pub fn new(secret: &str, expires_in: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 seconds tolerance

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        }
    }

    /// Generate an access token for a verified admin identity.
    pub fn issue(&self, admin: &entity::admins::Model) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: admin.id,
            name: admin.name.clone(),
            username: admin.username.clone(),
            is_superadmin: admin.is_superadmin,
            iat: now,
            exp: now + self.expires_in,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("token generation failed: {e}")))
    }

    /// Validate signature and expiry, returning the decoded claims.
    pub fn validate(&self, token: &str) -> Result<AdminClaims> {
        let token_data: TokenData<AdminClaims> =
            decode(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::unauthorized("token expired")
                }
                _ => ApiError::unauthorized("invalid token"),
            })?;
        Ok(token_data.claims)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
#[must_use]
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
