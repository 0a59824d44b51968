//! Bearer tokens.
//!
//! Access tokens are short-lived HS256 JWTs carrying [`Claims`]. Refresh
//! tokens are opaque random strings handed to the client once; the server
//! keeps only their SHA-256 digest in `user_sessions`.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use vetrecords_core::types::DbId;

use crate::config::env_or;

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the authenticated user.
    pub sub: DbId,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Random token id.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env var                   | Default  |
    /// |---------------------------|----------|
    /// | `JWT_SECRET`              | required |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | `15`     |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | `7`      |
    ///
    /// # Panics
    ///
    /// When `JWT_SECRET` is missing or blank, or a lifetime is not an integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(
            !secret.trim().is_empty(),
            "JWT_SECRET must be set to a non-empty value"
        );

        Self {
            secret,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_or("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }

    /// Sign a fresh access token for `user_id`.
    pub fn issue_access_token(&self, user_id: DbId) -> Result<String, jsonwebtoken::errors::Error> {
        let issued = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: issued.timestamp(),
            exp: (issued + Duration::minutes(self.access_token_expiry_mins)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature and expiry of `token` and return its claims.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }
}

/// A newly minted refresh token.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    /// Returned to the client, never stored.
    pub plaintext: String,
    /// Persisted in `user_sessions.refresh_token_hash`.
    pub hash: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let hash = hash_refresh_token(&plaintext);
        Self { plaintext, hash }
    }
}

/// Lowercase hex SHA-256 of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
