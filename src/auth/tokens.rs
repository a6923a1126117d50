use anyhow::Context;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserPublic;

/// Claims carried by every token this service signs.
///
/// Access tokens embed the public user snapshot in `data` so authenticated
/// requests need no user lookup; refresh tokens carry only the subject — they
/// are looked up in the ledger, not trusted on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds). Enforced at decode time.
    pub exp: i64,
    /// Subject — the user UUID.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<UserPublic>,
}

/// Signs and verifies tokens with one shared secret. Constructed once from
/// config and injected wherever tokens are handled.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    pub fn create_access(
        &self,
        user: &UserPublic,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<String> {
        let claims = Claims {
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            sub: user.uuid.to_string(),
            data: Some(user.clone()),
        };
        jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .context("failed to sign access token")
    }

    pub fn create_refresh(&self, sub: Uuid, expires_at: DateTime<Utc>) -> anyhow::Result<String> {
        let claims = Claims {
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            sub: sub.to_string(),
            data: None,
        };
        jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .context("failed to sign refresh token")
    }

    /// Verify signature and expiry. Malformed, tampered and expired tokens
    /// all collapse to `None` — callers never learn which check failed.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::new(self.algorithm))
            .map(|data| data.claims)
            .ok()
    }
}
