//! Session lifecycle: minting, refreshing and revoking token pairs.
//!
//! A pair moves Bound → Refreshed | Revoked → Expired. Binding lives in the
//! Redis ledger; revocation is a blacklist entry on the access token; expiry
//! is Redis TTL doing its job.

pub mod password;
pub mod store;
pub mod tokens;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::session::Session;
use crate::models::user::UserPublic;
use crate::store::postgres::PgStore;

use store::SessionStore;
use tokens::TokenCodec;

pub struct SessionManager {
    codec: TokenCodec,
    store: SessionStore,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionManager {
    pub fn new(codec: TokenCodec, store: SessionStore, config: &Config) -> Self {
        Self {
            codec,
            store,
            access_ttl: Duration::minutes(config.access_token_ttl_minutes),
            refresh_ttl: Duration::minutes(config.refresh_token_ttl_minutes),
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Mint a fresh access/refresh pair and bind it in the ledger. No prior
    /// state required.
    pub async fn create_session(&self, user: &UserPublic) -> Result<Session, AppError> {
        let now = Utc::now();
        let access_expires = now + self.access_ttl;
        let refresh_expires = now + self.refresh_ttl;

        let access_token = self.codec.create_access(user, access_expires)?;
        let refresh_token = self.codec.create_refresh(user.uuid, refresh_expires)?;

        self.store
            .bind(
                &refresh_token,
                &access_token,
                user.uuid,
                self.refresh_ttl.num_seconds() as u64,
            )
            .await?;

        Ok(Session::new(access_token, refresh_token, access_expires))
    }

    /// Blacklist an access token for its remaining lifetime. When the token
    /// no longer decodes the remaining lifetime is zero, so the entry evicts
    /// immediately. Safe to call repeatedly.
    pub async fn logout(&self, access_token: &str) -> Result<(), AppError> {
        let remaining = match self.codec.decode(access_token) {
            Some(claims) => claims.exp - Utc::now().timestamp(),
            None => 0,
        };
        self.store.blacklist(access_token, remaining).await?;
        Ok(())
    }

    /// Revoke every live session of a user. Each discovered access token is
    /// blacklisted for its exact remaining lifetime; tokens that no longer
    /// decode fall back to the full access window as an upper bound.
    pub async fn logout_all(&self, user_id: Uuid) -> Result<(), AppError> {
        let now = Utc::now().timestamp();
        for access_token in self.store.find_all_sessions(user_id).await? {
            let remaining = match self.codec.decode(&access_token) {
                Some(claims) => claims.exp - now,
                None => self.access_ttl.num_seconds(),
            };
            self.store.blacklist(&access_token, remaining).await?;
        }
        Ok(())
    }

    /// Exchange a bound pair for a brand-new session. Checks run in order and
    /// every failure collapses to `INVALID_TOKEN` — the caller never learns
    /// which one tripped.
    pub async fn refresh_session(
        &self,
        db: &PgStore,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, AppError> {
        let claims = self
            .codec
            .decode(refresh_token)
            .ok_or(AppError::InvalidToken)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
        let user = db
            .get_user(user_id)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if self.store.is_blacklisted(access_token).await? {
            return Err(AppError::InvalidToken);
        }
        // Consuming the entry (rather than just reading it) makes the pair
        // single-use even under concurrent refresh attempts.
        if !self
            .store
            .consume(refresh_token, access_token, user_id)
            .await?
        {
            return Err(AppError::InvalidToken);
        }

        self.logout(access_token).await?;
        self.create_session(&user).await
    }
}
