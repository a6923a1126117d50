use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use uuid::Uuid;

const BLACKLIST_PREFIX: &str = "bl:";

/// Redis-backed session ledger and token blacklist.
///
/// A ledger entry keyed `{refresh}:{access}:{user_id}` is the sole proof that
/// a token pair is live; a `bl:{access}` entry makes an access token unusable
/// until its natural expiry. JWTs are base64url so the `:` separators are
/// unambiguous.
#[derive(Clone)]
pub struct SessionStore {
    redis: ConnectionManager,
}

impl SessionStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    fn ledger_key(refresh_token: &str, access_token: &str, user_id: Uuid) -> String {
        format!("{refresh_token}:{access_token}:{user_id}")
    }

    pub async fn bind(
        &self,
        refresh_token: &str,
        access_token: &str,
        user_id: Uuid,
        ttl_secs: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.clone();
        conn.set_ex(
            Self::ledger_key(refresh_token, access_token, user_id),
            user_id.to_string(),
            ttl_secs,
        )
        .await
    }

    pub async fn is_bound(
        &self,
        refresh_token: &str,
        access_token: &str,
        user_id: Uuid,
    ) -> Result<bool, redis::RedisError> {
        let mut conn = self.redis.clone();
        conn.exists(Self::ledger_key(refresh_token, access_token, user_id))
            .await
    }

    /// Atomically delete the ledger entry, reporting whether it existed.
    /// Two concurrent refreshes of the same pair race on this DEL; only one
    /// sees `true`, which makes refresh single-use.
    pub async fn consume(
        &self,
        refresh_token: &str,
        access_token: &str,
        user_id: Uuid,
    ) -> Result<bool, redis::RedisError> {
        let mut conn = self.redis.clone();
        let removed: i64 = conn
            .del(Self::ledger_key(refresh_token, access_token, user_id))
            .await?;
        Ok(removed > 0)
    }

    /// TTL clamps to one second: a token at or past expiry still gets an
    /// entry, which the store evicts almost immediately.
    pub async fn blacklist(
        &self,
        access_token: &str,
        ttl_secs: i64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.clone();
        conn.set_ex(
            format!("{BLACKLIST_PREFIX}{access_token}"),
            access_token,
            ttl_secs.max(1) as u64,
        )
        .await
    }

    pub async fn is_blacklisted(&self, access_token: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.redis.clone();
        conn.exists(format!("{BLACKLIST_PREFIX}{access_token}"))
            .await
    }

    /// Scan the ledger for every live pair of a user, returning the access
    /// tokens embedded in the matching keys.
    pub async fn find_all_sessions(&self, user_id: Uuid) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.redis.clone();
        let pattern = format!("*:*:{user_id}");
        let mut keys: Vec<String> = Vec::new();
        {
            let mut iter: redis::AsyncIter<String> = conn.scan_match(&pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }
        Ok(keys
            .iter()
            .filter_map(|key| key.split(':').nth(1))
            .map(String::from)
            .collect())
    }
}
