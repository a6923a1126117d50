use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issued token pair. Never persisted as a row — the Redis ledger entry is
/// the only server-side trace, and a refresh supersedes rather than mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry instant of the access token.
    pub expires_in: DateTime<Utc>,
    pub token_type: String,
}

impl Session {
    pub fn new(access_token: String, refresh_token: String, expires_in: DateTime<Utc>) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_type_is_bearer() {
        let session = Session::new("a".into(), "r".into(), Utc::now());
        assert_eq!(session.token_type, "bearer");
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["token_type"], "bearer");
        assert_eq!(value["access_token"], "a");
        assert_eq!(value["refresh_token"], "r");
    }
}
