//! Accounts and sign-in sessions.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Stored account record. Never leaves the service as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    #[ts(type = "number")]
    pub created_at: i64,
}

impl From<&UserAccount> for UserInfo {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

/// A sign-in session backing a bearer token.
///
/// `started_at` is the session start time: the live conversation only shows
/// messages created at or after it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub id: String,
    pub user_id: String,
    pub started_at: i64,
    pub expires_at: i64,
}

impl AuthSession {
    pub fn new(user_id: impl Into<String>, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            started_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub user_id: String,
    pub session_id: String,
    pub session_started_at: i64,
}

/// Current session as reported to the client.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct SessionInfo {
    pub session_id: String,
    pub user: UserInfo,
    #[ts(type = "number")]
    pub started_at: i64,
    #[ts(type = "number")]
    pub expires_at: i64,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct SignInResponse {
    pub token: String,
    pub session: SessionInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry() {
        let session = AuthSession::new("u-1", 1_000, 500);
        assert_eq!(session.started_at, 1_000);
        assert!(!session.is_expired(1_499));
        assert!(session.is_expired(1_500));
    }

    #[test]
    fn test_user_info_hides_password_hash() {
        let account = UserAccount {
            id: "u-1".to_string(),
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: 1,
        };
        let json = serde_json::to_string(&UserInfo::from(&account)).unwrap();
        assert!(!json.contains("argon2"));
    }
}
