//! Account sign-up, sign-in and bearer session handling.

use crate::auth::{hash_password, verify_password};
use crate::models::{
    AuthContext, AuthSession, SessionInfo, SignInResponse, UserAccount, UserInfo,
};
use crate::{AppCore, Result, SoulmateError};
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

pub const MIN_PASSWORD_CHARS: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Trim and lower-case an e-mail address, checking it looks like
/// `local@domain`.
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(SoulmateError::validation("email", "Invalid email address"));
    }
    Ok(email)
}

/// Register a new account.
pub async fn sign_up(
    core: &Arc<AppCore>,
    email: &str,
    password: &str,
    password_confirmation: Option<&str>,
) -> Result<UserInfo> {
    let email = normalize_email(email)?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(SoulmateError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_CHARS),
        ));
    }
    if let Some(confirmation) = password_confirmation
        && confirmation != password
    {
        return Err(SoulmateError::validation(
            "password_confirmation",
            "Passwords do not match",
        ));
    }

    let users = &core.storage.users;
    if users.email_exists(&email).context("Failed to look up email")? {
        return Err(SoulmateError::Conflict(format!(
            "Email {} is already registered",
            email
        )));
    }

    let password = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")??;

    let account = UserAccount {
        id: uuid::Uuid::new_v4().to_string(),
        email,
        password_hash,
        created_at: chrono::Utc::now().timestamp_millis(),
    };
    let created = users
        .create(&account)
        .with_context(|| format!("Failed to create account {}", account.email))?;
    if !created {
        return Err(SoulmateError::Conflict(format!(
            "Email {} is already registered",
            account.email
        )));
    }

    info!(user_id = %account.id, "Account created");
    Ok(UserInfo::from(&account))
}

/// Verify credentials and open a new session.
pub async fn sign_in(core: &Arc<AppCore>, email: &str, password: &str) -> Result<SignInResponse> {
    let email = normalize_email(email)
        .map_err(|_| SoulmateError::unauthorized(INVALID_CREDENTIALS))?;
    let account = core
        .storage
        .users
        .get_by_email(&email)
        .context("Failed to load account")?
        .ok_or_else(|| SoulmateError::unauthorized(INVALID_CREDENTIALS))?;

    let candidate = password.to_string();
    let stored_hash = account.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
        .await
        .context("Password verification task failed")?;
    if !matches {
        debug!(user_id = %account.id, "Password mismatch");
        return Err(SoulmateError::unauthorized(INVALID_CREDENTIALS));
    }

    let now = chrono::Utc::now().timestamp_millis();
    let session = AuthSession::new(&account.id, now, core.settings.auth.token_ttl_ms());
    core.storage
        .auth_sessions
        .save(&session)
        .context("Failed to store session")?;

    let token = core
        .tokens
        .issue(&account.id, &session.id, now, session.expires_at)?;

    info!(user_id = %account.id, session_id = %session.id, "Signed in");
    Ok(SignInResponse {
        token,
        session: session_info(&session, &account),
    })
}

/// Resolve a bearer token into the caller's identity.
pub async fn authenticate(core: &Arc<AppCore>, token: &str) -> Result<AuthContext> {
    let claims = core.tokens.verify(token).map_err(|e| {
        debug!(error = %e, "Token rejected");
        SoulmateError::unauthorized("Invalid token")
    })?;

    let session = load_active_session(core, &claims.sid).await?;
    if session.user_id != claims.sub {
        return Err(SoulmateError::unauthorized("Session does not match token"));
    }

    Ok(AuthContext {
        user_id: session.user_id,
        session_id: session.id,
        session_started_at: session.started_at,
    })
}

/// Describe the current session.
pub async fn current_session(core: &Arc<AppCore>, session_id: &str) -> Result<SessionInfo> {
    let session = load_active_session(core, session_id).await?;
    let account = load_account(core, &session.user_id).await?;
    Ok(session_info(&session, &account))
}

/// End a session; its token stops working immediately.
pub async fn sign_out(core: &Arc<AppCore>, session_id: &str) -> Result<()> {
    core.storage
        .auth_sessions
        .delete(session_id)
        .with_context(|| format!("Failed to delete session {}", session_id))?;
    info!(session_id, "Signed out");
    Ok(())
}

/// Reset the session start time to now, which clears the live conversation.
pub async fn restart_session(core: &Arc<AppCore>, session_id: &str) -> Result<SessionInfo> {
    let mut session = load_active_session(core, session_id).await?;
    let now = chrono::Utc::now().timestamp_millis();
    session.started_at = now.max(session.started_at);
    core.storage
        .auth_sessions
        .save(&session)
        .context("Failed to update session")?;

    let account = load_account(core, &session.user_id).await?;
    Ok(session_info(&session, &account))
}

/// All accounts, oldest first.
pub async fn list_users(core: &Arc<AppCore>) -> Result<Vec<UserInfo>> {
    let accounts = core.storage.users.list().context("Failed to list users")?;
    Ok(accounts.iter().map(UserInfo::from).collect())
}

pub async fn find_user_by_email(core: &Arc<AppCore>, email: &str) -> Result<UserInfo> {
    let email = normalize_email(email)?;
    core.storage
        .users
        .get_by_email(&email)
        .context("Failed to load account")?
        .map(|account| UserInfo::from(&account))
        .ok_or_else(|| SoulmateError::not_found(format!("User {}", email)))
}

async fn load_active_session(core: &Arc<AppCore>, session_id: &str) -> Result<AuthSession> {
    let session = core
        .storage
        .auth_sessions
        .get(session_id)
        .context("Failed to load session")?
        .ok_or_else(|| SoulmateError::unauthorized("Session not found"))?;

    if session.is_expired(chrono::Utc::now().timestamp_millis()) {
        core.storage
            .auth_sessions
            .delete(&session.id)
            .context("Failed to drop expired session")?;
        return Err(SoulmateError::unauthorized("Session expired"));
    }
    Ok(session)
}

async fn load_account(core: &Arc<AppCore>, user_id: &str) -> Result<UserAccount> {
    core.storage
        .users
        .get(user_id)
        .context("Failed to load account")?
        .ok_or_else(|| SoulmateError::unauthorized("Account not found"))
}

fn session_info(session: &AuthSession, account: &UserAccount) -> SessionInfo {
    SessionInfo {
        session_id: session.id.clone(),
        user: UserInfo::from(account),
        started_at: session.started_at,
        expires_at: session.expires_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_core;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Taro@Example.COM ").unwrap(), "taro@example.com");
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("a@").is_err());
        assert!(normalize_email("a b@example.com").is_err());
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let (core, _temp_dir) = test_core().await;

        let short = sign_up(&core, "a@example.com", "12345", None).await;
        assert!(matches!(short, Err(SoulmateError::Validation(e)) if e.field == "password"));

        let mismatch = sign_up(&core, "a@example.com", "123456", Some("654321")).await;
        assert!(
            matches!(mismatch, Err(SoulmateError::Validation(e)) if e.field == "password_confirmation")
        );

        sign_up(&core, "a@example.com", "123456", Some("123456"))
            .await
            .unwrap();
        let duplicate = sign_up(&core, "A@example.com", "abcdef", None).await;
        assert!(matches!(duplicate, Err(SoulmateError::Conflict(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sign_up_same_email_is_conflict() {
        let (core, _temp_dir) = test_core().await;

        for round in 0..5 {
            let email = format!("race{}@example.com", round);
            let (first, second) = tokio::join!(
                sign_up(&core, &email, "password", None),
                sign_up(&core, &email, "password", None)
            );

            let results = [first, second];
            let created = results.iter().filter(|r| r.is_ok()).count();
            let conflicts = results
                .iter()
                .filter(|r| matches!(r, Err(SoulmateError::Conflict(_))))
                .count();
            assert_eq!((created, conflicts), (1, 1), "round {}", round);
        }
        assert_eq!(list_users(&core).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_sign_in_and_authenticate() {
        let (core, _temp_dir) = test_core().await;
        let user = sign_up(&core, "a@example.com", "password", None).await.unwrap();

        let wrong = sign_in(&core, "a@example.com", "nope").await;
        assert!(matches!(wrong, Err(SoulmateError::Unauthorized(_))));
        let unknown = sign_in(&core, "b@example.com", "password").await;
        assert!(matches!(unknown, Err(SoulmateError::Unauthorized(_))));

        let signed_in = sign_in(&core, "A@EXAMPLE.com", "password").await.unwrap();
        assert_eq!(signed_in.session.user.id, user.id);

        let context = authenticate(&core, &signed_in.token).await.unwrap();
        assert_eq!(context.user_id, user.id);
        assert_eq!(context.session_id, signed_in.session.session_id);
        assert_eq!(context.session_started_at, signed_in.session.started_at);

        assert!(authenticate(&core, "garbage").await.is_err());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let (core, _temp_dir) = test_core().await;
        sign_up(&core, "a@example.com", "password", None).await.unwrap();
        let signed_in = sign_in(&core, "a@example.com", "password").await.unwrap();

        sign_out(&core, &signed_in.session.session_id).await.unwrap();
        let result = authenticate(&core, &signed_in.token).await;
        assert!(matches!(result, Err(SoulmateError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_restart_moves_start_forward() {
        let (core, _temp_dir) = test_core().await;
        sign_up(&core, "a@example.com", "password", None).await.unwrap();
        let signed_in = sign_in(&core, "a@example.com", "password").await.unwrap();
        let session_id = signed_in.session.session_id.clone();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let restarted = restart_session(&core, &session_id).await.unwrap();
        assert!(restarted.started_at > signed_in.session.started_at);

        let context = authenticate(&core, &signed_in.token).await.unwrap();
        assert_eq!(context.session_started_at, restarted.started_at);
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let (core, _temp_dir) = test_core().await;
        let user = sign_up(&core, "a@example.com", "password", None).await.unwrap();

        let now = chrono::Utc::now().timestamp_millis();
        let mut session = AuthSession::new(&user.id, now - 10_000, 5_000);
        session.expires_at = now - 1;
        core.storage.auth_sessions.save(&session).unwrap();
        let token = core
            .tokens
            .issue(&user.id, &session.id, now, now + 60_000)
            .unwrap();

        let result = authenticate(&core, &token).await;
        assert!(matches!(result, Err(SoulmateError::Unauthorized(_))));
        assert!(core.storage.auth_sessions.get(&session.id).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let (core, _temp_dir) = test_core().await;
        let user = sign_up(&core, "a@example.com", "password", None).await.unwrap();

        assert_eq!(find_user_by_email(&core, "A@example.com").await.unwrap(), user);
        assert!(matches!(
            find_user_by_email(&core, "x@example.com").await,
            Err(SoulmateError::NotFound(_))
        ));
        assert_eq!(list_users(&core).await.unwrap().len(), 1);
    }
}
