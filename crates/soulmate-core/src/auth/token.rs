use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Auth session id
    pub sid: String,
    pub iat: i64,
    /// Expiry in seconds since the epoch
    pub exp: i64,
}

/// HS256 signer and verifier for bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for a session. Times are milliseconds since the epoch.
    pub fn issue(&self, user_id: &str, session_id: &str, now_ms: i64, expires_at_ms: i64) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            iat: now_ms / 1000,
            exp: expires_at_ms / 1000,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = TokenSigner::new("test-secret");
        let now = now_ms();
        let token = signer.issue("u-1", "s-1", now, now + 60_000).unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.sid, "s-1");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let now = now_ms();
        let token = TokenSigner::new("a")
            .issue("u-1", "s-1", now, now + 60_000)
            .unwrap();
        assert!(TokenSigner::new("b").verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = TokenSigner::new("test-secret");
        let now = now_ms();
        let token = signer
            .issue("u-1", "s-1", now - 120_000, now - 60_000)
            .unwrap();
        assert!(signer.verify(&token).is_err());
    }
}
