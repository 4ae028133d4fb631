use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of the short-lived auth token.
pub const AUTH_TOKEN_TTL_HOURS: i64 = 15;
/// Lifetime of the long-lived refresh token.
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 48;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("invalid token signing method")]
    AlgorithmMismatch,
    #[error("token has expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Verified identity claims carried by a token. Never persisted; validity is
/// determined solely by the signature and the embedded expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Two independently signed tokens for the same subject, with different
/// expiry windows.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub auth_token: String,
    pub refresh_token: String,
}

pub trait TokenHandler: Send + Sync {
    fn new_token(&self, subject: &str, expires_at: DateTime<Utc>) -> Result<String, TokenError>;
    fn validate_token(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256 token handler keyed by the configured secret.
pub struct JwtTokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtTokenHandler {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }
}

impl TokenHandler for JwtTokenHandler {
    fn new_token(&self, subject: &str, expires_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        // the declared signing method must match the configured one before the
        // signature is trusted at all
        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != self.algorithm {
            return Err(TokenError::AlgorithmMismatch);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch,
                _ => TokenError::Malformed,
            })
    }
}

/// Issues the auth/refresh token pair for a subject. Both tokens are valid
/// independently of each other.
pub fn gen_auth_tokens(tokens: &dyn TokenHandler, subject: &str) -> Result<TokenPair, TokenError> {
    let now = Utc::now();
    let auth_token = tokens.new_token(subject, now + Duration::hours(AUTH_TOKEN_TTL_HOURS))?;
    let refresh_token = tokens.new_token(subject, now + Duration::hours(REFRESH_TOKEN_TTL_HOURS))?;

    Ok(TokenPair {
        auth_token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_subject() {
        let handler = JwtTokenHandler::new("test-secret");
        let token = handler
            .new_token("user-1", Utc::now() + Duration::hours(1))
            .unwrap();

        let claims = handler.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let handler = JwtTokenHandler::new("test-secret");
        let token = handler
            .new_token("user-1", Utc::now() - Duration::hours(1))
            .unwrap();

        let err = handler.validate_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let other = JwtTokenHandler::new("other-secret");
        let token = other
            .new_token("user-1", Utc::now() + Duration::hours(1))
            .unwrap();

        let handler = JwtTokenHandler::new("test-secret");
        let err = handler.validate_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn mismatched_algorithm_is_rejected_before_signature_check() {
        // well-formed token, correctly signed with the shared secret, but
        // under a different algorithm than the handler is configured for
        let claims = Claims {
            sub: "user-1".into(),
            iat: Utc::now().timestamp(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let handler = JwtTokenHandler::new("test-secret");
        let err = handler.validate_token(&token).unwrap_err();
        assert!(matches!(err, TokenError::AlgorithmMismatch));
    }

    #[test]
    fn garbage_is_malformed() {
        let handler = JwtTokenHandler::new("test-secret");
        let err = handler.validate_token("not-a-token").unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }

    #[test]
    fn token_pair_tokens_are_independent() {
        let handler = JwtTokenHandler::new("test-secret");
        let pair = gen_auth_tokens(&handler, "user-1").unwrap();

        assert_ne!(pair.auth_token, pair.refresh_token);

        let auth = handler.validate_token(&pair.auth_token).unwrap();
        let refresh = handler.validate_token(&pair.refresh_token).unwrap();
        assert_eq!(auth.sub, "user-1");
        assert_eq!(refresh.sub, "user-1");
        assert!(refresh.exp > auth.exp);
    }
}
