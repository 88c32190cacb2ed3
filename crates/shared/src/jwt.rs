//! JWT token utilities for admin and member sessions.
//!
//! Tokens are signed with HS256 using a shared secret. Access and refresh
//! tokens carry a `token_type` claim so one can never stand in for the
//! other, and a `role` claim deciding which surface the token opens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Account role carried in a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenRole {
    Admin,
    Member,
}

/// Type of JWT token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT token claims.
///
/// The subject is the account id; email and role ride along so handlers
/// can resolve caller identity without an extra lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Account role (admin or member)
    pub role: TokenRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID (unique token identifier)
    pub jti: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Signing and validation keys plus token lifetimes.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Access token expiration in seconds (default: 900 = 15 minutes)
    pub access_token_expiry_secs: i64,
    /// Refresh token expiration in seconds (default: 604800 = 7 days)
    pub refresh_token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("refresh_token_expiry_secs", &self.refresh_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtKeys {
    /// Creates keys from a shared secret with the default leeway.
    pub fn new(secret: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        Self::with_leeway(
            secret,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            DEFAULT_LEEWAY_SECS,
        )
    }

    /// Creates keys from a shared secret with a custom clock-skew leeway.
    pub fn with_leeway(
        secret: &str,
        access_token_expiry_secs: i64,
        refresh_token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry_secs,
            refresh_token_expiry_secs,
            leeway_secs,
        }
    }

    /// Generates an access token. Returns the token and its jti.
    pub fn generate_access_token(
        &self,
        account_id: Uuid,
        email: &str,
        role: TokenRole,
    ) -> Result<(String, String), JwtError> {
        self.generate_token(
            account_id,
            email,
            role,
            TokenType::Access,
            self.access_token_expiry_secs,
        )
    }

    /// Generates a refresh token. Returns the token and its jti.
    pub fn generate_refresh_token(
        &self,
        account_id: Uuid,
        email: &str,
        role: TokenRole,
    ) -> Result<(String, String), JwtError> {
        self.generate_token(
            account_id,
            email,
            role,
            TokenType::Refresh,
            self.refresh_token_expiry_secs,
        )
    }

    fn generate_token(
        &self,
        account_id: Uuid,
        email: &str,
        role: TokenRole,
        token_type: TokenType,
        expiry_secs: i64,
    ) -> Result<(String, String), JwtError> {
        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            role,
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
            token_type,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Validates a token of either type and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }

    /// Validates a refresh token specifically.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }
}

/// Extracts the account ID from validated claims.
pub fn subject_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> JwtKeys {
        JwtKeys::with_leeway("test_secret_for_club_site_tokens", 900, 604800, 0)
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let keys = test_keys();
        let id = Uuid::new_v4();

        let (token, jti) = keys
            .generate_access_token(id, "a@club.org", TokenRole::Member)
            .unwrap();
        let claims = keys.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "a@club.org");
        assert_eq!(claims.role, TokenRole::Member);
        assert_eq!(claims.jti, jti);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let keys = test_keys();
        let (token, _) = keys
            .generate_access_token(Uuid::new_v4(), "a@club.org", TokenRole::Admin)
            .unwrap();

        assert!(matches!(
            keys.validate_refresh_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let keys = test_keys();
        let (token, _) = keys
            .generate_refresh_token(Uuid::new_v4(), "a@club.org", TokenRole::Member)
            .unwrap();

        assert!(matches!(
            keys.validate_access_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let keys = JwtKeys::with_leeway("test_secret_for_club_site_tokens", -10, 604800, 0);
        let (token, _) = keys
            .generate_access_token(Uuid::new_v4(), "a@club.org", TokenRole::Member)
            .unwrap();

        assert!(matches!(
            keys.validate_access_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let keys = test_keys();
        let other = JwtKeys::with_leeway("a_completely_different_secret", 900, 604800, 0);
        let (token, _) = keys
            .generate_access_token(Uuid::new_v4(), "a@club.org", TokenRole::Member)
            .unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let keys = test_keys();
        assert!(keys.validate_token("not_a_jwt").is_err());
    }

    #[test]
    fn test_role_claim_round_trip() {
        let keys = test_keys();
        let (token, _) = keys
            .generate_access_token(Uuid::new_v4(), "root@club.org", TokenRole::Admin)
            .unwrap();
        let claims = keys.validate_access_token(&token).unwrap();
        assert_eq!(claims.role, TokenRole::Admin);
    }

    #[test]
    fn test_subject_id() {
        let keys = test_keys();
        let id = Uuid::new_v4();
        let (token, _) = keys
            .generate_access_token(id, "a@club.org", TokenRole::Member)
            .unwrap();
        let claims = keys.validate_access_token(&token).unwrap();
        assert_eq!(subject_id(&claims).unwrap(), id);
    }

    #[test]
    fn test_unique_jti_per_token() {
        let keys = test_keys();
        let id = Uuid::new_v4();
        let (_, jti1) = keys
            .generate_access_token(id, "a@club.org", TokenRole::Member)
            .unwrap();
        let (_, jti2) = keys
            .generate_access_token(id, "a@club.org", TokenRole::Member)
            .unwrap();
        assert_ne!(jti1, jti2);
    }

    #[test]
    fn test_token_role_serialization() {
        assert_eq!(serde_json::to_string(&TokenRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&TokenRole::Member).unwrap(),
            "\"member\""
        );
    }
}
