//! Auth service for JWT issuance and verification.
//!
//! Tokens are HS256-signed and carry the user's id, email and name. There is
//! no refresh flow and no revocation list; a token is valid until `exp`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use showcase_models::User;

use crate::config::AuthConfig;
use crate::error::Result;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// Service for session token handling.
#[derive(Clone)]
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds: i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX),
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a signed token for a user.
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.full_name.clone(),
            iat,
            exp: iat.saturating_add(self.ttl_seconds),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }

    #[cfg(test)]
    pub(crate) fn sign_claims(&self, claims: &Claims) -> String {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).unwrap()
    }
}
