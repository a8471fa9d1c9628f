/// Token service - issuing and verifying identity tokens
use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issues and verifies signed, time-bounded identity tokens.
///
/// Tokens are stateless and self-verifying; the server keeps no session
/// state and never persists a token.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: String,
    validity: Duration,
}

/// Decoded token payload. `email` is the verified subject the
/// authorization gate compares against resource owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenService {
    pub fn new(secret: String, validity_hours: u64) -> Self {
        Self {
            secret,
            validity: Duration::hours(validity_hours as i64),
        }
    }

    /// Sign a token for `email`, expiring after the configured validity
    /// (one hour by default)
    pub fn issue(&self, email: &str) -> Result<String> {
        self.issue_with_validity(email, self.validity)
    }

    /// Sign a token with an explicit validity window. Exposed so tests
    /// can mint already-expired tokens.
    pub fn issue_with_validity(&self, email: &str, validity: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        Ok(encode(&Header::default(), &claims, &encoding_key)?)
    }

    /// Verify signature and expiry, returning the decoded claims.
    /// Malformed input, a foreign signature, and an expired token all
    /// fail with an error, never a panic.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
