//! Admin credentials and bearer tokens.
//!
//! Passwords are stored as hex SHA-256 digests. Tokens are HS256 JWTs
//! carrying the admin id (`sub`), email and expiry.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{Error, Result};

/// Hex-encoded SHA-256 of a password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Checks a password against a stored digest in constant time.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let computed = hash_password(password);
    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

fn issue_error(err: jsonwebtoken::errors::Error) -> Error {
    Error::TokenIssue(err.to_string())
}

/// JWT claims issued to an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id
    pub sub: String,
    pub email: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

/// Issues and verifies admin tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TimeDelta::try_hours(ttl_hours).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Issues a token for an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be signed.
    pub fn issue(&self, admin_id: &str, email: &str) -> Result<String> {
        let exp = Utc::now()
            .checked_add_signed(self.ttl)
            .map_or(i64::MAX, |t| t.timestamp());

        self.sign(&Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            exp,
        })
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(issue_error)
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] with "Token expired" or "Invalid token".
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                Err(Error::unauthorized("Token expired"))
            },
            Err(_) => Err(Error::unauthorized("Invalid token")),
        }
    }
}
