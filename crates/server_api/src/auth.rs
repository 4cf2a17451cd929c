use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::domain::{ClientId, ClientIdentity};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid access code")]
    InvalidAccessCode,
    #[error("invalid or expired session: {0}")]
    InvalidSession(jsonwebtoken::errors::Error),
    #[error("failed to sign session token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("session lifetime of {0} seconds is out of range")]
    InvalidTtl(i64),
}

/// Longest session a token may carry.
pub const MAX_SESSION_TTL_SECONDS: i64 = 366 * 24 * 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct AccessCodeEntry {
    pub id: ClientId,
    pub name: String,
    pub access_code: String,
}

/// Password-only login: each access code maps to exactly one client.
#[derive(Debug, Clone, Default)]
pub struct AccessCodeRegistry {
    entries: Vec<AccessCodeEntry>,
}

impl AccessCodeRegistry {
    pub fn new(entries: Vec<AccessCodeEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn authenticate(&self, access_code: &str) -> Result<ClientIdentity, AuthError> {
        if access_code.is_empty() {
            return Err(AuthError::InvalidAccessCode);
        }
        self.entries
            .iter()
            .find(|entry| entry.access_code == access_code)
            .map(|entry| ClientIdentity {
                id: entry.id.clone(),
                name: entry.name.clone(),
            })
            .ok_or(AuthError::InvalidAccessCode)
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    name: String,
    iat: i64,
    exp: i64,
}

pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl SessionIssuer {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds: cfg.ttl_seconds,
        }
    }

    pub fn issue(&self, identity: &ClientIdentity) -> Result<String, AuthError> {
        if !(1..=MAX_SESSION_TTL_SECONDS).contains(&self.ttl_seconds) {
            return Err(AuthError::InvalidTtl(self.ttl_seconds));
        }
        let now = Utc::now();
        let exp = TimeDelta::try_seconds(self.ttl_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::InvalidTtl(self.ttl_seconds))?;
        let claims = SessionClaims {
            sub: identity.id.to_string(),
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<ClientIdentity, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map_err(AuthError::InvalidSession)?;
        Ok(ClientIdentity {
            id: ClientId(data.claims.sub),
            name: data.claims.name,
        })
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
