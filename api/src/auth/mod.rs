use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use common::config::CONFIG;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identity of the authenticated dealer, pulled out of the bearer token.
/// Every mutation on the inventory is scoped to this id.
pub struct AuthDealer(pub i32);

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(dealer_id: i32) -> Result<String, ApiError> {
    Ok(sign(
        dealer_id,
        CONFIG.auth.jwt_secret.as_bytes(),
        CONFIG.auth.token_ttl_hours,
    )?)
}

fn sign(
    dealer_id: i32,
    secret: &[u8],
    ttl_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: dealer_id.to_string(),
        iat: now,
        exp: now + ttl_hours * 3600,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

fn verify(token: &str, secret: &[u8]) -> Result<Claims, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Salted sha256 digest stored as `salt$hex`. Kept deliberately simple, the
/// credential mechanics are an interface here, not a subsystem.
pub fn hash_password(password: &str) -> String {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    let digest = password_digest(&salt, password);
    format!("{salt}${digest}")
}

pub fn verify_password(stored: &str, password: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, want)) => password_digest(salt, password) == want,
        None => false,
    }
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"|");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl<S> FromRequestParts<S> for AuthDealer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::MissingToken)?;

        let claims =
            verify(token, CONFIG.auth.jwt_secret.as_bytes()).map_err(|_| ApiError::InvalidToken)?;
        let dealer_id = claims.sub.parse().map_err(|_| ApiError::InvalidToken)?;
        Ok(AuthDealer(dealer_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn token_round_trip() {
        let token = sign(42, SECRET, 1).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "42");
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(verify(&token, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(42, SECRET, 1).unwrap();
        assert!(verify(&token, b"other-secret").is_err());
    }

    #[test]
    fn password_verify_accepts_original_and_rejects_others() {
        let stored = hash_password("hunter2");
        assert!(verify_password(&stored, "hunter2"));
        assert!(!verify_password(&stored, "hunter3"));
        assert!(!verify_password("garbage-without-salt", "hunter2"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("hunter2"), hash_password("hunter2"));
    }
}
