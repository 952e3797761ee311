//! JWT cookie authentication.
//!
//! Callers carry an HTTP-only `token` cookie signed with HS256. The extractor
//! yields the caller's id and role; handlers gate on roles explicitly via
//! [`AuthUser::require`]. Tokens are minted out-of-band with the shared
//! secret; this service only verifies them.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Delivery,
    Admin,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub exp: i64,
}

#[derive(Clone)]
pub struct AuthConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthConfig {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_token(&self, user_id: Uuid, role: Role, ttl: Duration) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

/// The authenticated caller, extracted from the `token` cookie.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require(&self, allowed: &[Role]) -> Result<&Self, AppError> {
        if allowed.contains(&self.role) {
            Ok(self)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

fn extract(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| AppError::Internal("auth config not registered".to_string()))?;
    let cookie = req.cookie(TOKEN_COOKIE).ok_or(AppError::Unauthorized)?;
    let claims = config.verify(cookie.value())?;
    Ok(AuthUser {
        id: claims.sub,
        role: claims.role,
    })
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
