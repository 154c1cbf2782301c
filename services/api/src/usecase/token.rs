use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const ACCESS_TOKEN_TYPE: &str = "access_token";

/// JWT claims for uuid-bearing tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct UuidClaims {
    pub uuid: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Issue a signed token carrying `uuid` and `token_type`, expiring after
/// `duration`.
pub fn issue_uuid_token(
    uuid: &str,
    token_type: &str,
    duration: Duration,
    secret: &str,
) -> Result<String, ApiError> {
    let claims = UuidClaims {
        uuid: uuid.to_owned(),
        token_type: token_type.to_owned(),
        exp: now_secs() + duration.as_secs(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

/// Validate signature and expiry, returning the claims. Any failure is
/// `Unauthorized` — the caller never learns why a token was rejected.
pub fn validate_uuid_token(token: &str, secret: &str) -> Result<UuidClaims, ApiError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<UuidClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::Unauthorized)?;

    Ok(data.claims)
}
