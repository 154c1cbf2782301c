pub mod auth;
pub mod children;
pub mod expenditure;
pub mod maintenance;

use axum::http::{HeaderMap, header};
use base64::Engine as _;

use crate::error::ApiError;
use crate::usecase::token::{ACCESS_TOKEN_TYPE, validate_uuid_token};

/// Validate the Bearer access token and require its uuid claim to match
/// `parent_uuid`. Missing/invalid token → 401, uuid mismatch → 403.
pub(crate) fn authorize_parent(
    headers: &HeaderMap,
    jwt_secret: &str,
    parent_uuid: &str,
) -> Result<(), ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let claims = validate_uuid_token(token, jwt_secret)?;
    if claims.token_type != ACCESS_TOKEN_TYPE {
        return Err(ApiError::Unauthorized);
    }
    if claims.uuid != parent_uuid {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}

/// Whether `s` is a well-formed phone number (exactly 11 digits).
pub(crate) fn valid_phone_number(s: &str) -> bool {
    s.len() == 11 && s.chars().all(|c| c.is_ascii_digit())
}

/// Decode a base64 profile payload, tolerating a `data:image/...;base64,`
/// prefix as sent by browser clients.
pub(crate) fn decode_profile(encoded: &str) -> Result<Vec<u8>, ApiError> {
    let raw = match encoded.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, b64)| b64)
            .ok_or_else(|| ApiError::InvalidRequest("malformed data uri".to_owned()))?,
        None => encoded,
    };
    base64::engine::general_purpose::STANDARD
        .decode(raw)
        .map_err(|_| ApiError::InvalidRequest("profile is not valid base64".to_owned()))
}
