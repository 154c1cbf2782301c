use std::time::Duration;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{authorize_parent, decode_profile, valid_phone_number};
use crate::state::AppState;
use crate::usecase::certify::{
    CertifyPhoneInput, CertifyPhoneUseCase, SendCertifyCodeInput, SendCertifyCodeUseCase,
};
use crate::usecase::parent::{
    LoginParentInput, LoginParentUseCase, SignUpParentInput, SignUpParentUseCase,
    UpdateParentInput, UpdateParentUseCase,
};

// ── POST /parents/phones/{phone_number}/certify-code ─────────────────────────

pub async fn send_certify_code(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !valid_phone_number(&phone_number) {
        return Err(ApiError::InvalidRequest(
            "phone_number must be exactly 11 digits".to_owned(),
        ));
    }

    let usecase = SendCertifyCodeUseCase {
        tx: state.tx_handler(),
        certifies: state.certify_repo(),
        sms: state.sms_sender(),
    };
    usecase
        .execute(SendCertifyCodeInput { phone_number })
        .await?;
    Ok(StatusCode::OK)
}

// ── POST /parents/phones/{phone_number}/certify ──────────────────────────────

#[derive(Deserialize)]
pub struct CertifyPhoneRequest {
    pub certify_code: String,
}

pub async fn certify_phone(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
    Json(body): Json<CertifyPhoneRequest>,
) -> Result<StatusCode, ApiError> {
    if !valid_phone_number(&phone_number) {
        return Err(ApiError::InvalidRequest(
            "phone_number must be exactly 11 digits".to_owned(),
        ));
    }
    if body.certify_code.len() != 6 || !body.certify_code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::InvalidRequest(
            "certify_code must be exactly 6 digits".to_owned(),
        ));
    }

    let usecase = CertifyPhoneUseCase {
        tx: state.tx_handler(),
        certifies: state.certify_repo(),
    };
    usecase
        .execute(CertifyPhoneInput {
            phone_number,
            certify_code: body.certify_code,
        })
        .await?;
    Ok(StatusCode::OK)
}

// ── POST /parents ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignUpParentRequest {
    pub login_id: String,
    pub password: String,
    pub name: String,
    pub phone_number: String,
    pub profile_base64: Option<String>,
}

#[derive(Serialize)]
pub struct SignUpParentResponse {
    pub parent_uuid: String,
}

pub async fn sign_up_parent(
    State(state): State<AppState>,
    Json(body): Json<SignUpParentRequest>,
) -> Result<(StatusCode, Json<SignUpParentResponse>), ApiError> {
    if body.login_id.len() < 4 || body.login_id.len() > 20 {
        return Err(ApiError::InvalidRequest(
            "login_id must be 4-20 characters".to_owned(),
        ));
    }
    if body.password.is_empty() {
        return Err(ApiError::InvalidRequest("password is required".to_owned()));
    }
    if body.name.is_empty() || body.name.chars().count() > 20 {
        return Err(ApiError::InvalidRequest(
            "name must be 1-20 characters".to_owned(),
        ));
    }
    if !valid_phone_number(&body.phone_number) {
        return Err(ApiError::InvalidRequest(
            "phone_number must be exactly 11 digits".to_owned(),
        ));
    }
    let profile = body
        .profile_base64
        .as_deref()
        .map(decode_profile)
        .transpose()?;

    let usecase = SignUpParentUseCase {
        tx: state.tx_handler(),
        parents: state.parent_repo(),
        certifies: state.certify_repo(),
        hasher: state.hasher(),
        storage: state.object_storage(),
        profile_bucket: state.config.parent_profile_bucket.clone(),
    };
    let out = usecase
        .execute(SignUpParentInput {
            login_id: body.login_id,
            password: body.password,
            name: body.name,
            phone_number: body.phone_number,
            profile,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpParentResponse {
            parent_uuid: out.parent_uuid,
        }),
    ))
}

// ── POST /parents/login ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginParentRequest {
    pub login_id: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginParentResponse {
    pub parent_uuid: String,
    pub access_token: String,
}

pub async fn login_parent(
    State(state): State<AppState>,
    Json(body): Json<LoginParentRequest>,
) -> Result<Json<LoginParentResponse>, ApiError> {
    if body.login_id.is_empty() || body.password.is_empty() {
        return Err(ApiError::InvalidRequest(
            "login_id and password are required".to_owned(),
        ));
    }

    let usecase = LoginParentUseCase {
        tx: state.tx_handler(),
        parents: state.parent_repo(),
        hasher: state.hasher(),
        jwt_secret: state.config.jwt_secret.clone(),
        access_token_duration: Duration::from_secs(state.config.access_token_duration_secs),
    };
    let out = usecase
        .execute(LoginParentInput {
            login_id: body.login_id,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginParentResponse {
        parent_uuid: out.parent_uuid,
        access_token: out.access_token,
    }))
}

// ── PATCH /parents/{parent_uuid} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateParentRequest {
    pub name: Option<String>,
    pub profile_base64: Option<String>,
}

pub async fn update_parent(
    State(state): State<AppState>,
    Path(parent_uuid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateParentRequest>,
) -> Result<StatusCode, ApiError> {
    authorize_parent(&headers, &state.config.jwt_secret, &parent_uuid)?;

    if body.name.is_none() && body.profile_base64.is_none() {
        return Err(ApiError::InvalidRequest(
            "at least one field required".to_owned(),
        ));
    }
    if let Some(name) = &body.name {
        if name.is_empty() || name.chars().count() > 20 {
            return Err(ApiError::InvalidRequest(
                "name must be 1-20 characters".to_owned(),
            ));
        }
    }
    let profile = body
        .profile_base64
        .as_deref()
        .map(decode_profile)
        .transpose()?;

    let usecase = UpdateParentUseCase {
        tx: state.tx_handler(),
        parents: state.parent_repo(),
        storage: state.object_storage(),
        profile_bucket: state.config.parent_profile_bucket.clone(),
    };
    usecase
        .execute(
            &parent_uuid,
            UpdateParentInput {
                name: body.name,
                profile,
            },
        )
        .await?;
    Ok(StatusCode::OK)
}
