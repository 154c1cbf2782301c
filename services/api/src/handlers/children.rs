use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{authorize_parent, decode_profile};
use crate::state::AppState;
use crate::usecase::children::{CreateChildInput, CreateChildUseCase};

// ── POST /parents/{parent_uuid}/children ─────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateChildRequest {
    pub name: String,
    pub birth: DateTime<Utc>,
    pub sex: String,
    pub profile_base64: Option<String>,
}

#[derive(Serialize)]
pub struct CreateChildResponse {
    pub child_uuid: String,
}

pub async fn create_child(
    State(state): State<AppState>,
    Path(parent_uuid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<CreateChildRequest>,
) -> Result<(StatusCode, Json<CreateChildResponse>), ApiError> {
    authorize_parent(&headers, &state.config.jwt_secret, &parent_uuid)?;

    if body.name.is_empty() || body.name.chars().count() > 10 {
        return Err(ApiError::InvalidRequest(
            "name must be 1-10 characters".to_owned(),
        ));
    }
    if body.sex.is_empty() || body.sex.chars().count() > 10 {
        return Err(ApiError::InvalidRequest(
            "sex must be 1-10 characters".to_owned(),
        ));
    }
    let profile = body
        .profile_base64
        .as_deref()
        .map(decode_profile)
        .transpose()?;

    let usecase = CreateChildUseCase {
        tx: state.tx_handler(),
        children: state.child_repo(),
        storage: state.object_storage(),
        profile_bucket: state.config.children_profile_bucket.clone(),
    };
    let out = usecase
        .execute(CreateChildInput {
            parent_uuid,
            name: body.name,
            birth: body.birth,
            sex: body.sex,
            profile,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateChildResponse {
            child_uuid: out.child_uuid,
        }),
    ))
}
