use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::authorize_parent;
use crate::state::AppState;
use crate::usecase::expenditure::{RegisterExpenditureInput, RegisterExpenditureUseCase};

// ── POST /parents/{parent_uuid}/expenditures ─────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterExpenditureRequest {
    pub name: String,
    pub amount: i64,
    pub rating: i32,
    pub link: Option<String>,
    pub child_uuids: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterExpenditureResponse {
    pub expenditure_uuid: String,
}

pub async fn register_expenditure(
    State(state): State<AppState>,
    Path(parent_uuid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<RegisterExpenditureRequest>,
) -> Result<(StatusCode, Json<RegisterExpenditureResponse>), ApiError> {
    authorize_parent(&headers, &state.config.jwt_secret, &parent_uuid)?;

    if body.name.is_empty() || body.name.chars().count() > 20 {
        return Err(ApiError::InvalidRequest(
            "name must be 1-20 characters".to_owned(),
        ));
    }
    if body.amount <= 0 {
        return Err(ApiError::InvalidRequest("amount must be positive".to_owned()));
    }
    if !(0..=5).contains(&body.rating) {
        return Err(ApiError::InvalidRequest(
            "rating must be between 0 and 5".to_owned(),
        ));
    }

    let usecase = RegisterExpenditureUseCase {
        tx: state.tx_handler(),
        expenditures: state.expenditure_repo(),
        search: state.search_indexer(),
    };
    let out = usecase
        .execute(RegisterExpenditureInput {
            parent_uuid,
            name: body.name,
            amount: body.amount,
            rating: body.rating,
            link: body.link,
            child_uuids: body.child_uuids,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterExpenditureResponse {
            expenditure_uuid: out.expenditure_uuid,
        }),
    ))
}
