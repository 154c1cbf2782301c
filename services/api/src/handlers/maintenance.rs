use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::redeploy::{RedeployContainerInput, RedeployContainerUseCase};

// ── POST /maintenance/redeploy ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RedeployRequest {
    pub management_key: String,
    pub image: String,
}

pub async fn redeploy_container(
    State(state): State<AppState>,
    Json(body): Json<RedeployRequest>,
) -> Result<StatusCode, ApiError> {
    if body.image.is_empty() {
        return Err(ApiError::InvalidRequest("image is required".to_owned()));
    }

    let usecase = RedeployContainerUseCase {
        runtime: state.container_runtime(),
        management_key: state.config.cloud_management_key.clone(),
        container: state.config.redeploy_container.clone(),
    };
    usecase
        .execute(RedeployContainerInput {
            management_key: body.management_key,
            image: body.image,
        })
        .await?;
    Ok(StatusCode::ACCEPTED)
}
