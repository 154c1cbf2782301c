use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use nestling_core::health::{healthz, readyz};
use nestling_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{certify_phone, login_parent, send_certify_code, sign_up_parent, update_parent},
    children::create_child,
    expenditure::register_expenditure,
    maintenance::redeploy_container,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Phone certification
        .route(
            "/parents/phones/{phone_number}/certify-code",
            post(send_certify_code),
        )
        .route("/parents/phones/{phone_number}/certify", post(certify_phone))
        // Parents
        .route("/parents", post(sign_up_parent))
        .route("/parents/login", post(login_parent))
        .route("/parents/{parent_uuid}", patch(update_parent))
        // Children
        .route("/parents/{parent_uuid}/children", post(create_child))
        // Expenditures
        .route(
            "/parents/{parent_uuid}/expenditures",
            post(register_expenditure),
        )
        // Operations
        .route("/maintenance/redeploy", post(redeploy_container))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
