use std::sync::Arc;

use aws_config::BehaviorVersion;
use bollard::Docker;
use sea_orm::Database;
use tracing::info;

use nestling_api::config::ApiConfig;
use nestling_api::router::build_router;
use nestling_api::state::AppState;

#[tokio::main]
async fn main() {
    nestling_core::tracing::init_tracing("nestling-api");

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3 = aws_sdk_s3::Client::new(&aws_config);

    let docker = Docker::connect_with_defaults().expect("failed to connect to Docker daemon");

    let state = AppState {
        db,
        http: reqwest::Client::new(),
        s3,
        docker,
        config: Arc::new(config),
    };

    let router = build_router(state.clone());
    let addr = format!("0.0.0.0:{}", state.config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
