/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 8000). Env var: `API_PORT`.
    pub api_port: u16,
    /// HMAC secret for signing uuid access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in seconds (default 3600). Env var:
    /// `ACCESS_TOKEN_DURATION_SECS`.
    pub access_token_duration_secs: u64,
    /// SMS provider API key.
    pub sms_api_key: String,
    /// SMS provider account id.
    pub sms_account_id: String,
    /// Registered sender number for outgoing SMS.
    pub sms_sender: String,
    /// S3 bucket for parent profile images.
    pub parent_profile_bucket: String,
    /// S3 bucket for children profile images.
    pub children_profile_bucket: String,
    /// Search cluster base URL (e.g. "http://search:9200").
    pub search_endpoint: String,
    /// Shared secret guarding the redeploy endpoint.
    pub cloud_management_key: String,
    /// Name of the container restarted on redeploy.
    pub redeploy_container: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            access_token_duration_secs: std::env::var("ACCESS_TOKEN_DURATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            sms_api_key: std::env::var("SMS_API_KEY").expect("SMS_API_KEY"),
            sms_account_id: std::env::var("SMS_ACCOUNT_ID").expect("SMS_ACCOUNT_ID"),
            sms_sender: std::env::var("SMS_SENDER").expect("SMS_SENDER"),
            parent_profile_bucket: std::env::var("PARENT_PROFILE_BUCKET")
                .expect("PARENT_PROFILE_BUCKET"),
            children_profile_bucket: std::env::var("CHILDREN_PROFILE_BUCKET")
                .expect("CHILDREN_PROFILE_BUCKET"),
            search_endpoint: std::env::var("SEARCH_ENDPOINT").expect("SEARCH_ENDPOINT"),
            cloud_management_key: std::env::var("CLOUD_MANAGEMENT_KEY")
                .expect("CLOUD_MANAGEMENT_KEY"),
            redeploy_container: std::env::var("REDEPLOY_CONTAINER").expect("REDEPLOY_CONTAINER"),
        }
    }
}
