use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use nestling_domain::conflict::ConflictCode;

/// Storage-layer error taxonomy. Pure data-access facts — no HTTP semantics.
///
/// Every repository method returns one of these; the usecase layer matches
/// exhaustively and translates into [`ApiError`]. No variant ever reaches the
/// boundary unmapped.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Lookup by key found no record.
    #[error("row does not exist")]
    RowNotFound,
    /// Unique-constraint violation; `key` names the colliding unique field.
    #[error("duplicate entry for key {key}")]
    DuplicateEntry { key: String },
    /// Foreign-key violation; names the violated foreign key.
    #[error("no referenced row for foreign key {foreign_key}")]
    NoReferencedRow { foreign_key: String },
    /// Record failed field validation before reaching storage.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// Anything else from the backend, wrapped with context.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Workflow-layer error variants, mapped to HTTP at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("{}", .0.message())]
    Conflict(ConflictCode),
    #[error("child already tagged on this expenditure")]
    TagAlreadyAttached,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Conflict(code) => code.kind(),
            Self::TagAlreadyAttached => "TAG_ALREADY_ATTACHED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Negative business code for conflicts that carry one, 0 otherwise.
    pub fn code(&self) -> i32 {
        match self {
            Self::Conflict(code) => code.code(),
            _ => 0,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::TagAlreadyAttached => StatusCode::CONFLICT,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here
        // would be noise. Internal errors need the anyhow chain logged so the
        // root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "code": self.code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
