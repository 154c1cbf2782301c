pub mod certify;
pub mod children;
pub mod expenditure;
pub mod parent;
pub mod redeploy;
pub mod token;

use crate::error::{ApiError, RepoError};

/// Wrap an unanticipated storage error as an internal failure with context.
pub(crate) fn internal(err: RepoError, context: &'static str) -> ApiError {
    ApiError::Internal(anyhow::Error::new(err).context(context))
}
