use crate::domain::repository::ContainerRuntime;
use crate::error::ApiError;

pub struct RedeployContainerInput {
    pub management_key: String,
    pub image: String,
}

/// Pull a new image and restart the service container. Guarded by the cloud
/// management key; no storage involved.
pub struct RedeployContainerUseCase<R: ContainerRuntime> {
    pub runtime: R,
    pub management_key: String,
    pub container: String,
}

impl<R: ContainerRuntime> RedeployContainerUseCase<R> {
    pub async fn execute(&self, input: RedeployContainerInput) -> Result<(), ApiError> {
        if input.management_key != self.management_key {
            return Err(ApiError::Forbidden);
        }

        self.runtime
            .pull_image(&input.image)
            .await
            .map_err(|e| ApiError::Internal(e.context("pull image")))?;
        self.runtime
            .restart_container(&self.container)
            .await
            .map_err(|e| ApiError::Internal(e.context("restart container")))?;

        tracing::info!(image = %input.image, container = %self.container, "container redeployed");
        Ok(())
    }
}
