use anyhow::Context as _;
use bollard::Docker;
use bollard::query_parameters::{CreateImageOptionsBuilder, RestartContainerOptionsBuilder};
use futures::TryStreamExt;

use crate::domain::repository::ContainerRuntime;

/// Redeploy operations against the local Docker daemon.
#[derive(Clone)]
pub struct DockerRuntime {
    pub docker: Docker,
}

impl ContainerRuntime for DockerRuntime {
    async fn pull_image(&self, image: &str) -> anyhow::Result<()> {
        self.docker
            .create_image(
                Some(CreateImageOptionsBuilder::new().from_image(image).build()),
                None,
                None,
            )
            .try_collect::<Vec<_>>()
            .await
            .with_context(|| format!("failed to pull {image}"))?;
        Ok(())
    }

    async fn restart_container(&self, name: &str) -> anyhow::Result<()> {
        self.docker
            .restart_container(name, Some(RestartContainerOptionsBuilder::new().build()))
            .await
            .with_context(|| format!("failed to restart container {name}"))?;
        Ok(())
    }
}
