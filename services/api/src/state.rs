use std::sync::Arc;

use bollard::Docker;
use sea_orm::DatabaseConnection;

use crate::config::ApiConfig;
use crate::infra::db::{
    DbChildRepository, DbExpenditureRepository, DbParentAccountRepository,
    DbPhoneCertifyRepository, SeaTxHandler,
};
use crate::infra::docker::DockerRuntime;
use crate::infra::hash::BcryptHasher;
use crate::infra::search::HttpSearchIndexer;
use crate::infra::sms::AligoSmsSender;
use crate::infra::storage::S3ObjectStorage;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub s3: aws_sdk_s3::Client,
    pub docker: Docker,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn tx_handler(&self) -> SeaTxHandler {
        SeaTxHandler {
            db: self.db.clone(),
        }
    }

    pub fn parent_repo(&self) -> DbParentAccountRepository {
        DbParentAccountRepository
    }

    pub fn certify_repo(&self) -> DbPhoneCertifyRepository {
        DbPhoneCertifyRepository
    }

    pub fn child_repo(&self) -> DbChildRepository {
        DbChildRepository
    }

    pub fn expenditure_repo(&self) -> DbExpenditureRepository {
        DbExpenditureRepository
    }

    pub fn sms_sender(&self) -> AligoSmsSender {
        AligoSmsSender {
            http: self.http.clone(),
            api_key: self.config.sms_api_key.clone(),
            account_id: self.config.sms_account_id.clone(),
            sender: self.config.sms_sender.clone(),
        }
    }

    pub fn hasher(&self) -> BcryptHasher {
        BcryptHasher
    }

    pub fn object_storage(&self) -> S3ObjectStorage {
        S3ObjectStorage {
            client: self.s3.clone(),
        }
    }

    pub fn search_indexer(&self) -> HttpSearchIndexer {
        HttpSearchIndexer {
            http: self.http.clone(),
            endpoint: self.config.search_endpoint.clone(),
        }
    }

    pub fn container_runtime(&self) -> DockerRuntime {
        DockerRuntime {
            docker: self.docker.clone(),
        }
    }
}
