use chrono::{DateTime, Utc};

use crate::domain::repository::{ChildRepository, ObjectStorage, TxHandler};
use crate::domain::types::Child;
use crate::error::{ApiError, RepoError};
use crate::usecase::internal;

pub struct CreateChildInput {
    pub parent_uuid: String,
    pub name: String,
    pub birth: DateTime<Utc>,
    pub sex: String,
    pub profile: Option<Vec<u8>>,
}

pub struct CreateChildOutput {
    pub child_uuid: String,
}

/// Create a child profile under a parent account. Uploads the profile image
/// after the DB write; an upload failure rolls the row back.
pub struct CreateChildUseCase<T, R, S>
where
    T: TxHandler,
    R: ChildRepository<Tx = T::Tx>,
    S: ObjectStorage,
{
    pub tx: T,
    pub children: R,
    pub storage: S,
    pub profile_bucket: String,
}

impl<T, R, S> CreateChildUseCase<T, R, S>
where
    T: TxHandler,
    R: ChildRepository<Tx = T::Tx>,
    S: ObjectStorage,
{
    pub async fn execute(&self, input: CreateChildInput) -> Result<CreateChildOutput, ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.create(&tx, input).await {
            Ok(out) => {
                self.tx
                    .commit(tx)
                    .await
                    .map_err(|e| internal(e, "commit transaction"))?;
                Ok(out)
            }
            Err(err) => {
                let _ = self.tx.rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn create(&self, tx: &T::Tx, input: CreateChildInput) -> Result<CreateChildOutput, ApiError> {
        let uuid = self
            .children
            .available_uuid(tx)
            .await
            .map_err(|e| internal(e, "allocate child uuid"))?;

        let profile_uri = input.profile.is_some().then(|| Child::profile_uri_for(&uuid));

        let mut child = Child {
            uuid: uuid.clone(),
            parent_uuid: input.parent_uuid,
            name: input.name,
            birth: input.birth,
            sex: input.sex,
            profile_uri,
        };
        match self.children.store(tx, &mut child).await {
            Ok(()) => {}
            Err(RepoError::NoReferencedRow { foreign_key }) if foreign_key == "parent_uuid" => {
                return Err(ApiError::NotFound);
            }
            Err(err) => return Err(internal(err, "store children")),
        }

        if let Some(profile) = input.profile {
            self.storage
                .put_object(&self.profile_bucket, &Child::profile_uri_for(&uuid), profile)
                .await
                .map_err(|e| ApiError::Internal(e.context("upload child profile")))?;
        }

        Ok(CreateChildOutput { child_uuid: uuid })
    }
}
