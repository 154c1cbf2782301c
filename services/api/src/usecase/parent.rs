use std::time::Duration;

use nestling_domain::conflict::ConflictCode;

use crate::domain::repository::{
    HashError, ObjectStorage, ParentAccountRepository, PasswordHasher, PhoneCertifyRepository,
    TxHandler,
};
use crate::domain::types::{CertifyPatch, ParentAccount, ParentPatch};
use crate::error::{ApiError, RepoError};
use crate::usecase::internal;
use crate::usecase::token::{ACCESS_TOKEN_TYPE, issue_uuid_token};

// ── SignUpParent ─────────────────────────────────────────────────────────────

pub struct SignUpParentInput {
    pub login_id: String,
    pub password: String,
    pub name: String,
    pub phone_number: String,
    pub profile: Option<Vec<u8>>,
}

pub struct SignUpParentOutput {
    pub parent_uuid: String,
}

/// Create a parent account against a certified phone number and bind the
/// phone to the new account, all within one transaction. The profile upload
/// happens after the DB writes; an upload failure rolls everything back.
pub struct SignUpParentUseCase<T, P, C, H, S>
where
    T: TxHandler,
    P: ParentAccountRepository<Tx = T::Tx>,
    C: PhoneCertifyRepository<Tx = T::Tx>,
    H: PasswordHasher,
    S: ObjectStorage,
{
    pub tx: T,
    pub parents: P,
    pub certifies: C,
    pub hasher: H,
    pub storage: S,
    pub profile_bucket: String,
}

impl<T, P, C, H, S> SignUpParentUseCase<T, P, C, H, S>
where
    T: TxHandler,
    P: ParentAccountRepository<Tx = T::Tx>,
    C: PhoneCertifyRepository<Tx = T::Tx>,
    H: PasswordHasher,
    S: ObjectStorage,
{
    pub async fn execute(&self, input: SignUpParentInput) -> Result<SignUpParentOutput, ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.sign_up(&tx, input).await {
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

    async fn sign_up(
        &self,
        tx: &T::Tx,
        input: SignUpParentInput,
    ) -> Result<SignUpParentOutput, ApiError> {
        let certify = match self
            .certifies
            .get_by_phone_number(tx, &input.phone_number)
            .await
        {
            Ok(row) => row,
            Err(RepoError::RowNotFound) => {
                return Err(ApiError::Conflict(ConflictCode::UncertifiedPhone));
            }
            Err(err) => return Err(internal(err, "get parent phone certify")),
        };
        if !certify.certified {
            return Err(ApiError::Conflict(ConflictCode::UncertifiedPhone));
        }
        if certify.parent_uuid.is_some() {
            return Err(ApiError::Conflict(ConflictCode::PhoneAlreadyInUse));
        }

        let password_hash = self
            .hasher
            .hash_min_cost(&input.password)
            .map_err(|e| ApiError::Internal(e.context("hash password")))?;

        let uuid = self
            .parents
            .available_uuid(tx)
            .await
            .map_err(|e| internal(e, "allocate parent uuid"))?;

        let profile_uri = input
            .profile
            .is_some()
            .then(|| ParentAccount::profile_uri_for(&uuid));

        let mut account = ParentAccount {
            uuid: uuid.clone(),
            login_id: input.login_id,
            password_hash,
            name: input.name,
            profile_uri: profile_uri.clone(),
        };
        match self.parents.store(tx, &mut account).await {
            Ok(()) => {}
            Err(RepoError::DuplicateEntry { key }) if key == "login_id" => {
                return Err(ApiError::Conflict(ConflictCode::ParentIdAlreadyInUse));
            }
            Err(err) => return Err(internal(err, "store parent auth")),
        }

        let patch = CertifyPatch {
            parent_uuid: Some(uuid.clone()),
            ..Default::default()
        };
        self.certifies
            .update(tx, &input.phone_number, &patch)
            .await
            .map_err(|e| internal(e, "bind phone to parent"))?;

        if let (Some(profile), Some(key)) = (input.profile, profile_uri) {
            self.storage
                .put_object(&self.profile_bucket, &key, profile)
                .await
                .map_err(|e| ApiError::Internal(e.context("upload parent profile")))?;
        }

        Ok(SignUpParentOutput { parent_uuid: uuid })
    }
}

// ── LoginParent ──────────────────────────────────────────────────────────────

pub struct LoginParentInput {
    pub login_id: String,
    pub password: String,
}

pub struct LoginParentOutput {
    pub parent_uuid: String,
    pub access_token: String,
}

pub struct LoginParentUseCase<T, P, H>
where
    T: TxHandler,
    P: ParentAccountRepository<Tx = T::Tx>,
    H: PasswordHasher,
{
    pub tx: T,
    pub parents: P,
    pub hasher: H,
    pub jwt_secret: String,
    pub access_token_duration: Duration,
}

impl<T, P, H> LoginParentUseCase<T, P, H>
where
    T: TxHandler,
    P: ParentAccountRepository<Tx = T::Tx>,
    H: PasswordHasher,
{
    pub async fn execute(&self, input: LoginParentInput) -> Result<LoginParentOutput, ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.login(&tx, &input).await {
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

    async fn login(&self, tx: &T::Tx, input: &LoginParentInput) -> Result<LoginParentOutput, ApiError> {
        let row = match self.parents.get_by_login_id(tx, &input.login_id).await {
            Ok(row) => row,
            Err(RepoError::RowNotFound) => {
                return Err(ApiError::Conflict(ConflictCode::NotExistParentId));
            }
            Err(err) => return Err(internal(err, "get parent auth by login id")),
        };

        match self.hasher.verify(&row.account.password_hash, &input.password) {
            Ok(()) => {}
            Err(HashError::Mismatch) => {
                return Err(ApiError::Conflict(ConflictCode::IncorrectParentPw));
            }
            Err(HashError::Backend(e)) => {
                return Err(ApiError::Internal(e.context("compare password hash")));
            }
        }

        let access_token = issue_uuid_token(
            &row.account.uuid,
            ACCESS_TOKEN_TYPE,
            self.access_token_duration,
            &self.jwt_secret,
        )?;

        Ok(LoginParentOutput {
            parent_uuid: row.account.uuid,
            access_token,
        })
    }
}

// ── UpdateParentInform ───────────────────────────────────────────────────────

pub struct UpdateParentInput {
    pub name: Option<String>,
    pub profile: Option<Vec<u8>>,
}

/// Patch a parent account. The DB update and the profile upload commit or
/// roll back together — the upload runs inside the transaction window, so a
/// failed upload discards the already-applied DB write.
pub struct UpdateParentUseCase<T, P, S>
where
    T: TxHandler,
    P: ParentAccountRepository<Tx = T::Tx>,
    S: ObjectStorage,
{
    pub tx: T,
    pub parents: P,
    pub storage: S,
    pub profile_bucket: String,
}

impl<T, P, S> UpdateParentUseCase<T, P, S>
where
    T: TxHandler,
    P: ParentAccountRepository<Tx = T::Tx>,
    S: ObjectStorage,
{
    pub async fn execute(&self, parent_uuid: &str, input: UpdateParentInput) -> Result<(), ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.update(&tx, parent_uuid, input).await {
            Ok(()) => {
                self.tx
                    .commit(tx)
                    .await
                    .map_err(|e| internal(e, "commit transaction"))?;
                Ok(())
            }
            Err(err) => {
                let _ = self.tx.rollback(tx).await;
                Err(err)
            }
        }
    }

    async fn update(
        &self,
        tx: &T::Tx,
        parent_uuid: &str,
        input: UpdateParentInput,
    ) -> Result<(), ApiError> {
        let profile_uri = input
            .profile
            .is_some()
            .then(|| ParentAccount::profile_uri_for(parent_uuid));

        let patch = ParentPatch {
            name: input.name,
            profile_uri: profile_uri.clone(),
            ..Default::default()
        };
        match self.parents.update(tx, parent_uuid, &patch).await {
            Ok(()) => {}
            Err(RepoError::RowNotFound) => return Err(ApiError::NotFound),
            Err(err) => return Err(internal(err, "update parent auth")),
        }

        if let (Some(profile), Some(key)) = (input.profile, profile_uri) {
            self.storage
                .put_object(&self.profile_bucket, &key, profile)
                .await
                .map_err(|e| ApiError::Internal(e.context("upload parent profile")))?;
        }
        Ok(())
    }
}
