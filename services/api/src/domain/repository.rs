#![allow(async_fn_in_trait)]

use crate::domain::types::{
    AccountWithPhone, CertifyPatch, Child, Expenditure, ParentAccount, ParentPatch, PhoneCertify,
};
use crate::error::RepoError;

/// Transaction coordinator. Exactly one transaction spans each workflow
/// operation: the usecase begins it, threads the handle through every storage
/// call, rolls back on the first failure and commits on success.
pub trait TxHandler: Send + Sync {
    type Tx: Send + Sync;

    async fn begin(&self) -> Result<Self::Tx, RepoError>;
    async fn commit(&self, tx: Self::Tx) -> Result<(), RepoError>;
    async fn rollback(&self, tx: Self::Tx) -> Result<(), RepoError>;
}

/// Storage gateway for parent accounts.
pub trait ParentAccountRepository: Send + Sync {
    type Tx: Send + Sync;

    /// Lookup by uuid, left-joined with the bound phone number (empty string
    /// when none). Primarily the identifier-collision probe target.
    async fn get_by_uuid(
        &self,
        tx: &Self::Tx,
        uuid: &str,
    ) -> Result<AccountWithPhone, RepoError>;

    /// Lookup by login id, same join. `RowNotFound` when no account has it.
    async fn get_by_login_id(
        &self,
        tx: &Self::Tx,
        login_id: &str,
    ) -> Result<AccountWithPhone, RepoError>;

    /// Loop random candidates against `get_by_uuid` until one is free.
    async fn available_uuid(&self, tx: &Self::Tx) -> Result<String, RepoError>;

    /// Validate and insert. Assigns a fresh uuid (collision-probed) when
    /// `account.uuid` is empty. Duplicate login id →
    /// `DuplicateEntry{key:"login_id"}`.
    async fn store(&self, tx: &Self::Tx, account: &mut ParentAccount) -> Result<(), RepoError>;

    /// Partial update. All-`None` patch → `InvalidRecord`; unknown uuid →
    /// `RowNotFound`.
    async fn update(
        &self,
        tx: &Self::Tx,
        uuid: &str,
        patch: &ParentPatch,
    ) -> Result<(), RepoError>;
}

/// Storage gateway for phone verification rows.
pub trait PhoneCertifyRepository: Send + Sync {
    type Tx: Send + Sync;

    async fn get_by_phone_number(
        &self,
        tx: &Self::Tx,
        phone_number: &str,
    ) -> Result<PhoneCertify, RepoError>;

    /// Validate and insert. Issues a certify code when `certify_code` is
    /// empty. Duplicate phone → `DuplicateEntry`; bad binding →
    /// `NoReferencedRow{"parent_uuid"}`.
    async fn store(&self, tx: &Self::Tx, certify: &mut PhoneCertify) -> Result<(), RepoError>;

    /// Partial update keyed by phone number. Set/replace only — cannot null
    /// out a previously written field.
    async fn update(
        &self,
        tx: &Self::Tx,
        phone_number: &str,
        patch: &CertifyPatch,
    ) -> Result<(), RepoError>;
}

/// Storage gateway for children profiles.
pub trait ChildRepository: Send + Sync {
    type Tx: Send + Sync;

    async fn available_uuid(&self, tx: &Self::Tx) -> Result<String, RepoError>;

    /// Validate and insert. Unknown parent →
    /// `NoReferencedRow{"parent_uuid"}`.
    async fn store(&self, tx: &Self::Tx, child: &mut Child) -> Result<(), RepoError>;
}

/// Storage gateway for expenditures and their child tags.
pub trait ExpenditureRepository: Send + Sync {
    type Tx: Send + Sync;

    async fn available_uuid(&self, tx: &Self::Tx) -> Result<String, RepoError>;

    /// Validate and insert the expenditure plus one tag row per child uuid,
    /// all against the ambient transaction. Duplicate tag →
    /// `DuplicateEntry{key:"expenditure_child_tag"}`; FK failures name
    /// `parent_uuid` or `child_uuid`.
    async fn store(
        &self,
        tx: &Self::Tx,
        expenditure: &mut Expenditure,
        child_uuids: &[String],
    ) -> Result<(), RepoError>;
}

// ── Collaborator ports ───────────────────────────────────────────────────────

/// Single-message SMS delivery. Best-effort; any error aborts the calling
/// workflow step.
pub trait SmsSender: Send + Sync {
    async fn send_to_one(&self, receiver: &str, content: &str) -> anyhow::Result<()>;
}

/// Password verification failure, distinguishable from backend trouble.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("password mismatch")]
    Mismatch,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// One-way salted password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash_min_cost(&self, plain: &str) -> anyhow::Result<String>;
    fn verify(&self, hash: &str, plain: &str) -> Result<(), HashError>;
}

/// Publicly readable object storage, keyed by deterministic URIs.
pub trait ObjectStorage: Send + Sync {
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> anyhow::Result<()>;
}

/// Search index ingestion.
pub trait SearchIndexer: Send + Sync {
    async fn index(&self, index: &str, document: serde_json::Value) -> anyhow::Result<()>;
}

/// Container runtime used by the redeploy endpoint.
pub trait ContainerRuntime: Send + Sync {
    async fn pull_image(&self, image: &str) -> anyhow::Result<()>;
    async fn restart_container(&self, name: &str) -> anyhow::Result<()>;
}
