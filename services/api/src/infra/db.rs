use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, QueryFilter, SqlErr, TransactionTrait,
};

use nestling_api_schema::{children, expenditure, expenditure_child_tag, parent_auth,
    parent_phone_certify};
use nestling_domain::id::{self, EntityKind};

use crate::domain::repository::{
    ChildRepository, ExpenditureRepository, ParentAccountRepository, PhoneCertifyRepository,
    TxHandler,
};
use crate::domain::types::{
    AccountWithPhone, CertifyPatch, Child, Expenditure, ParentAccount, ParentPatch, PhoneCertify,
    random_certify_code,
};
use crate::error::RepoError;

// ── Error normalization ──────────────────────────────────────────────────────

/// Map a unique-violation message to the colliding key. Postgres names the
/// constraint in the message, so substring matching on our constraint names
/// is enough. Longer names first: `expenditure_child_tag_pkey` also contains
/// `expenditure`.
fn unique_key_from(msg: &str) -> String {
    const KEYS: &[(&str, &str)] = &[
        ("login_id", "login_id"),
        ("expenditure_child_tag", "expenditure_child_tag"),
        ("parent_phone_certify", "phone_number"),
        ("parent_auth", "uuid"),
        ("children", "uuid"),
        ("expenditure", "uuid"),
    ];
    for (needle, key) in KEYS {
        if msg.contains(needle) {
            return (*key).to_owned();
        }
    }
    String::new()
}

/// Map a foreign-key-violation message to the violated foreign key.
fn foreign_key_from(msg: &str) -> String {
    for fk in ["parent_uuid", "child_uuid", "expenditure_uuid"] {
        if msg.contains(fk) {
            return fk.to_owned();
        }
    }
    String::new()
}

/// Normalize a write error into the storage taxonomy.
fn classify_db_err(err: DbErr, context: &'static str) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::DuplicateEntry {
            key: unique_key_from(&msg),
        },
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::NoReferencedRow {
            foreign_key: foreign_key_from(&msg),
        },
        _ => RepoError::Backend(anyhow::Error::new(err).context(context)),
    }
}

fn backend(err: DbErr, context: &'static str) -> RepoError {
    RepoError::Backend(anyhow::Error::new(err).context(context))
}

// ── Transaction handler ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SeaTxHandler {
    pub db: DatabaseConnection,
}

impl TxHandler for SeaTxHandler {
    type Tx = DatabaseTransaction;

    async fn begin(&self) -> Result<DatabaseTransaction, RepoError> {
        self.db
            .begin()
            .await
            .context("begin transaction")
            .map_err(RepoError::Backend)
    }

    async fn commit(&self, tx: DatabaseTransaction) -> Result<(), RepoError> {
        tx.commit()
            .await
            .context("commit transaction")
            .map_err(RepoError::Backend)
    }

    async fn rollback(&self, tx: DatabaseTransaction) -> Result<(), RepoError> {
        tx.rollback()
            .await
            .context("rollback transaction")
            .map_err(RepoError::Backend)
    }
}

// ── Parent account repository ────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct DbParentAccountRepository;

fn account_from_model(model: parent_auth::Model) -> ParentAccount {
    ParentAccount {
        uuid: model.uuid,
        login_id: model.login_id,
        password_hash: model.password_hash,
        name: model.name,
        profile_uri: model.profile_uri,
    }
}

fn account_with_phone(
    account: parent_auth::Model,
    certify: Option<parent_phone_certify::Model>,
) -> AccountWithPhone {
    AccountWithPhone {
        account: account_from_model(account),
        phone_number: certify.map(|c| c.phone_number).unwrap_or_default(),
    }
}

impl ParentAccountRepository for DbParentAccountRepository {
    type Tx = DatabaseTransaction;

    async fn get_by_uuid(
        &self,
        tx: &DatabaseTransaction,
        uuid: &str,
    ) -> Result<AccountWithPhone, RepoError> {
        let row = parent_auth::Entity::find_by_id(uuid.to_owned())
            .find_also_related(parent_phone_certify::Entity)
            .one(tx)
            .await
            .map_err(|e| backend(e, "select parent auth by uuid"))?;
        let (account, certify) = row.ok_or(RepoError::RowNotFound)?;
        Ok(account_with_phone(account, certify))
    }

    async fn get_by_login_id(
        &self,
        tx: &DatabaseTransaction,
        login_id: &str,
    ) -> Result<AccountWithPhone, RepoError> {
        let row = parent_auth::Entity::find()
            .filter(parent_auth::Column::LoginId.eq(login_id))
            .find_also_related(parent_phone_certify::Entity)
            .one(tx)
            .await
            .map_err(|e| backend(e, "select parent auth by login id"))?;
        let (account, certify) = row.ok_or(RepoError::RowNotFound)?;
        Ok(account_with_phone(account, certify))
    }

    async fn available_uuid(&self, tx: &DatabaseTransaction) -> Result<String, RepoError> {
        loop {
            let candidate = id::random_id(EntityKind::Parent);
            match self.get_by_uuid(tx, &candidate).await {
                Ok(_) => continue,
                Err(RepoError::RowNotFound) => return Ok(candidate),
                Err(err) => return Err(err),
            }
        }
    }

    async fn store(
        &self,
        tx: &DatabaseTransaction,
        account: &mut ParentAccount,
    ) -> Result<(), RepoError> {
        if account.uuid.is_empty() {
            account.uuid = self.available_uuid(tx).await?;
        }
        account.validate().map_err(RepoError::InvalidRecord)?;

        parent_auth::ActiveModel {
            uuid: Set(account.uuid.clone()),
            login_id: Set(account.login_id.clone()),
            password_hash: Set(account.password_hash.clone()),
            name: Set(account.name.clone()),
            profile_uri: Set(account.profile_uri.clone()),
        }
        .insert(tx)
        .await
        .map_err(|e| classify_db_err(e, "insert parent auth"))?;
        Ok(())
    }

    async fn update(
        &self,
        tx: &DatabaseTransaction,
        uuid: &str,
        patch: &ParentPatch,
    ) -> Result<(), RepoError> {
        if patch.is_empty() {
            return Err(RepoError::InvalidRecord(
                "at least one field required".to_owned(),
            ));
        }

        let mut am = parent_auth::ActiveModel {
            uuid: Set(uuid.to_owned()),
            ..Default::default()
        };
        if let Some(login_id) = &patch.login_id {
            am.login_id = Set(login_id.clone());
        }
        if let Some(password_hash) = &patch.password_hash {
            am.password_hash = Set(password_hash.clone());
        }
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(profile_uri) = &patch.profile_uri {
            am.profile_uri = Set(Some(profile_uri.clone()));
        }

        match am.update(tx).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::RowNotFound),
            Err(err) => Err(classify_db_err(err, "update parent auth")),
        }
    }
}

// ── Phone certify repository ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct DbPhoneCertifyRepository;

fn certify_from_model(model: parent_phone_certify::Model) -> PhoneCertify {
    PhoneCertify {
        phone_number: model.phone_number,
        certify_code: model.certify_code,
        certified: model.certified,
        parent_uuid: model.parent_uuid,
    }
}

impl PhoneCertifyRepository for DbPhoneCertifyRepository {
    type Tx = DatabaseTransaction;

    async fn get_by_phone_number(
        &self,
        tx: &DatabaseTransaction,
        phone_number: &str,
    ) -> Result<PhoneCertify, RepoError> {
        let model = parent_phone_certify::Entity::find_by_id(phone_number.to_owned())
            .one(tx)
            .await
            .map_err(|e| backend(e, "select parent phone certify"))?;
        model.map(certify_from_model).ok_or(RepoError::RowNotFound)
    }

    async fn store(
        &self,
        tx: &DatabaseTransaction,
        certify: &mut PhoneCertify,
    ) -> Result<(), RepoError> {
        if certify.certify_code.is_empty() {
            certify.certify_code = random_certify_code();
        }
        certify.validate().map_err(RepoError::InvalidRecord)?;

        parent_phone_certify::ActiveModel {
            phone_number: Set(certify.phone_number.clone()),
            certify_code: Set(certify.certify_code.clone()),
            certified: Set(certify.certified),
            parent_uuid: Set(certify.parent_uuid.clone()),
        }
        .insert(tx)
        .await
        .map_err(|e| classify_db_err(e, "insert parent phone certify"))?;
        Ok(())
    }

    async fn update(
        &self,
        tx: &DatabaseTransaction,
        phone_number: &str,
        patch: &CertifyPatch,
    ) -> Result<(), RepoError> {
        if patch.is_empty() {
            return Err(RepoError::InvalidRecord(
                "at least one field required".to_owned(),
            ));
        }

        let mut am = parent_phone_certify::ActiveModel {
            phone_number: Set(phone_number.to_owned()),
            ..Default::default()
        };
        if let Some(certify_code) = &patch.certify_code {
            am.certify_code = Set(certify_code.clone());
        }
        if let Some(certified) = patch.certified {
            am.certified = Set(certified);
        }
        if let Some(parent_uuid) = &patch.parent_uuid {
            am.parent_uuid = Set(Some(parent_uuid.clone()));
        }

        match am.update(tx).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::RowNotFound),
            Err(err) => Err(classify_db_err(err, "update parent phone certify")),
        }
    }
}

// ── Children repository ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct DbChildRepository;

impl DbChildRepository {
    async fn exists(&self, tx: &DatabaseTransaction, uuid: &str) -> Result<bool, RepoError> {
        let found = children::Entity::find_by_id(uuid.to_owned())
            .one(tx)
            .await
            .map_err(|e| backend(e, "select children by uuid"))?;
        Ok(found.is_some())
    }
}

impl ChildRepository for DbChildRepository {
    type Tx = DatabaseTransaction;

    async fn available_uuid(&self, tx: &DatabaseTransaction) -> Result<String, RepoError> {
        loop {
            let candidate = id::random_id(EntityKind::Child);
            if !self.exists(tx, &candidate).await? {
                return Ok(candidate);
            }
        }
    }

    async fn store(&self, tx: &DatabaseTransaction, child: &mut Child) -> Result<(), RepoError> {
        if child.uuid.is_empty() {
            child.uuid = self.available_uuid(tx).await?;
        }
        child.validate().map_err(RepoError::InvalidRecord)?;

        children::ActiveModel {
            uuid: Set(child.uuid.clone()),
            parent_uuid: Set(child.parent_uuid.clone()),
            name: Set(child.name.clone()),
            birth: Set(child.birth),
            sex: Set(child.sex.clone()),
            profile_uri: Set(child.profile_uri.clone()),
        }
        .insert(tx)
        .await
        .map_err(|e| classify_db_err(e, "insert children"))?;
        Ok(())
    }
}

// ── Expenditure repository ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct DbExpenditureRepository;

impl DbExpenditureRepository {
    async fn exists(&self, tx: &DatabaseTransaction, uuid: &str) -> Result<bool, RepoError> {
        let found = expenditure::Entity::find_by_id(uuid.to_owned())
            .one(tx)
            .await
            .map_err(|e| backend(e, "select expenditure by uuid"))?;
        Ok(found.is_some())
    }
}

impl ExpenditureRepository for DbExpenditureRepository {
    type Tx = DatabaseTransaction;

    async fn available_uuid(&self, tx: &DatabaseTransaction) -> Result<String, RepoError> {
        loop {
            let candidate = id::random_id(EntityKind::Expenditure);
            if !self.exists(tx, &candidate).await? {
                return Ok(candidate);
            }
        }
    }

    async fn store(
        &self,
        tx: &DatabaseTransaction,
        record: &mut Expenditure,
        child_uuids: &[String],
    ) -> Result<(), RepoError> {
        if record.uuid.is_empty() {
            record.uuid = self.available_uuid(tx).await?;
        }
        record.validate().map_err(RepoError::InvalidRecord)?;

        expenditure::ActiveModel {
            uuid: Set(record.uuid.clone()),
            parent_uuid: Set(record.parent_uuid.clone()),
            name: Set(record.name.clone()),
            amount: Set(record.amount),
            rating: Set(record.rating),
            link: Set(record.link.clone()),
        }
        .insert(tx)
        .await
        .map_err(|e| classify_db_err(e, "insert expenditure"))?;

        for child_uuid in child_uuids {
            expenditure_child_tag::ActiveModel {
                expenditure_uuid: Set(record.uuid.clone()),
                child_uuid: Set(child_uuid.clone()),
            }
            .insert(tx)
            .await
            .map_err(|e| classify_db_err(e, "insert expenditure child tag"))?;
        }
        Ok(())
    }
}
