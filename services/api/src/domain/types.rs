use chrono::{DateTime, Utc};
use rand::RngExt;

use nestling_domain::id::{self, EntityKind};

/// Parent account identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentAccount {
    /// `p` + 10 digits. Empty means "assign on store".
    pub uuid: String,
    pub login_id: String,
    pub password_hash: String,
    pub name: String,
    pub profile_uri: Option<String>,
}

impl ParentAccount {
    /// Field validation applied by the storage gateway before insert.
    pub fn validate(&self) -> Result<(), String> {
        if !id::is_valid(EntityKind::Parent, &self.uuid) {
            return Err("uuid must be 'p' followed by 10 digits".to_owned());
        }
        if self.login_id.len() < 4 || self.login_id.len() > 20 {
            return Err("login_id must be 4-20 characters".to_owned());
        }
        if self.password_hash.is_empty() {
            return Err("password_hash must not be empty".to_owned());
        }
        if self.name.is_empty() || self.name.chars().count() > 20 {
            return Err("name must be 1-20 characters".to_owned());
        }
        Ok(())
    }

    /// Deterministic object-storage key for this account's profile image.
    pub fn profile_uri_for(uuid: &str) -> String {
        format!("parents/{uuid}/profile")
    }
}

/// Account row joined with its bound phone number. `phone_number` is the
/// empty string while no phone is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountWithPhone {
    pub account: ParentAccount,
    pub phone_number: String,
}

/// Explicit partial update for a parent account. `None` leaves the column
/// untouched; `Some` replaces it. An all-`None` patch is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentPatch {
    pub login_id: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub profile_uri: Option<String>,
}

impl ParentPatch {
    pub fn is_empty(&self) -> bool {
        self.login_id.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.profile_uri.is_none()
    }
}

/// Phone verification row: the certify state machine for one phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneCertify {
    /// Exactly 11 digits, primary key.
    pub phone_number: String,
    /// 6-digit code; regenerated on each send. Empty means "issue on store".
    pub certify_code: String,
    pub certified: bool,
    /// Set once when the certified phone is bound to an account.
    pub parent_uuid: Option<String>,
}

impl PhoneCertify {
    /// Fresh unverified row for `phone_number`; the storage gateway issues a
    /// certify code on store.
    pub fn new(phone_number: &str) -> Self {
        Self {
            phone_number: phone_number.to_owned(),
            certify_code: String::new(),
            certified: false,
            parent_uuid: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.phone_number.len() != 11 || !self.phone_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err("phone_number must be exactly 11 digits".to_owned());
        }
        if self.certify_code.len() != 6 || !self.certify_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err("certify_code must be exactly 6 digits".to_owned());
        }
        if let Some(uuid) = &self.parent_uuid {
            if !id::is_valid(EntityKind::Parent, uuid) {
                return Err("parent_uuid must be 'p' followed by 10 digits".to_owned());
            }
        }
        Ok(())
    }
}

/// Generate a fresh 6-digit certify code.
pub fn random_certify_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..1_000_000u32))
}

/// Partial update for a phone verification row. Set/replace only — a field
/// once written cannot be nulled out through this patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertifyPatch {
    pub certify_code: Option<String>,
    pub certified: Option<bool>,
    pub parent_uuid: Option<String>,
}

impl CertifyPatch {
    pub fn is_empty(&self) -> bool {
        self.certify_code.is_none() && self.certified.is_none() && self.parent_uuid.is_none()
    }
}

/// Child profile owned by one parent account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    /// `c` + 10 digits. Empty means "assign on store".
    pub uuid: String,
    pub parent_uuid: String,
    pub name: String,
    pub birth: DateTime<Utc>,
    pub sex: String,
    pub profile_uri: Option<String>,
}

impl Child {
    pub fn validate(&self) -> Result<(), String> {
        if !id::is_valid(EntityKind::Child, &self.uuid) {
            return Err("uuid must be 'c' followed by 10 digits".to_owned());
        }
        if !id::is_valid(EntityKind::Parent, &self.parent_uuid) {
            return Err("parent_uuid must be 'p' followed by 10 digits".to_owned());
        }
        if self.name.is_empty() || self.name.chars().count() > 10 {
            return Err("name must be 1-10 characters".to_owned());
        }
        if self.sex.is_empty() || self.sex.chars().count() > 10 {
            return Err("sex must be 1-10 characters".to_owned());
        }
        Ok(())
    }

    pub fn profile_uri_for(uuid: &str) -> String {
        format!("children/{uuid}/profile")
    }
}

/// Childcare expenditure record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expenditure {
    /// `e` + 10 digits. Empty means "assign on store".
    pub uuid: String,
    pub parent_uuid: String,
    pub name: String,
    pub amount: i64,
    pub rating: i32,
    pub link: Option<String>,
}

impl Expenditure {
    pub fn validate(&self) -> Result<(), String> {
        if !id::is_valid(EntityKind::Expenditure, &self.uuid) {
            return Err("uuid must be 'e' followed by 10 digits".to_owned());
        }
        if !id::is_valid(EntityKind::Parent, &self.parent_uuid) {
            return Err("parent_uuid must be 'p' followed by 10 digits".to_owned());
        }
        if self.name.is_empty() || self.name.chars().count() > 20 {
            return Err("name must be 1-20 characters".to_owned());
        }
        if self.amount <= 0 {
            return Err("amount must be positive".to_owned());
        }
        if !(0..=5).contains(&self.rating) {
            return Err("rating must be between 0 and 5".to_owned());
        }
        Ok(())
    }
}
