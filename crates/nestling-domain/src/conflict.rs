//! Business conflict codes returned to API consumers.
//!
//! Each code is a small negative integer identifying a specific 409 reason,
//! stable across releases — clients branch on these.

/// Conflict reasons surfaced by the parent auth workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictCode {
    /// Phone number is already bound to an account.
    PhoneAlreadyInUse,
    /// Phone number was already certified with the current code.
    PhoneAlreadyCertified,
    /// Supplied certify code does not match the most recent one.
    IncorrectCertifyCode,
    /// Sign-up attempted with a phone that was never certified.
    UncertifiedPhone,
    /// Chosen login id is taken.
    ParentIdAlreadyInUse,
    /// Login attempted with an unknown login id.
    NotExistParentId,
    /// Login attempted with a wrong password.
    IncorrectParentPw,
}

impl ConflictCode {
    /// The wire-level business code.
    pub fn code(self) -> i32 {
        match self {
            Self::PhoneAlreadyInUse => -101,
            Self::PhoneAlreadyCertified => -111,
            Self::IncorrectCertifyCode => -112,
            Self::UncertifiedPhone => -121,
            Self::ParentIdAlreadyInUse => -122,
            Self::NotExistParentId => -131,
            Self::IncorrectParentPw => -132,
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Self::PhoneAlreadyInUse => "PHONE_ALREADY_IN_USE",
            Self::PhoneAlreadyCertified => "PHONE_ALREADY_CERTIFIED",
            Self::IncorrectCertifyCode => "INCORRECT_CERTIFY_CODE",
            Self::UncertifiedPhone => "UNCERTIFIED_PHONE",
            Self::ParentIdAlreadyInUse => "PARENT_ID_ALREADY_IN_USE",
            Self::NotExistParentId => "NOT_EXIST_PARENT_ID",
            Self::IncorrectParentPw => "INCORRECT_PARENT_PW",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::PhoneAlreadyInUse => "phone number already in use",
            Self::PhoneAlreadyCertified => "phone number already certified",
            Self::IncorrectCertifyCode => "incorrect certify code",
            Self::UncertifiedPhone => "phone number is not certified",
            Self::ParentIdAlreadyInUse => "parent login id already in use",
            Self::NotExistParentId => "parent login id does not exist",
            Self::IncorrectParentPw => "incorrect parent password",
        }
    }
}
