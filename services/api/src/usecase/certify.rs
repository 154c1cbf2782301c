use nestling_domain::conflict::ConflictCode;

use crate::domain::repository::{PhoneCertifyRepository, SmsSender, TxHandler};
use crate::domain::types::{CertifyPatch, PhoneCertify, random_certify_code};
use crate::error::{ApiError, RepoError};
use crate::usecase::internal;

// ── SendCertifyCode ──────────────────────────────────────────────────────────

pub struct SendCertifyCodeInput {
    pub phone_number: String,
}

/// Issue (or reissue) a certify code for a phone number and deliver it by
/// SMS. Repeated sends simply replace the code and reset certification —
/// until the phone is bound to an account, after which sends are refused.
pub struct SendCertifyCodeUseCase<T, C, M>
where
    T: TxHandler,
    C: PhoneCertifyRepository<Tx = T::Tx>,
    M: SmsSender,
{
    pub tx: T,
    pub certifies: C,
    pub sms: M,
}

impl<T, C, M> SendCertifyCodeUseCase<T, C, M>
where
    T: TxHandler,
    C: PhoneCertifyRepository<Tx = T::Tx>,
    M: SmsSender,
{
    pub async fn execute(&self, input: SendCertifyCodeInput) -> Result<(), ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.send(&tx, &input.phone_number).await {
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

    async fn send(&self, tx: &T::Tx, phone_number: &str) -> Result<(), ApiError> {
        let code = match self.certifies.get_by_phone_number(tx, phone_number).await {
            Ok(row) if row.parent_uuid.is_some() => {
                return Err(ApiError::Conflict(ConflictCode::PhoneAlreadyInUse));
            }
            Ok(_) => {
                let code = random_certify_code();
                let patch = CertifyPatch {
                    certify_code: Some(code.clone()),
                    certified: Some(false),
                    parent_uuid: None,
                };
                self.certifies
                    .update(tx, phone_number, &patch)
                    .await
                    .map_err(|e| internal(e, "update parent phone certify"))?;
                code
            }
            Err(RepoError::RowNotFound) => {
                let mut row = PhoneCertify::new(phone_number);
                self.certifies
                    .store(tx, &mut row)
                    .await
                    .map_err(|e| internal(e, "store parent phone certify"))?;
                row.certify_code
            }
            Err(err) => return Err(internal(err, "get parent phone certify")),
        };

        self.sms
            .send_to_one(phone_number, &format!("Nestling certify code: {code}"))
            .await
            .map_err(|e| ApiError::Internal(e.context("send certify code sms")))?;
        Ok(())
    }
}

// ── CertifyPhone ─────────────────────────────────────────────────────────────

pub struct CertifyPhoneInput {
    pub phone_number: String,
    pub certify_code: String,
}

/// Match a submitted code against the most recently issued one and mark the
/// phone certified.
pub struct CertifyPhoneUseCase<T, C>
where
    T: TxHandler,
    C: PhoneCertifyRepository<Tx = T::Tx>,
{
    pub tx: T,
    pub certifies: C,
}

impl<T, C> CertifyPhoneUseCase<T, C>
where
    T: TxHandler,
    C: PhoneCertifyRepository<Tx = T::Tx>,
{
    pub async fn execute(&self, input: CertifyPhoneInput) -> Result<(), ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.certify(&tx, &input).await {
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

    async fn certify(&self, tx: &T::Tx, input: &CertifyPhoneInput) -> Result<(), ApiError> {
        let row = match self
            .certifies
            .get_by_phone_number(tx, &input.phone_number)
            .await
        {
            Ok(row) => row,
            Err(RepoError::RowNotFound) => return Err(ApiError::NotFound),
            Err(err) => return Err(internal(err, "get parent phone certify")),
        };

        if row.certified {
            return Err(ApiError::Conflict(ConflictCode::PhoneAlreadyCertified));
        }
        if row.certify_code != input.certify_code {
            return Err(ApiError::Conflict(ConflictCode::IncorrectCertifyCode));
        }

        let patch = CertifyPatch {
            certified: Some(true),
            ..Default::default()
        };
        self.certifies
            .update(tx, &input.phone_number, &patch)
            .await
            .map_err(|e| internal(e, "update parent phone certify"))
    }
}
