use anyhow::Context as _;

use crate::domain::repository::{HashError, PasswordHasher};

/// bcrypt's lowest permitted cost factor. Hash strength is not a product
/// requirement here; login latency is.
const MIN_COST: u32 = 4;

#[derive(Clone, Default)]
pub struct BcryptHasher;

impl PasswordHasher for BcryptHasher {
    fn hash_min_cost(&self, plain: &str) -> anyhow::Result<String> {
        bcrypt::hash(plain, MIN_COST).context("bcrypt hash")
    }

    fn verify(&self, hash: &str, plain: &str) -> Result<(), HashError> {
        match bcrypt::verify(plain, hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(HashError::Mismatch),
            Err(e) => Err(HashError::Backend(
                anyhow::Error::new(e).context("bcrypt verify"),
            )),
        }
    }
}
