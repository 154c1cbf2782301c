use serde_json::json;

use crate::domain::repository::{ExpenditureRepository, SearchIndexer, TxHandler};
use crate::domain::types::Expenditure;
use crate::error::{ApiError, RepoError};
use crate::usecase::internal;

/// Search index receiving expenditure documents.
const EXPENDITURE_INDEX: &str = "expenditure";

pub struct RegisterExpenditureInput {
    pub parent_uuid: String,
    pub name: String,
    pub amount: i64,
    pub rating: i32,
    pub link: Option<String>,
    pub child_uuids: Vec<String>,
}

pub struct RegisterExpenditureOutput {
    pub expenditure_uuid: String,
}

/// Store an expenditure with its child tags and index the document for
/// search. The index write happens inside the transaction window — an index
/// failure rolls the DB rows back so store and index never diverge.
pub struct RegisterExpenditureUseCase<T, R, I>
where
    T: TxHandler,
    R: ExpenditureRepository<Tx = T::Tx>,
    I: SearchIndexer,
{
    pub tx: T,
    pub expenditures: R,
    pub search: I,
}

impl<T, R, I> RegisterExpenditureUseCase<T, R, I>
where
    T: TxHandler,
    R: ExpenditureRepository<Tx = T::Tx>,
    I: SearchIndexer,
{
    pub async fn execute(
        &self,
        input: RegisterExpenditureInput,
    ) -> Result<RegisterExpenditureOutput, ApiError> {
        let tx = self
            .tx
            .begin()
            .await
            .map_err(|e| internal(e, "begin transaction"))?;

        match self.register(&tx, input).await {
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

    async fn register(
        &self,
        tx: &T::Tx,
        input: RegisterExpenditureInput,
    ) -> Result<RegisterExpenditureOutput, ApiError> {
        let mut record = Expenditure {
            uuid: String::new(),
            parent_uuid: input.parent_uuid,
            name: input.name,
            amount: input.amount,
            rating: input.rating,
            link: input.link,
        };
        match self
            .expenditures
            .store(tx, &mut record, &input.child_uuids)
            .await
        {
            Ok(()) => {}
            Err(RepoError::NoReferencedRow { foreign_key })
                if foreign_key == "parent_uuid" || foreign_key == "child_uuid" =>
            {
                return Err(ApiError::NotFound);
            }
            Err(RepoError::DuplicateEntry { key }) if key == "expenditure_child_tag" => {
                return Err(ApiError::TagAlreadyAttached);
            }
            Err(err) => return Err(internal(err, "store expenditure")),
        }

        let document = json!({
            "uuid": record.uuid,
            "parent_uuid": record.parent_uuid,
            "name": record.name,
            "amount": record.amount,
            "rating": record.rating,
            "link": record.link,
            "children": input.child_uuids,
        });
        self.search
            .index(EXPENDITURE_INDEX, document)
            .await
            .map_err(|e| ApiError::Internal(e.context("index expenditure")))?;

        Ok(RegisterExpenditureOutput {
            expenditure_uuid: record.uuid,
        })
    }
}
