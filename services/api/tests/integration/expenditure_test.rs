use nestling_api::error::ApiError;
use nestling_api::usecase::expenditure::{RegisterExpenditureInput, RegisterExpenditureUseCase};
use nestling_domain::id::{self, EntityKind};

use crate::helpers::{MockExpenditureRepo, MockSearch, MockTxHandler};

fn expenditure_input(parent_uuid: &str, child_uuids: Vec<String>) -> RegisterExpenditureInput {
    RegisterExpenditureInput {
        parent_uuid: parent_uuid.to_owned(),
        name: "stroller".to_owned(),
        amount: 250_000,
        rating: 4,
        link: Some("https://shop.example.com/stroller".to_owned()),
        child_uuids,
    }
}

#[tokio::test]
async fn should_store_and_index_matching_document() {
    let expenditures = MockExpenditureRepo::with_refs(
        vec!["p0123456789".to_owned()],
        vec!["c0123456789".to_owned()],
    );
    let rows = expenditures.rows_handle();
    let search = MockSearch::new();
    let documents = search.documents_handle();
    let tx = MockTxHandler::new();
    let (commits, _) = tx.counters();

    let usecase = RegisterExpenditureUseCase {
        tx,
        expenditures,
        search,
    };
    let out = usecase
        .execute(expenditure_input(
            "p0123456789",
            vec!["c0123456789".to_owned()],
        ))
        .await
        .unwrap();

    assert!(id::is_valid(EntityKind::Expenditure, &out.expenditure_uuid));
    assert_eq!(rows.lock().unwrap().len(), 1);

    let documents = documents.lock().unwrap();
    assert_eq!(documents.len(), 1);
    let (index, doc) = &documents[0];
    assert_eq!(index, "expenditure");
    assert_eq!(doc["uuid"], out.expenditure_uuid.as_str());
    assert_eq!(doc["name"], "stroller");
    assert_eq!(doc["amount"], 250_000);
    assert_eq!(doc["children"][0], "c0123456789");
    assert_eq!(*commits.lock().unwrap(), 1);
}

#[tokio::test]
async fn should_roll_back_when_index_write_fails() {
    let expenditures = MockExpenditureRepo::with_refs(
        vec!["p0123456789".to_owned()],
        vec!["c0123456789".to_owned()],
    );
    let tx = MockTxHandler::new();
    let (commits, rollbacks) = tx.counters();

    let usecase = RegisterExpenditureUseCase {
        tx,
        expenditures,
        search: MockSearch::failing(),
    };
    let result = usecase
        .execute(expenditure_input(
            "p0123456789",
            vec!["c0123456789".to_owned()],
        ))
        .await;

    assert!(matches!(result, Err(ApiError::Internal(_))));
    assert_eq!(*commits.lock().unwrap(), 0);
    assert_eq!(*rollbacks.lock().unwrap(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_parent() {
    let expenditures = MockExpenditureRepo::with_refs(vec![], vec!["c0123456789".to_owned()]);
    let usecase = RegisterExpenditureUseCase {
        tx: MockTxHandler::new(),
        expenditures,
        search: MockSearch::new(),
    };
    let result = usecase
        .execute(expenditure_input(
            "p0123456789",
            vec!["c0123456789".to_owned()],
        ))
        .await;
    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_child_tag() {
    let expenditures = MockExpenditureRepo::with_refs(vec!["p0123456789".to_owned()], vec![]);
    let usecase = RegisterExpenditureUseCase {
        tx: MockTxHandler::new(),
        expenditures,
        search: MockSearch::new(),
    };
    let result = usecase
        .execute(expenditure_input(
            "p0123456789",
            vec!["c0123456789".to_owned()],
        ))
        .await;
    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn should_conflict_on_duplicate_child_tag() {
    let expenditures = MockExpenditureRepo::with_refs(
        vec!["p0123456789".to_owned()],
        vec!["c0123456789".to_owned()],
    );
    let usecase = RegisterExpenditureUseCase {
        tx: MockTxHandler::new(),
        expenditures,
        search: MockSearch::new(),
    };
    // The same child listed twice collides on the tag table's primary key.
    let result = usecase
        .execute(expenditure_input(
            "p0123456789",
            vec!["c0123456789".to_owned(), "c0123456789".to_owned()],
        ))
        .await;
    assert!(matches!(result, Err(ApiError::TagAlreadyAttached)));
}
